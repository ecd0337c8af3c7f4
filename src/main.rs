use gallows::cli::parse_cli;
use gallows::round::RoundController;
use gallows::tui;
use gallows::words::{Catalog, WordSource};

fn main() {
    env_logger::init();
    let cli = parse_cli();

    let mut catalog = Catalog::builtin();
    let mut topic = cli.topic.clone();
    if let Some(path) = &cli.word_list_path {
        match WordSource::from_file("custom", path) {
            Ok(source) => {
                catalog.add(source);
                topic = "custom".to_string();
            }
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                return;
            }
        }
    }

    let mut controller = RoundController::new(catalog, &topic, cli.scoring);
    if let Err(e) = tui::run(&mut controller) {
        eprintln!("Terminal error: {e}");
    }
}
