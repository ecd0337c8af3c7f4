//! TUI (Terminal User Interface) module for Gallows
//!
//! Renders the current round state (hint, masked word, gallows drawing,
//! keyboard key states, win/loss indicator) and forwards input events into
//! the round controller. The controller holds all game logic; this module is
//! presentation glue only.
//!
//! # Input mapping
//! - `a`-`z`: guess a letter
//! - ENTER: start a new round immediately
//! - TAB: cycle to the next topic
//! - ESC / Ctrl-C: quit

use crate::round::{RoundController, RoundEvent};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const WIN_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const REVEAL_STYLE: Style = Style::new().fg(Color::Red);
const STATUS_STYLE: Style = Style::new().fg(Color::Yellow);

/// Accent color for the hint line, advanced every round. Stands in for the
/// original's randomized background/text colors.
const ACCENT_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightBlue,
    Color::LightRed,
];

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// One drawing per count of wrong guesses, stages 0-6.
const DRAWING_STAGES: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

#[derive(Clone, Copy, PartialEq, Debug)]
enum KeyState {
    Unused,
    Correct,
    Wrong,
}

impl KeyState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Unused => (Color::DarkGray, Color::White),
            Self::Correct => (Color::Green, Color::Black),
            Self::Wrong => (Color::Gray, Color::Black),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too
/// many function arguments.
struct RenderContext<'a> {
    controller: &'a RoundController,
    status: &'a str,
    accent: Color,
}

/// Main TUI component.
///
/// Manages terminal setup and teardown, rendering, and input handling.
pub struct HangmanTui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    status: String,
    accent: usize,
    bell_pending: bool,
}

/// Run the game in the terminal until the player quits.
pub fn run(controller: &mut RoundController) -> Result<(), io::Error> {
    let mut tui = HangmanTui::new()?;
    tui.run_loop(controller)
}

impl HangmanTui {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("HangmanTui::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            status: "Guess a letter".to_string(),
            accent: 0,
            bell_pending: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn run_loop(&mut self, controller: &mut RoundController) -> Result<(), io::Error> {
        self.draw(controller)?;
        loop {
            // Cooperative tick: fires the post-round auto-reset when due.
            let tick_events = controller.tick(Instant::now());
            self.apply_events(&tick_events);

            if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(controller, key) {
                            info_log!("run_loop() - quit requested");
                            break;
                        }
                    }
                    _other => {
                        debug_log!("run_loop() - Ignoring event: {:?}", _other);
                    }
                }
            }

            self.draw(controller)?;
        }
        Ok(())
    }

    /// Handle one key press. Returns true when the player wants to quit.
    fn handle_key(&mut self, controller: &mut RoundController, key: KeyEvent) -> bool {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if has_ctrl => return true,
            KeyCode::Char(c) if c.is_ascii_alphabetic() && !has_ctrl && !has_alt => {
                let events = controller.guess_letter(c.to_ascii_lowercase());
                debug_log!("handle_key() - guess '{}': {:?}", c, events);
                self.apply_events(&events);
            }
            KeyCode::Enter => {
                info_log!("handle_key() - manual reset");
                let events = controller.manual_reset();
                self.apply_events(&events);
            }
            KeyCode::Tab => {
                let next = Self::next_topic(controller);
                info_log!("handle_key() - switching topic to '{}'", next);
                let events = controller.select_topic(&next);
                self.apply_events(&events);
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        false
    }

    /// Topic after the current one, wrapping around.
    fn next_topic(controller: &RoundController) -> String {
        let topics: Vec<String> = controller.topics().map(str::to_string).collect();
        let current = topics
            .iter()
            .position(|t| t == controller.topic())
            .unwrap_or(0);
        topics[(current + 1) % topics.len()].clone()
    }

    /// Turn state-transition events into presentation cues: status text,
    /// terminal bell, accent color change on round start.
    fn apply_events(&mut self, events: &[RoundEvent]) {
        for event in events {
            match event {
                RoundEvent::RoundStarted => {
                    self.accent = (self.accent + 1) % ACCENT_COLORS.len();
                    self.status = "New round - guess a letter".to_string();
                }
                RoundEvent::CorrectGuess(c) => {
                    self.status = format!("'{c}' is in the word");
                }
                RoundEvent::WrongGuess(c) => {
                    self.status = format!("'{c}' is not in the word");
                }
                RoundEvent::Won => {
                    self.status = "You won! Next round starting...".to_string();
                    self.bell_pending = true;
                }
                RoundEvent::Lost => {
                    self.status = "You lost! Next round starting...".to_string();
                    self.bell_pending = true;
                }
                RoundEvent::LevelUp(level) => {
                    self.status = format!("Level up! Welcome to level {level}");
                    self.bell_pending = true;
                }
                RoundEvent::LevelsComplete => {
                    self.status = "All levels complete! Starting over".to_string();
                    self.bell_pending = true;
                }
            }
        }
    }

    fn draw(&mut self, controller: &RoundController) -> Result<(), io::Error> {
        let ctx = RenderContext {
            controller,
            status: &self.status,
            accent: ACCENT_COLORS[self.accent],
        };
        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        if self.bell_pending {
            // Audio cue stand-in for the original's win/loss sounds.
            execute!(self.terminal.backend_mut(), Print("\u{0007}"))?;
            self.bell_pending = false;
        }
        Ok(())
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Hint
                Constraint::Length(9), // Gallows drawing
                Constraint::Length(3), // Masked word
                Constraint::Min(5),    // Keyboard
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.controller);
        Self::render_hint(f, chunks[1], ctx.controller.hint(), ctx.accent);
        Self::render_drawing(f, chunks[2], ctx.controller.mistakes());
        Self::render_word(f, chunks[3], ctx.controller);
        Self::render_keyboard(f, chunks[4], ctx.controller);
        Self::render_status(f, chunks[5], ctx.status, ctx.controller);
        Self::render_instructions(f, chunks[6]);
    }

    fn render_title(f: &mut Frame, area: Rect, controller: &RoundController) {
        let mut title = format!("GALLOWS - topic: {}", controller.topic());
        if let Some((score, level)) = controller.score() {
            title.push_str(&format!("  |  score: {score}  level: {level}"));
        }
        let paragraph = Paragraph::new(title)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_hint(f: &mut Frame, area: Rect, hint: &str, accent: Color) {
        let paragraph = Paragraph::new(hint.to_string())
            .style(Style::default().fg(accent))
            .block(Block::default().title("Hint").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_drawing(f: &mut Frame, area: Rect, mistakes: usize) {
        let stage = mistakes.min(DRAWING_STAGES.len() - 1);
        let paragraph = Paragraph::new(DRAWING_STAGES[stage])
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// The word being guessed: guessed letters shown, the rest blanked.
    /// On a loss the missing letters are revealed in red.
    fn render_word(f: &mut Frame, area: Rect, controller: &RoundController) {
        let guessed = controller.guessed_letters();
        let reveal = controller.is_loser();
        let mut spans = vec![Span::raw(" ")];
        for c in controller.answer().chars() {
            let span = if guessed.contains(&c) {
                Span::styled(
                    c.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else if reveal {
                Span::styled(c.to_string(), REVEAL_STYLE)
            } else {
                Span::raw("_")
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        let paragraph =
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, controller: &RoundController) {
        let round_over = controller.is_winner() || controller.is_loser();
        let mut lines = Vec::new();
        for row in KEYBOARD_ROWS {
            let mut spans = vec![Span::raw(" ")];
            for c in row.chars() {
                let state = Self::key_state(controller, c);
                let (bg, fg) = state.colors();
                let mut style = Style::default().fg(fg).bg(bg);
                if round_over {
                    style = style.add_modifier(Modifier::DIM);
                }
                spans.push(Span::styled(format!(" {c} "), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn key_state(controller: &RoundController, c: char) -> KeyState {
        if !controller.guessed_letters().contains(&c) {
            KeyState::Unused
        } else if controller.answer().contains(c) {
            KeyState::Correct
        } else {
            KeyState::Wrong
        }
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str, controller: &RoundController) {
        let (text, style) = if controller.is_winner() {
            (format!("WIN!  {status}"), WIN_STYLE)
        } else if controller.is_loser() {
            (format!("LOSS  {status}"), LOSS_STYLE)
        } else {
            (status.to_string(), STATUS_STYLE)
        };
        let paragraph = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect) {
        let paragraph =
            Paragraph::new("A-Z: guess | ENTER: new round | TAB: switch topic | ESC: quit")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl Drop for HangmanTui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_has_one_stage_per_mistake() {
        use crate::round::MISTAKE_BUDGET;
        assert_eq!(DRAWING_STAGES.len(), MISTAKE_BUDGET + 1);
    }

    #[test]
    fn test_drawing_stages_add_parts_monotonically() {
        // Every wrong guess must make the drawing grow, never shrink.
        let ink = |stage: &str| stage.chars().filter(|c| !c.is_whitespace()).count();
        for pair in DRAWING_STAGES.windows(2) {
            assert!(ink(pair[1]) > ink(pair[0]));
        }
    }

    #[test]
    fn test_keyboard_rows_cover_alphabet_once() {
        let mut letters: Vec<char> = KEYBOARD_ROWS.iter().flat_map(|r| r.chars()).collect();
        letters.sort_unstable();
        let alphabet: Vec<char> = ('a'..='z').collect();
        assert_eq!(letters, alphabet);
    }

    #[test]
    fn test_next_topic_cycles_through_catalog() {
        use crate::words::Catalog;
        let mut controller = RoundController::seeded(Catalog::builtin(), "animals", false, 1);
        let first = HangmanTui::next_topic(&controller);
        assert_eq!(first, "capitals");
        controller.select_topic(&first);
        assert_eq!(HangmanTui::next_topic(&controller), "animals");
    }

    #[test]
    fn test_key_state_tracks_guesses() {
        use crate::words::{Catalog, WordSource};
        let catalog =
            Catalog::new(vec![WordSource::from_json_str("test", r#"{"cat": "a feline"}"#).unwrap()]);
        let mut controller = RoundController::new(catalog, "test", false);
        controller.guess_letter('c');
        controller.guess_letter('z');
        assert_eq!(HangmanTui::key_state(&controller, 'c'), KeyState::Correct);
        assert_eq!(HangmanTui::key_state(&controller, 'z'), KeyState::Wrong);
        assert_eq!(HangmanTui::key_state(&controller, 'a'), KeyState::Unused);
    }
}
