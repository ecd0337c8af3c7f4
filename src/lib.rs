// Library interface for gallows
// This allows integration tests to access internal modules

pub mod cli;
pub mod logging;
pub mod round;
pub mod tui;
pub mod words;

// Re-export the round state machine and word sources for easier testing
pub use round::{MISTAKE_BUDGET, RESET_DELAY, RoundController, RoundEvent};
pub use words::{Catalog, DEFAULT_TOPIC, WordEntry, WordSource, WordSourceError};
