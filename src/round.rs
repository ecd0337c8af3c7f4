use crate::words::Catalog;
use crate::{debug_log, info_log, warn_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

/// Distinct wrong letters allowed before the round is lost.
pub const MISTAKE_BUDGET: usize = 6;

/// Delay between a round ending and the automatic start of the next one.
pub const RESET_DELAY: Duration = Duration::from_millis(2000);

/// Score thresholds at which the level advances; the last one wraps the
/// scoreboard back to its starting state.
const LEVEL_THRESHOLDS: [i32; 3] = [20, 40, 60];

/// Effects produced by a state transition, for the presentation layer to
/// turn into cues (redraw, bell, indicator). Pure data, no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    RoundStarted,
    CorrectGuess(char),
    WrongGuess(char),
    Won,
    Lost,
    LevelUp(u32),
    /// Final threshold reached: score wrapped to 0, level back to 1.
    LevelsComplete,
}

/// Running score across rounds. Optional feature, off by default.
#[derive(Debug, Clone, Copy)]
struct Scoreboard {
    score: i32,
    level: u32,
}

impl Scoreboard {
    fn new() -> Self {
        Self { score: 0, level: 1 }
    }

    fn record_win(&mut self) -> Option<RoundEvent> {
        self.score += 1;
        let threshold = LEVEL_THRESHOLDS.get(self.level as usize - 1)?;
        if self.score != *threshold {
            return None;
        }
        if self.level as usize == LEVEL_THRESHOLDS.len() {
            self.score = 0;
            self.level = 1;
            Some(RoundEvent::LevelsComplete)
        } else {
            self.level += 1;
            Some(RoundEvent::LevelUp(self.level))
        }
    }

    fn record_loss(&mut self) {
        // No floor: the score can go negative.
        self.score -= 1;
    }
}

/// The hangman round state machine.
///
/// Owns all game state: the active word source, the word being guessed, the
/// letters guessed so far, the pending auto-reset deadline and the optional
/// scoreboard. Every mutation happens through the operations below; the
/// presentation layer renders from accessors and reacts to the returned
/// [`RoundEvent`]s.
pub struct RoundController {
    catalog: Catalog,
    active: usize,
    answer: String,
    hint: String,
    guessed: Vec<char>,
    pending_reset: Option<Instant>,
    scoreboard: Option<Scoreboard>,
    rng: StdRng,
}

impl RoundController {
    /// Create a controller on `catalog` starting at `topic` (unknown ids
    /// fall back to the default topic) and draw the first word.
    #[must_use]
    pub fn new(catalog: Catalog, topic: &str, scoring: bool) -> Self {
        Self::with_rng(catalog, topic, scoring, StdRng::from_entropy())
    }

    /// Like [`RoundController::new`] with a fixed seed, for reproducible
    /// word draws in tests.
    #[must_use]
    pub fn seeded(catalog: Catalog, topic: &str, scoring: bool, seed: u64) -> Self {
        Self::with_rng(catalog, topic, scoring, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, topic: &str, scoring: bool, rng: StdRng) -> Self {
        let active = catalog.resolve(topic);
        let mut controller = Self {
            catalog,
            active,
            answer: String::new(),
            hint: String::new(),
            guessed: Vec::new(),
            pending_reset: None,
            scoreboard: scoring.then(Scoreboard::new),
            rng,
        };
        controller.start_round();
        controller
    }

    /// Draw a fresh word from the active source and discard the old round
    /// wholesale. Repeats across rounds are allowed.
    fn start_round(&mut self) -> RoundEvent {
        let entry = self
            .catalog
            .get(self.active)
            .entries()
            .choose(&mut self.rng)
            .expect("word sources are validated non-empty at load");
        info_log!(
            "start_round() - topic '{}', drew '{}'",
            self.topic(),
            entry.answer
        );
        self.answer = entry.answer.clone();
        self.hint = entry.hint.clone();
        self.guessed.clear();
        RoundEvent::RoundStarted
    }

    /// Switch the active topic and start a new round, abandoning any
    /// in-progress guesses. Unknown ids fall back to the default topic.
    pub fn select_topic(&mut self, topic: &str) -> Vec<RoundEvent> {
        if !self.catalog.topics().any(|t| t == topic) {
            warn_log!("unknown topic '{}', falling back to the default", topic);
        }
        self.active = self.catalog.resolve(topic);
        info_log!("select_topic('{}') - active source '{}'", topic, self.topic());
        self.pending_reset = None;
        vec![self.start_round()]
    }

    /// Record one guessed letter.
    ///
    /// Silent no-op unless `letter` is lowercase a-z, the round is still
    /// live and the letter has not been guessed before. When the guess ends
    /// the round, an auto-reset is scheduled [`RESET_DELAY`] from now.
    pub fn guess_letter(&mut self, letter: char) -> Vec<RoundEvent> {
        if !letter.is_ascii_lowercase() {
            debug_log!("guess_letter('{}') - not a lowercase letter, ignored", letter);
            return Vec::new();
        }
        if self.is_winner() || self.is_loser() {
            debug_log!("guess_letter('{}') - round already over, ignored", letter);
            return Vec::new();
        }
        if self.guessed.contains(&letter) {
            debug_log!("guess_letter('{}') - duplicate, ignored", letter);
            return Vec::new();
        }

        self.guessed.push(letter);
        let mut events = vec![if self.answer.contains(letter) {
            RoundEvent::CorrectGuess(letter)
        } else {
            RoundEvent::WrongGuess(letter)
        }];

        if self.is_winner() {
            info_log!("guess_letter('{}') - round won", letter);
            events.push(RoundEvent::Won);
            if let Some(board) = self.scoreboard.as_mut()
                && let Some(event) = board.record_win()
            {
                events.push(event);
            }
            self.schedule_reset();
        } else if self.is_loser() {
            info_log!("guess_letter('{}') - round lost", letter);
            events.push(RoundEvent::Lost);
            if let Some(board) = self.scoreboard.as_mut() {
                board.record_loss();
            }
            self.schedule_reset();
        }
        events
    }

    /// Start a new round immediately, cancelling any pending auto-reset.
    pub fn manual_reset(&mut self) -> Vec<RoundEvent> {
        self.pending_reset = None;
        vec![self.start_round()]
    }

    /// Cooperative timer tick. Fires the scheduled auto-reset once its
    /// deadline has passed; otherwise does nothing.
    pub fn tick(&mut self, now: Instant) -> Vec<RoundEvent> {
        match self.pending_reset {
            Some(deadline) if now >= deadline => {
                self.pending_reset = None;
                vec![self.start_round()]
            }
            _ => Vec::new(),
        }
    }

    fn schedule_reset(&mut self) {
        // At most one pending auto-reset; scheduling replaces any previous.
        self.pending_reset = Some(Instant::now() + RESET_DELAY);
    }

    // Render contract: everything below is derived from the round state.

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        self.catalog.get(self.active).name()
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.catalog.topics()
    }

    /// Letters guessed this round, in guess order.
    #[must_use]
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    /// Guessed letters not present in the answer, in guess order.
    #[must_use]
    pub fn incorrect_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.answer.contains(*c))
            .collect()
    }

    /// Number of wrong guesses, which drives drawing stages 0-6.
    #[must_use]
    pub fn mistakes(&self) -> usize {
        self.guessed
            .iter()
            .filter(|c| !self.answer.contains(**c))
            .count()
    }

    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.answer.chars().all(|c| self.guessed.contains(&c))
    }

    #[must_use]
    pub fn is_loser(&self) -> bool {
        self.mistakes() >= MISTAKE_BUDGET
    }

    #[must_use]
    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset.is_some()
    }

    /// `(score, level)` when scoring is enabled.
    #[must_use]
    pub fn score(&self) -> Option<(i32, u32)> {
        self.scoreboard.map(|b| (b.score, b.level))
    }
}
