//! Turn-based state of a single game.
//!
//! `GameState` owns the attempts, the draft being typed, the status and the
//! reveal level. Every transition is a plain method; invalid submissions are
//! reported back as [`GuessOutcome::Ignored`] and leave the state untouched.

use crate::scorer::{LetterVerdict, matches_target, score};
use crate::target::Target;

pub const MAX_ATTEMPTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    NoTarget,
    Finished,
    Empty,
    /// A new target is being fetched.
    Loading,
    /// The last fetch failed; only a restart helps.
    LoadFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Accepted {
        verdicts: Vec<LetterVerdict>,
        status: GameStatus,
    },
    Ignored(IgnoreReason),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    target: Option<Target>,
    attempts: Vec<String>,
    current_attempt: String,
    status: GameStatus,
    reveal_level: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game with no target loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: None,
            attempts: Vec::new(),
            current_attempt: String::new(),
            status: GameStatus::InProgress,
            reveal_level: 0,
        }
    }

    #[must_use]
    pub fn with_target(target: Target) -> Self {
        Self {
            target: Some(target),
            ..Self::new()
        }
    }

    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        let Some(target) = &self.target else {
            return GuessOutcome::Ignored(IgnoreReason::NoTarget);
        };
        if self.status.is_terminal() {
            return GuessOutcome::Ignored(IgnoreReason::Finished);
        }
        if raw.is_empty() {
            return GuessOutcome::Ignored(IgnoreReason::Empty);
        }

        let verdicts = score(raw, &target.display_name);
        let won = matches_target(raw, &target.display_name);

        self.attempts.push(raw.to_string());
        self.status = if won {
            GameStatus::Won
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        self.reveal_level = MAX_ATTEMPTS.min(self.attempts.len());
        self.current_attempt.clear();

        GuessOutcome::Accepted {
            verdicts,
            status: self.status,
        }
    }

    /// Stores the text currently being typed. Ignored once the game is over.
    pub fn update_current_attempt(&mut self, draft: &str) {
        if self.status.is_terminal() {
            return;
        }
        draft.clone_into(&mut self.current_attempt);
    }

    #[must_use]
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    #[must_use]
    pub fn current_attempt(&self) -> &str {
        &self.current_attempt
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn reveal_level(&self) -> usize {
        self.reveal_level
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS - self.attempts.len()
    }

    /// Each past attempt paired with its verdicts, re-scored for display.
    #[must_use]
    pub fn scored_attempts(&self) -> Vec<(&str, Vec<LetterVerdict>)> {
        let target = self.target.as_ref().map_or("", |t| t.display_name.as_str());
        self.attempts
            .iter()
            .map(|a| (a.as_str(), score(a, target)))
            .collect()
    }
}
