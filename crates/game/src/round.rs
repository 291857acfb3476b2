use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{
    domain::{GuessOutcome, RoundView, Screen},
    error::GameError,
    protocol::GameAction,
};
use tracing::{debug, warn};

use crate::{
    scramble::{pick_word, scramble},
    word_bank::{Category, WordBank},
};

#[derive(Debug, Clone)]
struct Round {
    category: &'static Category,
    original_word: &'static str,
    scrambled_word: String,
    outcome: Option<GuessOutcome>,
}

/// Round state for a single session.
///
/// No round means the session is on the category selection screen. The reveal
/// flag is derived from the last outcome: it is set exactly when the most
/// recent guess for the current word was wrong, so any navigation clears it.
#[derive(Debug)]
pub struct RoundController<R = StdRng> {
    bank: &'static WordBank,
    rng: R,
    round: Option<Round>,
}

impl RoundController<StdRng> {
    pub fn new(bank: &'static WordBank) -> Self {
        Self::with_rng(bank, StdRng::from_os_rng())
    }

    pub fn seeded(bank: &'static WordBank, seed: u64) -> Self {
        Self::with_rng(bank, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundController<R> {
    pub fn with_rng(bank: &'static WordBank, rng: R) -> Self {
        Self {
            bank,
            rng,
            round: None,
        }
    }

    pub fn bank(&self) -> &'static WordBank {
        self.bank
    }

    /// Selects `category` and deals its first word. An unknown name leaves the
    /// current state untouched.
    pub fn start_game(&mut self, category: &str) -> Result<(), GameError> {
        let category = self.bank.category(category)?;
        self.deal(category);
        debug!(category = category.name, "game started");
        Ok(())
    }

    /// Deals a fresh word from the current category. Returns `false` and does
    /// nothing on the selection screen.
    pub fn next_word(&mut self) -> bool {
        let Some(category) = self.round.as_ref().map(|round| round.category) else {
            debug!("next word requested without a category; ignoring");
            return false;
        };
        self.deal(category);
        true
    }

    /// Compares the trimmed, lowercased guess with the current word. Returns
    /// `None` on the selection screen.
    pub fn submit_guess(&mut self, guess: &str) -> Option<GuessOutcome> {
        let Some(round) = self.round.as_mut() else {
            debug!("guess submitted without a category; ignoring");
            return None;
        };
        let outcome = if guess.trim().to_lowercase() == round.original_word {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Wrong
        };
        round.outcome = Some(outcome);
        debug!(category = round.category.name, ?outcome, "guess evaluated");
        Some(outcome)
    }

    pub fn reset(&mut self) {
        self.round = None;
    }

    pub fn apply(&mut self, action: GameAction) -> Result<RoundView, GameError> {
        match action {
            GameAction::StartGame { category } => self.start_game(&category)?,
            GameAction::NextWord => {
                self.next_word();
            }
            GameAction::SubmitGuess { guess } => {
                self.submit_guess(&guess);
            }
            GameAction::Reset => self.reset(),
        }
        Ok(self.view())
    }

    fn deal(&mut self, category: &'static Category) {
        let original_word = pick_word(category.words, &mut self.rng).unwrap_or_else(|| {
            warn!(category = category.name, "category has no words");
            ""
        });
        let scrambled_word = scramble(original_word, &mut self.rng);
        self.round = Some(Round {
            category,
            original_word,
            scrambled_word,
            outcome: None,
        });
    }
}

impl<R> RoundController<R> {
    pub fn screen(&self) -> Screen {
        if self.round.is_some() {
            Screen::Playing
        } else {
            Screen::CategorySelection
        }
    }

    pub fn selected_category(&self) -> Option<&'static str> {
        self.round.as_ref().map(|round| round.category.name)
    }

    pub fn original_word(&self) -> Option<&'static str> {
        self.round.as_ref().map(|round| round.original_word)
    }

    pub fn scrambled_word(&self) -> &str {
        self.round
            .as_ref()
            .map_or("", |round| round.scrambled_word.as_str())
    }

    pub fn outcome(&self) -> Option<GuessOutcome> {
        self.round.as_ref().and_then(|round| round.outcome)
    }

    pub fn last_message(&self) -> &'static str {
        self.outcome().map_or("", GuessOutcome::message)
    }

    pub fn reveal_answer(&self) -> bool {
        self.outcome() == Some(GuessOutcome::Wrong)
    }

    pub fn view(&self) -> RoundView {
        let Some(round) = &self.round else {
            return RoundView::default();
        };
        let reveal_answer = self.reveal_answer();
        RoundView {
            screen: Screen::Playing,
            category: Some(round.category.name.to_string()),
            icon: Some(round.category.icon.to_string()),
            scrambled_word: round.scrambled_word.clone(),
            last_message: self.last_message().to_string(),
            outcome: round.outcome,
            reveal_answer,
            original_word: reveal_answer.then(|| round.original_word.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "tests/round_tests.rs"]
mod tests;
