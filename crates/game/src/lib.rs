//! Word scramble game core: the built-in word bank, the scramble and word
//! selection procedures, and the per-session round controller.

pub mod round;
pub mod scramble;
pub mod word_bank;

pub use round::RoundController;
pub use scramble::{pick_word, scramble};
pub use word_bank::{Category, WordBank};
