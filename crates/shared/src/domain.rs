use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

id_newtype!(SessionId);

/// Which of the two game screens a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    CategorySelection,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    Wrong,
}

impl GuessOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Correct => "✅ Correct! Well done! 🎉",
            Self::Wrong => "❌ Wrong! Try again. 😕",
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Everything a presentation layer needs to draw one screen.
///
/// `original_word` is only populated while `reveal_answer` is set, so a view
/// can be handed to an untrusted front end without leaking the answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundView {
    pub screen: Screen,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub scrambled_word: String,
    #[serde(default)]
    pub last_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GuessOutcome>,
    #[serde(default)]
    pub reveal_answer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_word: Option<String>,
}

impl RoundView {
    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }
}
