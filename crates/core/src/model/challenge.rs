use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed number of assisted-listening challenges appended to every lesson.
pub const ASSIST_CHALLENGES_PER_LESSON: usize = 2;

/// Options shown for every challenge: the answer plus its distractors.
pub const OPTIONS_PER_CHALLENGE: usize = 3;

pub const DISTRACTORS_PER_CHALLENGE: usize = OPTIONS_PER_CHALLENGE - 1;

/// Challenge type tag, stored as `SELECT` / `ASSIST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeKind {
    /// Pick the translation of a source-language term.
    Select,
    /// Hear (or read) a target-language term and pick it.
    Assist,
}

impl ChallengeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChallengeKind::Select => "SELECT",
            ChallengeKind::Assist => "ASSIST",
        }
    }

    /// Whether options of this kind keep their image reference.
    #[must_use]
    pub fn shows_images(self) -> bool {
        matches!(self, ChallengeKind::Select)
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChallengeKindError(String);

impl fmt::Display for ParseChallengeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid challenge type: {}", self.0)
    }
}

impl std::error::Error for ParseChallengeKindError {}

impl FromStr for ChallengeKind {
    type Err = ParseChallengeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SELECT" => Ok(ChallengeKind::Select),
            "ASSIST" => Ok(ChallengeKind::Assist),
            other => Err(ParseChallengeKindError(other.to_owned())),
        }
    }
}

/// Prompt for a select challenge on `source`.
#[must_use]
pub fn select_prompt(source: &str) -> String {
    format!("Which one of these is \"{source}\"?")
}

/// Prompt for an assisted-listening challenge on `target`.
#[must_use]
pub fn assist_prompt(target: &str) -> String {
    format!("\"{target}\" (listen and pick)")
}
