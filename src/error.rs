//! Error types shared by the word bank, stats store, game round and session.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Why a word was refused by the word bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    NotAlphabetic,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "too short (words need at least 2 letters)"),
            Self::NotAlphabetic => write!(f, "words may only contain letters"),
        }
    }
}

#[derive(Debug)]
pub enum WordBankError {
    Rejected(RejectReason),
    Unwritable { path: PathBuf, source: io::Error },
}

impl fmt::Display for WordBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "word rejected: {reason}"),
            Self::Unwritable { path, source } => {
                write!(f, "could not write word list '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for WordBankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(_) => None,
            Self::Unwritable { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum StatsError {
    Unreadable { path: PathBuf, source: io::Error },
    Unwritable { path: PathBuf, source: io::Error },
    /// A known key carries a value that is not a counter.
    Malformed { path: PathBuf, line: String },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, source } => {
                write!(f, "could not read stats file '{}': {source}", path.display())
            }
            Self::Unwritable { path, source } => {
                write!(f, "could not write stats file '{}': {source}", path.display())
            }
            Self::Malformed { path, line } => {
                write!(f, "stats file '{}' has a bad line '{line}'", path.display())
            }
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } | Self::Unwritable { source, .. } => Some(source),
            Self::Malformed { .. } => None,
        }
    }
}

/// Errors from constructing a [`crate::round::GameRound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    EmptySecret,
    InvalidSecret(String),
    InvalidMissLimit,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "secret word must not be empty"),
            Self::InvalidSecret(word) => {
                write!(f, "secret word '{word}' contains non-alphabetic characters")
            }
            Self::InvalidMissLimit => write!(f, "max incorrect guesses must be at least 1"),
        }
    }
}

impl std::error::Error for RoundError {}

/// Errors from submitting a guess.
///
/// `NotALetter` and `AlreadyGuessed` are user mistakes and call for a re-prompt.
/// `RoundOver` means the caller kept guessing after the round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    NotALetter(String),
    AlreadyGuessed(char),
    RoundOver,
}

impl GuessError {
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::RoundOver)
    }
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotALetter(input) => {
                write!(f, "please enter exactly one letter (like 'A'), got '{input}'")
            }
            Self::AlreadyGuessed(letter) => {
                write!(f, "you already guessed '{letter}', try a new letter")
            }
            Self::RoundOver => write!(f, "the round is already over"),
        }
    }
}

impl std::error::Error for GuessError {}

/// Failures that end a [`crate::session::Session`] run.
#[derive(Debug)]
pub enum SessionError {
    Round(RoundError),
    Guess(GuessError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Round(e) => write!(f, "internal error starting round: {e}"),
            Self::Guess(e) => write!(f, "internal error during round: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Round(e) => Some(e),
            Self::Guess(e) => Some(e),
        }
    }
}

impl From<RoundError> for SessionError {
    fn from(e: RoundError) -> Self {
        Self::Round(e)
    }
}

impl From<GuessError> for SessionError {
    fn from(e: GuessError) -> Self {
        Self::Guess(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_messages() {
        assert!(RejectReason::TooShort.to_string().contains("too short"));
        assert!(
            WordBankError::Rejected(RejectReason::NotAlphabetic)
                .to_string()
                .contains("letters")
        );
    }

    #[test]
    fn test_guess_error_classification() {
        assert!(GuessError::AlreadyGuessed('A').is_user_error());
        assert!(GuessError::NotALetter("12".to_string()).is_user_error());
        assert!(!GuessError::RoundOver.is_user_error());
    }

    #[test]
    fn test_io_errors_expose_source() {
        use std::error::Error;
        let err = StatsError::Unwritable {
            path: PathBuf::from("stats.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("stats.txt"));
    }
}
