// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod round;
pub mod session;
pub mod stats;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::GameConfig;
pub use error::{GuessError, RejectReason, RoundError, SessionError, StatsError, WordBankError};
pub use round::{GameRound, GuessKind, GuessResult, RoundState};
pub use session::{GameInterface, Session};
pub use stats::{Outcome, StatsRecord, StatsStore};
pub use wordbank::{append_word, load_wordbank, load_wordbank_from_file, load_wordbank_from_str};
