use crate::storage::results::ResultStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session `{0}` does not exist")]
    NotFound(String),
    #[error("no saved progress to resume for session `{0}`")]
    NothingToResume(String),
    #[error("a session needs at least one round")]
    NoRounds,
    #[error("invalid guess: {0}")]
    InvalidGuess(&'static str),
    #[error("the current round was already guessed")]
    AlreadyGuessed,
    #[error("the current round has not been guessed yet")]
    NotGuessedYet,
    #[error("the session is already finished")]
    AlreadyFinished,
    #[error("the session is not finished yet")]
    NotFinished,
    #[error(transparent)]
    Persistence(#[from] ResultStoreError),
}
