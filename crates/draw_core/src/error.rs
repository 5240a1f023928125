use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Duplicate team: {0}")]
    DuplicateTeam(String),

    #[error("Team {team} has pot {pot}, expected 1..={pots}")]
    PotOutOfRange { team: String, pot: u8, pots: u8 },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Could not complete draw in {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl DrawError {
    /// Whether running the same roster again (with fresh randomness) may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DrawError::Exhausted { .. })
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
