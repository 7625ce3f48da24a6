use thiserror::Error;

/// Why a scoring command was rejected. Every variant is recoverable: the
/// match is left exactly as it was before the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("unknown or unavailable player: {name}")]
    InvalidReference { name: String },

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("invalid run value: {0}")]
    InvalidRunValue(String),

    #[error("innings is closed — no more deliveries")]
    InningsClosed,

    #[error("match already complete")]
    MatchAlreadyComplete,

    #[error("match not started")]
    MatchNotStarted,

    #[error("innings already finalized")]
    AlreadyFinalized,

    #[error("invalid match setup: {0}")]
    InvalidSetup(String),
}

impl ScoringError {
    pub(crate) fn unknown_player(name: &str) -> Self {
        Self::InvalidReference { name: name.to_string() }
    }

    /// Bad input the scorer can correct and resubmit, as opposed to a
    /// command that is out of place in the match lifecycle.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidReference { .. }
                | Self::UnknownTeam(_)
                | Self::InvalidRunValue(_)
                | Self::InvalidSetup(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
