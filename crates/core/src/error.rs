use crate::lifecycle::SampleStatus;
use crate::policy::Role;

/// Structural errors raised outside the validators.
///
/// Validators report problems with form data through [`crate::FieldErrors`] and never
/// return this type.
#[derive(Debug, thiserror::Error)]
pub enum LimsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid payload at {path}: {message}")]
    InvalidPayload { path: String, message: String },

    #[error("transition from '{from}' to '{to}' is not part of the sample lifecycle")]
    InvalidTransition { from: SampleStatus, to: SampleStatus },
    #[error("role '{role}' may not move a sample from '{from}' to '{to}'")]
    TransitionNotPermitted {
        role: Role,
        from: SampleStatus,
        to: SampleStatus,
    },
    #[error("sample is in terminal status '{0}'")]
    TerminalStatus(SampleStatus),
    #[error("role '{0}' may not register samples")]
    IntakeNotPermitted(Role),
}

pub type LimsResult<T> = std::result::Result<T, LimsError>;
