//! Typed errors for the queue, the identity provider and the check-in desk.
//!
//! Every variant is recoverable: the desk reports it to the user and keeps going.

/// Errors raised by the triage queue and by priority parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("patient `{patient_id}` already has a pending request")]
    DuplicateRequest { patient_id: String },
    #[error("invalid priority {0}: must be 1 (Critical), 2 (Urgent) or 3 (Regular)")]
    InvalidPriority(i64),
    #[error("unknown priority `{0}`: use 1-3 or critical, urgent, regular")]
    UnknownPriority(String),
    #[error("patient `{patient_id}` has no pending request")]
    NotFound { patient_id: String },
}

/// Errors raised while registering or authenticating accounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("id must be at least {min} characters long")]
    IdTooShort { min: usize },
    #[error("id `{0}` is already registered")]
    IdTaken(String),
    #[error("user `{0}` not found")]
    UnknownUser(String),
    #[error("wrong password")]
    WrongPassword,
}

/// Errors raised by the check-in desk itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeskError {
    #[error("please log in first")]
    NotLoggedIn,
    #[error("already logged in as `{0}`; log out first")]
    AlreadyLoggedIn(String),
    #[error("only {0} may do that")]
    Forbidden(&'static str),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command `{0}`; type `help`")]
    UnknownCommand(String),
}
