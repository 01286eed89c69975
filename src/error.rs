/// Errors surfaced synchronously to callers of the scheduler and its models.
///
/// Every variant is a caller error: the call that produced it left all state untouched.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HapticError {
    #[error("pattern must contain at least one interval")]
    EmptyPattern,
    #[error("pattern interval at index {0} is zero; durations must be positive")]
    ZeroInterval(usize),
    #[error("invalid duration {0} ms: must be finite and non-negative")]
    InvalidDuration(f64),
    #[error("unsupported intensity `{0}` (expected `high` or `low`)")]
    UnsupportedIntensity(String),
    #[error("no pattern named `{0}` in the library")]
    UnknownPattern(String),
}

pub type Result<T> = std::result::Result<T, HapticError>;
