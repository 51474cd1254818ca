//! Error taxonomy for the DRBG: `INVALID_ARGUMENT`, `OUT_OF_MEMORY`,
//! `GENERAL_FAILURE`, and `SELFTEST_FAILED`. Success is plain `Result::Ok`.
//!
//! No variant carries secret material, only static descriptions, so error
//! values are always safe to log or display.

use thiserror::Error;

/// Error conditions reported by DRBG operations.
///
/// `Ok` is represented by `Result::Ok` throughout this crate; this enum only
/// covers the failure taxonomy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DrbgError {
    /// A null buffer, a zero length where non-zero is required, a length
    /// exceeding an SP 800-90A cap, or an unknown flag combination.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Secure-memory allocation failed.
    #[error("out of memory")]
    OutOfMemory,
    /// The entropy source or an underlying primitive reported a fatal
    /// error.
    #[error("general failure: {0}")]
    GeneralFailure(&'static str),
    /// A known-answer vector or sanity check did not match during
    /// self-test.
    #[error("self-test failed: {0}")]
    SelfTestFailed(&'static str),
}

/// Result alias used throughout the crate.
pub type DrbgResult<T> = Result<T, DrbgError>;
