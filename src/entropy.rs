//! Entropy gate: requests bytes from an external entropy source, propagates
//! failures, and honors test-mode injection.
//!
//! A forced-failure test hook short-circuits before the source is touched,
//! a canned-entropy test hook is used instead of the source entirely, and
//! otherwise the source is asked to fill the buffer exactly.

use crate::errors::DrbgError;

/// External entropy collaborator: it is requested `n` bytes and returns
/// them, it does not implement collection. Its quality is outside this
/// crate's own correctness — the DRBG's security depends on what it
/// supplies, but the DRBG does not second-guess it.
pub trait EntropySource {
    /// Fill `out` completely with fresh entropy, or fail.
    fn fill(&self, out: &mut [u8]) -> Result<(), DrbgError>;

    /// Forwarded by `Drbg::close_fds`. No-op by default; a source backed by
    /// a file descriptor (e.g. `/dev/random`) may override this.
    fn close(&self) {}
}

/// Default entropy source, backed by the operating system RNG via the
/// `getrandom` crate — the same crate `rand_core::OsRng` is built on.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropySource;

impl EntropySource for OsEntropySource {
    fn fill(&self, out: &mut [u8]) -> Result<(), DrbgError> {
        getrandom::getrandom(out).map_err(|_| {
            DrbgError::GeneralFailure("entropy source returned a fatal error")
        })
    }
}

/// Test-mode injection hook.
///
/// Present on a DRBG instance only during known-answer testing; `None` in
/// ordinary operation. A known-answer vector typically stages a distinct
/// entropy buffer ahead of each `instantiate`/`reseed` call (initial
/// entropy, then one buffer per forced reseed under prediction
/// resistance), so the hook holds a queue consumed front-to-back rather
/// than one buffer replayed forever.
#[derive(Clone, Debug, Default)]
pub struct TestHook {
    /// Buffers consumed one per `get_entropy` call, each expected to equal
    /// the requested length exactly. Empty once exhausted.
    pub testentropy: std::collections::VecDeque<Vec<u8>>,
    /// When `true`, `get_entropy` fails immediately without touching the
    /// configured [`EntropySource`] or `testentropy`.
    pub fail_seed_source: bool,
}

impl TestHook {
    /// A hook that supplies `entropy` for exactly one call.
    pub fn with_entropy(entropy: impl Into<Vec<u8>>) -> Self {
        let mut testentropy = std::collections::VecDeque::new();
        testentropy.push_back(entropy.into());
        TestHook { testentropy, fail_seed_source: false }
    }

    /// A hook that supplies each buffer in `entropies`, in order, one per
    /// `get_entropy` call.
    pub fn with_entropy_sequence(entropies: impl IntoIterator<Item = Vec<u8>>) -> Self {
        TestHook {
            testentropy: entropies.into_iter().collect(),
            fail_seed_source: false,
        }
    }

    /// A hook that forces every `get_entropy` call to fail.
    pub fn failing() -> Self {
        TestHook { testentropy: Default::default(), fail_seed_source: true }
    }
}

/// Request exactly `out.len()` bytes of entropy, honoring a test hook if
/// present.
///
/// The gate loops until `out` is completely filled or the source reports a
/// fatal error, and truncates a source that over-delivers by tracking
/// filled length against the target.
pub fn get_entropy(
    source: &dyn EntropySource,
    hook: Option<&mut TestHook>,
    out: &mut [u8],
) -> Result<(), DrbgError> {
    if let Some(hook) = hook {
        if hook.fail_seed_source {
            return Err(DrbgError::GeneralFailure(
                "entropy source forced to fail by test hook",
            ));
        }
        if let Some(testentropy) = hook.testentropy.pop_front() {
            if testentropy.len() != out.len() {
                return Err(DrbgError::GeneralFailure(
                    "queued test entropy buffer does not match requested length",
                ));
            }
            out.copy_from_slice(&testentropy);
            return Ok(());
        }
        return Err(DrbgError::GeneralFailure("test entropy queue exhausted"));
    }
    source.fill(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_hook_short_circuits() {
        let mut hook = TestHook::failing();
        let mut out = [0u8; 8];
        assert!(get_entropy(&OsEntropySource, Some(&mut hook), &mut out).is_err());
    }

    #[test]
    fn test_entropy_is_consumed_once_per_call() {
        let mut hook = TestHook::with_entropy_sequence([vec![0xABu8; 5], vec![0xCDu8; 5]]);
        let mut out = [0u8; 5];
        get_entropy(&OsEntropySource, Some(&mut hook), &mut out).unwrap();
        assert_eq!(out, [0xAB; 5]);
        get_entropy(&OsEntropySource, Some(&mut hook), &mut out).unwrap();
        assert_eq!(out, [0xCD; 5]);
        assert!(get_entropy(&OsEntropySource, Some(&mut hook), &mut out).is_err());
    }

    #[test]
    fn mismatched_length_is_rejected() {
        let mut hook = TestHook::with_entropy(vec![0xAB, 0xCD]);
        let mut out = [0u8; 5];
        assert!(get_entropy(&OsEntropySource, Some(&mut hook), &mut out).is_err());
    }

    #[test]
    fn os_source_fills_requested_length() {
        let mut out = [0u8; 32];
        get_entropy(&OsEntropySource, None, &mut out).unwrap();
        // Overwhelmingly unlikely to be all zero if entropy was pulled.
        assert!(out.iter().any(|&b| b != 0));
    }
}
