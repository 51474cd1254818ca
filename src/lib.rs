//! A Rust implementation of the NIST SP 800-90A deterministic random bit
//! generators: Hash DRBG (§10.1.1), HMAC DRBG (§10.1.2), and CTR DRBG
//! (§10.2.1).
//!
//! Three mechanisms are provided behind a common [`Drbg`] handle, each
//! pluggable with one of several hash or block-cipher primitives (see
//! [`core::CoreId`] for the supported combinations). A process-wide
//! singleton is available through the free functions in this module for
//! callers that want a single shared generator rather than managing their
//! own `Drbg` instance; either way, the entropy source is external
//! (`getrandom`-backed by default, but replaceable by implementing
//! [`entropy::EntropySource`]).
//!
//! # Example
//! ```
//! use sp90a_drbg::{chain, core::{CoreId, Mechanism, Primitive}, Drbg};
//!
//! let mut drbg = Drbg::new(
//!     CoreId::new(Mechanism::Hmac, Primitive::Sha256),
//!     false,
//!     chain!(&b"example personalization string"[..]),
//! ).expect("entropy source should be available");
//!
//! let mut out = [0u8; 32];
//! drbg.generate(&mut out, chain!()).expect("generate should succeed");
//! ```

pub mod arith;
pub mod chain;
pub mod controller;
pub mod core;
pub mod entropy;
pub mod errors;
pub mod global;
pub mod mechanisms;
pub mod primitives;
pub mod selftest;
pub mod state;

pub use chain::Chain;
pub use controller::{Drbg, DrbgStats};
pub use core::{decode_flags, flags, CoreId, CoreParams, Mechanism, Primitive};
pub use entropy::{EntropySource, OsEntropySource, TestHook};
pub use errors::{DrbgError, DrbgResult};

/// Idempotent process-wide initialization.
///
/// `full = false` only prepares the lock cell; `full = true` additionally
/// instantiates [`global::DEFAULT_CORE`] the first time it is called.
pub fn init(full: bool) -> DrbgResult<()> {
    global::init(full)
}

/// Reinitialize the process-wide DRBG. `core_id = None` retains the
/// previously selected core, matching `flags = 0` in the reference
/// implementation's terms.
pub fn reinit(core_id: Option<CoreId>, prediction_resistance: bool, pers: Chain<'_>) -> DrbgResult<()> {
    global::reinit(core_id, prediction_resistance, pers)
}

/// Fill `out` with random bytes from the process-wide DRBG, auto-
/// initializing it on first use.
pub fn randomize(out: &mut [u8]) -> DrbgResult<()> {
    global::randomize(out)
}

/// As [`randomize`], mixing `addtl` into the generate call as additional
/// input.
pub fn randomize_with_addtl(out: &mut [u8], addtl: Chain<'_>) -> DrbgResult<()> {
    global::randomize_with_addtl(out, addtl)
}

/// Reseed the process-wide DRBG using `buf` as additional input, auto-
/// initializing it first if needed.
pub fn add_bytes(buf: &[u8]) -> DrbgResult<()> {
    global::add_bytes(buf)
}

/// Forward to the process-wide DRBG's entropy source, if initialized.
pub fn close_fds() {
    global::close_fds()
}

/// Run the known-answer test suite and sanity checks against the
/// compiled-in mechanisms.
pub fn selftest() -> DrbgResult<()> {
    selftest::run()
}

impl rand_core::RngCore for Drbg {
    /// # Panics
    /// Panics if `generate` fails — an exhausted or failing entropy source,
    /// most plausibly under fork-triggered reseeding. Matches the contract
    /// `RngCore` implementations in this ecosystem (e.g. `OsRng`) already
    /// carry: the trait itself has no fallible path.
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.generate(&mut bytes, Chain::empty()).expect("DRBG generate should not fail");
        u32::from_le_bytes(bytes)
    }

    /// # Panics
    /// See [`Self::next_u32`].
    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.generate(&mut bytes, Chain::empty()).expect("DRBG generate should not fail");
        u64::from_le_bytes(bytes)
    }

    /// # Panics
    /// See [`Self::next_u32`].
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        if dst.is_empty() {
            return;
        }
        self.generate(dst, Chain::empty()).expect("DRBG generate should not fail");
    }
}
