//! The generic DRBG controller: instantiate, reseed, generate,
//! uninstantiate, reinit, and the request-chunking / fork-safety /
//! reseed-counter-overflow policy layered on top of the mechanism
//! implementations.

use crate::chain::Chain;
use crate::core::{lookup, CoreId, CoreParams};
use crate::entropy::{get_entropy, EntropySource, OsEntropySource, TestHook};
use crate::errors::{DrbgError, DrbgResult};
use crate::mechanisms::{self, MechanismOps};
use crate::state::DrbgState;
use log::{debug, warn};
use zeroize::Zeroizing;

/// A single SP 800-90A `generate` request is capped at this many bytes;
/// larger requests are served by chunking (§4.7).
pub const MAX_REQUEST_BYTES: usize = 1 << 16;

/// Upper bound on additional-input / personalization length.
pub const MAX_ADDTL_BYTES: u64 = 1 << 35;

/// Reseed counter ceiling; exceeding it forces a reseed before the next
/// generate.
pub const MAX_REQUESTS: u64 = 1 << 48;

/// One DRBG instance: mechanism, state, and entropy source. Not
/// `Sync`/`Clone` by design — callers needing shared access wrap it in a
/// lock (see [`crate::global`] for the process-wide singleton).
pub struct Drbg {
    mechanism: Box<dyn MechanismOps>,
    state: DrbgState,
    entropy_source: Box<dyn EntropySource + Send + Sync>,
}

impl Drbg {
    /// Instantiate a fresh DRBG for `core_id`, drawing entropy from the
    /// default OS source.
    pub fn new(
        core_id: CoreId,
        prediction_resistance: bool,
        pers: Chain<'_>,
    ) -> DrbgResult<Self> {
        Self::new_with_source(core_id, prediction_resistance, pers, Box::new(OsEntropySource))
    }

    /// Instantiate with an explicit entropy source, used by self-tests to
    /// inject a [`TestHook`]-bearing source or a genuinely custom one.
    pub fn new_with_source(
        core_id: CoreId,
        prediction_resistance: bool,
        pers: Chain<'_>,
        entropy_source: Box<dyn EntropySource + Send + Sync>,
    ) -> DrbgResult<Self> {
        let core: &'static CoreParams = lookup(core_id)?;
        validate_addtl(pers)?;

        let mut drbg = Drbg {
            mechanism: mechanisms::build(core_id),
            state: DrbgState::new(core),
            entropy_source,
        };
        drbg.state.prediction_resistance = prediction_resistance;

        if let Err(e) = drbg.seed(pers, false) {
            // Rollback: leave no partially-initialized secret state behind.
            drbg.state.wipe();
            return Err(e);
        }
        Ok(drbg)
    }

    /// Instantiate with a [`TestHook`] already installed, so the very first
    /// seed draws from `hook` rather than the OS entropy source. Used by
    /// the known-answer test harness ([`crate::selftest`]), where the CAVS
    /// procedure stages entropy *before* instantiation.
    pub fn new_with_test_hook(
        core_id: CoreId,
        prediction_resistance: bool,
        pers: Chain<'_>,
        hook: TestHook,
    ) -> DrbgResult<Self> {
        let core: &'static CoreParams = lookup(core_id)?;
        validate_addtl(pers)?;

        let mut drbg = Drbg {
            mechanism: mechanisms::build(core_id),
            state: DrbgState::new(core),
            entropy_source: Box::new(OsEntropySource),
        };
        drbg.state.prediction_resistance = prediction_resistance;
        drbg.state.test_hook = Some(hook);

        if let Err(e) = drbg.seed(pers, false) {
            drbg.state.wipe();
            return Err(e);
        }
        Ok(drbg)
    }

    /// Attach a test hook (canned entropy or forced failure) for
    /// known-answer testing. Only meaningful before the next seed/reseed.
    pub fn set_test_hook(&mut self, hook: Option<TestHook>) {
        self.state.test_hook = hook;
    }

    fn seed(&mut self, input: Chain<'_>, is_reseed: bool) -> DrbgResult<()> {
        let strength = self.state.core.security_strength;
        let entropy_len = if is_reseed {
            strength
        } else {
            strength.saturating_mul(3).div_ceil(2)
        };

        let mut entropy = Zeroizing::new(vec![0u8; entropy_len]);
        get_entropy(
            self.entropy_source.as_ref(),
            self.state.test_hook.as_mut(),
            &mut entropy,
        )?;

        let seed_chain = crate::chain!(&entropy[..], &input.to_vec()[..]);
        if is_reseed {
            self.mechanism.reseed(&mut self.state, seed_chain)?;
        } else {
            self.mechanism.instantiate(&mut self.state, seed_chain)?;
        }
        self.state.seeded = true;
        self.state.reseed_counter = 1;
        self.state.seed_init_owner = std::process::id();
        Ok(())
    }

    /// Mix fresh seed material into an already-instantiated DRBG.
    pub fn reseed(&mut self, addtl: Chain<'_>) -> DrbgResult<()> {
        validate_addtl(addtl)?;
        self.seed(addtl, true)
    }

    /// Reseed using caller-supplied bytes as additional input; entropy is
    /// still drawn from the configured source.
    pub fn add_bytes(&mut self, buf: &[u8]) -> DrbgResult<()> {
        self.reseed(crate::chain!(buf))
    }

    /// Produce `out.len()` bytes, transparently chunking requests larger
    /// than [`MAX_REQUEST_BYTES`]. Each chunk is a fresh SP 800-90A
    /// request and advances the reseed counter.
    pub fn generate(&mut self, out: &mut [u8], addtl: Chain<'_>) -> DrbgResult<()> {
        if out.is_empty() {
            return Err(DrbgError::InvalidArgument("requested output length is zero"));
        }
        validate_addtl(addtl)?;
        self.check_fork()?;

        let mut offset = 0;
        let mut first = true;
        while offset < out.len() {
            let take = (out.len() - offset).min(MAX_REQUEST_BYTES);
            // Only the first chunk receives the caller's additional input;
            // subsequent chunks are fresh SP 800-90A requests with no
            // additional input of their own.
            let chunk_addtl = if first { addtl } else { Chain::empty() };
            self.generate_one(&mut out[offset..offset + take], chunk_addtl)?;
            offset += take;
            first = false;
        }
        Ok(())
    }

    fn generate_one(&mut self, out: &mut [u8], addtl: Chain<'_>) -> DrbgResult<()> {
        if self.state.reseed_counter > MAX_REQUESTS {
            warn!("reseed counter exceeded limit, forcing reseed before generate");
            self.state.seeded = false;
        }

        let mut addtl_for_mechanism = addtl;
        if self.state.prediction_resistance || !self.state.seeded {
            self.seed(addtl, true)?;
            addtl_for_mechanism = Chain::empty();
        }

        self.mechanism.generate(&mut self.state, out, addtl_for_mechanism)?;
        self.state.reseed_counter += 1;
        Ok(())
    }

    fn check_fork(&mut self) -> DrbgResult<()> {
        let current = std::process::id();
        if self.state.seeded && current != self.state.seed_init_owner {
            debug!("process identity changed since seeding, reseeding before generate");
            self.seed(Chain::empty(), true)?;
        }
        Ok(())
    }

    /// Reinitialize completely: destroy state and perform a fresh
    /// `instantiate`. `core_id = None` retains the previously selected
    /// core (equivalent to a zero flag word at the control surface).
    pub fn reinit(
        &mut self,
        core_id: Option<CoreId>,
        prediction_resistance: bool,
        pers: Chain<'_>,
    ) -> DrbgResult<()> {
        let core: &'static CoreParams = match core_id {
            Some(id) => lookup(id)?,
            None => self.state.core,
        };
        validate_addtl(pers)?;

        let mechanism = mechanisms::build(core.id);
        let mut new_state = DrbgState::new(core);
        new_state.prediction_resistance = prediction_resistance;
        new_state.test_hook = self.state.test_hook.take();

        self.state.wipe();
        self.mechanism = mechanism;
        self.state = new_state;

        if let Err(e) = self.seed(pers, false) {
            self.state.wipe();
            return Err(e);
        }
        Ok(())
    }

    /// Destroy all secret state. `seeded` becomes `false`,
    /// `reseed_counter` becomes `0`, and every byte of `V`/`C`/scratch is
    /// zero afterward.
    pub fn uninstantiate(&mut self) {
        self.state.wipe();
    }

    /// Forward to the configured entropy source.
    pub fn close_fds(&self) {
        self.entropy_source.close();
    }

    pub fn is_seeded(&self) -> bool {
        self.state.seeded
    }

    pub fn reseed_counter(&self) -> u64 {
        self.state.reseed_counter
    }

    pub fn core_id(&self) -> CoreId {
        self.state.core.id
    }

    /// Always `false`. Callers use this to confirm they are not linked
    /// against a degraded-entropy test build; this crate never substitutes
    /// a faked generator globally.
    pub fn is_faked(&self) -> bool {
        false
    }

    /// Read-only snapshot of the instance's operational state.
    pub fn stats(&self) -> DrbgStats {
        DrbgStats {
            reseed_counter: self.state.reseed_counter,
            seeded: self.state.seeded,
            prediction_resistance: self.state.prediction_resistance,
            core_id: self.state.core.id,
        }
    }
}

/// Snapshot returned by [`Drbg::stats`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrbgStats {
    pub reseed_counter: u64,
    pub seeded: bool,
    pub prediction_resistance: bool,
    pub core_id: CoreId,
}

fn validate_addtl(chain: Chain<'_>) -> DrbgResult<()> {
    if chain.total_len() as u64 > MAX_ADDTL_BYTES {
        return Err(DrbgError::InvalidArgument(
            "additional input or personalization string exceeds the maximum length",
        ));
    }
    Ok(())
}

pub use crate::core::{decode_flags, flags};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CoreId, Mechanism, Primitive};
    use crate::entropy::TestHook;

    fn fixed_entropy_drbg(entropy: Vec<u8>) -> Drbg {
        let core_id = CoreId::new(Mechanism::Hmac, Primitive::Sha256);
        let mut drbg = Drbg {
            mechanism: mechanisms::build(core_id),
            state: DrbgState::new(lookup(core_id).unwrap()),
            entropy_source: Box::new(crate::entropy::OsEntropySource),
        };
        drbg.set_test_hook(Some(TestHook::with_entropy(entropy)));
        drbg.seed(Chain::empty(), false).unwrap();
        drbg
    }

    #[test]
    fn determinism_across_two_instances_with_same_test_entropy() {
        let mut a = fixed_entropy_drbg(vec![0x5Au8; 48]);
        let mut b = fixed_entropy_drbg(vec![0x5Au8; 48]);

        let mut out_a = [0u8; 96];
        let mut out_b = [0u8; 96];
        a.generate(&mut out_a, Chain::empty()).unwrap();
        b.generate(&mut out_b, Chain::empty()).unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn generate_rejects_empty_output() {
        let mut d = fixed_entropy_drbg(vec![0x01u8; 48]);
        let mut out: [u8; 0] = [];
        assert!(d.generate(&mut out, Chain::empty()).is_err());
    }

    #[test]
    fn uninstantiate_zeroes_state_and_clears_seeded() {
        let mut d = fixed_entropy_drbg(vec![0x01u8; 48]);
        d.uninstantiate();
        assert!(!d.is_seeded());
        assert_eq!(d.reseed_counter(), 0);
        assert!(d.state.v.iter().all(|&b| b == 0));
        assert!(d.state.c.iter().all(|&b| b == 0));
    }

    #[test]
    fn long_request_chunks_and_advances_reseed_counter_per_chunk() {
        let mut d = fixed_entropy_drbg(vec![0x22u8; 48]);
        let before = d.reseed_counter();
        let mut out = vec![0u8; MAX_REQUEST_BYTES + 1];
        d.generate(&mut out, Chain::empty()).unwrap();
        assert_eq!(d.reseed_counter(), before + 2);
    }

    #[test]
    fn reinit_with_none_retains_previous_core() {
        let mut d = fixed_entropy_drbg(vec![0x33u8; 48]);
        let before = d.core_id();
        d.set_test_hook(Some(TestHook::with_entropy(vec![0x44u8; 48])));
        d.reinit(None, false, Chain::empty()).unwrap();
        assert_eq!(d.core_id(), before);
    }

    #[test]
    fn empty_addtl_passes_the_length_cap() {
        assert!(validate_addtl(Chain::empty()).is_ok());
    }

    #[test]
    fn fork_detection_reseeds_and_diverges_output() {
        let mut a = fixed_entropy_drbg(vec![0x5Bu8; 48]);
        let mut b = fixed_entropy_drbg(vec![0x5Bu8; 48]);

        // Without a simulated fork, both instances still agree.
        let mut out_a = [0u8; 32];
        let mut out_b = [0u8; 32];
        a.generate(&mut out_a, Chain::empty()).unwrap();
        b.generate(&mut out_b, Chain::empty()).unwrap();
        assert_eq!(out_a, out_b);

        // Simulate `b` waking up in a forked child: a different pid, plus
        // fresh entropy for the reseed the fork check triggers.
        b.state.seed_init_owner = b.state.seed_init_owner.wrapping_add(1);
        b.set_test_hook(Some(TestHook::with_entropy(vec![0x6Cu8; 32])));

        let mut out_a2 = [0u8; 32];
        let mut out_b2 = [0u8; 32];
        a.generate(&mut out_a2, Chain::empty()).unwrap();
        b.generate(&mut out_b2, Chain::empty()).unwrap();
        assert_ne!(out_a2, out_b2);
    }

    #[test]
    fn failing_entropy_source_on_fork_reseed_surfaces_general_failure() {
        let mut d = fixed_entropy_drbg(vec![0x10u8; 48]);
        d.state.seed_init_owner = d.state.seed_init_owner.wrapping_add(1);
        d.set_test_hook(Some(TestHook::failing()));

        let mut out = [0u8; 16];
        let err = d.generate(&mut out, Chain::empty()).unwrap_err();
        assert!(matches!(err, DrbgError::GeneralFailure(_)));
        assert!(out.iter().all(|&b| b == 0));
    }
}
