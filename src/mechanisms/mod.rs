//! The three SP 800-90A mechanism implementations, behind a common
//! capability trait the controller drives without caring which one is
//! selected.

pub mod ctr;
pub mod hash;
pub mod hmac;

use crate::chain::Chain;
use crate::errors::DrbgResult;
use crate::state::DrbgState;

/// Update/generate operations for one mechanism, dispatched by the
/// controller through `state.core.id.mechanism`.
pub trait MechanismOps: Send + Sync {
    /// Seed the state from scratch (`update` with `is_reseed = false` /
    /// `reseed_code = 0`).
    fn instantiate(&self, state: &mut DrbgState, seed_chain: Chain<'_>) -> DrbgResult<()>;

    /// Mix fresh seed material into already-seeded state (`update` with
    /// `is_reseed = true` / `reseed_code = 1`).
    fn reseed(&self, state: &mut DrbgState, seed_chain: Chain<'_>) -> DrbgResult<()>;

    /// Produce `out.len()` pseudo-random bytes, optionally mixing in
    /// `addtl`.
    fn generate(
        &self,
        state: &mut DrbgState,
        out: &mut [u8],
        addtl: Chain<'_>,
    ) -> DrbgResult<()>;
}

/// Build the mechanism implementation for a core, boxed behind
/// [`MechanismOps`].
pub fn build(id: crate::core::CoreId) -> Box<dyn MechanismOps> {
    use crate::core::Mechanism::*;
    match id.mechanism {
        Hash => Box::new(hash::HashMechanism::new(id.primitive)),
        Hmac => Box::new(hmac::HmacMechanism::new(id.primitive)),
        Ctr => Box::new(ctr::CtrMechanism::new(id.primitive)),
    }
}
