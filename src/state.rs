//! Mutable per-instance DRBG state.

use crate::core::CoreParams;
use crate::entropy::TestHook;
use zeroize::Zeroizing;

/// The mutable working state of one DRBG instance.
///
/// For Hash/HMAC, `v` and `c` are the running seed value and the derived
/// constant/key respectively. For CTR, `v` holds the running counter
/// (`block_len` bytes) and `c` holds the current key (`key_len` bytes).
pub struct DrbgState {
    pub core: &'static CoreParams,
    pub v: Zeroizing<Vec<u8>>,
    pub c: Zeroizing<Vec<u8>>,
    pub reseed_counter: u64,
    pub seeded: bool,
    pub prediction_resistance: bool,
    /// Process id captured at seed time, for fork detection.
    pub seed_init_owner: u32,
    /// CTR mechanism only: DF output from a pre-generate `update` (reseed
    /// code 2), preserved for reuse by the matching post-generate `update`
    /// (reseed code 3).
    pub ctr_df_data: Option<Zeroizing<Vec<u8>>>,
    pub test_hook: Option<TestHook>,
}

impl DrbgState {
    /// An unseeded, zeroed state for `core`.
    pub fn new(core: &'static CoreParams) -> Self {
        DrbgState {
            core,
            v: Zeroizing::new(vec![0u8; core.state_len]),
            c: Zeroizing::new(vec![0u8; core.state_len]),
            reseed_counter: 0,
            seeded: false,
            prediction_resistance: false,
            seed_init_owner: 0,
            ctr_df_data: None,
            test_hook: None,
        }
    }

    /// Wipe every secret field and mark the state unseeded, as
    /// `uninstantiate` requires.
    pub fn wipe(&mut self) {
        self.v.iter_mut().for_each(|b| *b = 0);
        self.c.iter_mut().for_each(|b| *b = 0);
        self.ctr_df_data = None;
        self.reseed_counter = 0;
        self.seeded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{lookup, CoreId, Mechanism, Primitive};

    #[test]
    fn wipe_zeroes_v_and_c_and_resets_counters() {
        let core = lookup(CoreId::new(Mechanism::Hmac, Primitive::Sha256)).unwrap();
        let mut s = DrbgState::new(core);
        s.v.iter_mut().for_each(|b| *b = 0xAA);
        s.c.iter_mut().for_each(|b| *b = 0xBB);
        s.reseed_counter = 5;
        s.seeded = true;
        s.wipe();
        assert!(s.v.iter().all(|&b| b == 0));
        assert!(s.c.iter().all(|&b| b == 0));
        assert_eq!(s.reseed_counter, 0);
        assert!(!s.seeded);
    }
}
