//! HMAC DRBG (NIST SP 800-90A §10.1.2).

use super::MechanismOps;
use crate::chain::Chain;
use crate::core::Primitive;
use crate::errors::DrbgResult;
use crate::primitives::{hmac_primitive, HmacPrimitive};
use crate::state::DrbgState;

pub struct HmacMechanism {
    hmac: Box<dyn HmacPrimitive + Send + Sync>,
}

impl HmacMechanism {
    pub fn new(primitive: Primitive) -> Self {
        HmacMechanism { hmac: hmac_primitive(primitive) }
    }

    /// Two-round K/V refresh; the second round collapses when `seed_chain`
    /// is empty.
    fn update(&self, state: &mut DrbgState, seed_chain: Chain<'_>) {
        let zero = [0x00u8];
        let one = [0x01u8];

        let k = self.hmac.mac(
            &state.c,
            crate::chain!(&state.v[..], &zero[..], &seed_chain.to_vec()[..]),
        );
        state.c = zeroize::Zeroizing::new(k);
        let v = self.hmac.mac(&state.c, crate::chain!(&state.v[..]));
        state.v = zeroize::Zeroizing::new(v);

        if seed_chain.is_empty() {
            return;
        }

        let k = self.hmac.mac(
            &state.c,
            crate::chain!(&state.v[..], &one[..], &seed_chain.to_vec()[..]),
        );
        state.c = zeroize::Zeroizing::new(k);
        let v = self.hmac.mac(&state.c, crate::chain!(&state.v[..]));
        state.v = zeroize::Zeroizing::new(v);
    }
}

impl MechanismOps for HmacMechanism {
    fn instantiate(&self, state: &mut DrbgState, seed_chain: Chain<'_>) -> DrbgResult<()> {
        // V starts all-0x01, K all-zero, per SP 800-90A §10.1.2.3.
        state.v.iter_mut().for_each(|b| *b = 0x01);
        state.c.iter_mut().for_each(|b| *b = 0x00);
        self.update(state, seed_chain);
        Ok(())
    }

    fn reseed(&self, state: &mut DrbgState, seed_chain: Chain<'_>) -> DrbgResult<()> {
        self.update(state, seed_chain);
        Ok(())
    }

    fn generate(
        &self,
        state: &mut DrbgState,
        out: &mut [u8],
        addtl: Chain<'_>,
    ) -> DrbgResult<()> {
        if !addtl.is_empty() {
            self.update(state, addtl);
        }

        let block_len = self.hmac.mac_len();
        let mut filled = 0;
        while filled < out.len() {
            let v = self.hmac.mac(&state.c, crate::chain!(&state.v[..]));
            state.v = zeroize::Zeroizing::new(v);
            let take = (out.len() - filled).min(block_len);
            out[filled..filled + take].copy_from_slice(&state.v[..take]);
            filled += take;
        }

        self.update(state, addtl);
        Ok(())
    }
}
