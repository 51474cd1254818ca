//! Hash DRBG (NIST SP 800-90A §10.1.1), including `Hash_df` (§10.4.1).

use super::MechanismOps;
use crate::arith::{add_be, add_one, be_u32, be_u64};
use crate::chain::Chain;
use crate::core::Primitive;
use crate::errors::DrbgResult;
use crate::primitives::{hash_primitive, HashPrimitive};
use crate::state::DrbgState;

pub struct HashMechanism {
    hash: Box<dyn HashPrimitive + Send + Sync>,
}

impl HashMechanism {
    pub fn new(primitive: Primitive) -> Self {
        HashMechanism { hash: hash_primitive(primitive) }
    }

    /// `Hash_df(input_chain, out_len)`, SP 800-90A §10.4.1.
    fn hash_df(&self, input_chain: Chain<'_>, out_len: usize) -> Vec<u8> {
        let block_len = self.hash.digest_len();
        let mut out = Vec::with_capacity(out_len + block_len);
        let mut counter: u8 = 1;
        let out_len_bits = be_u32((out_len as u32).wrapping_mul(8));
        while out.len() < out_len {
            let prefix = [counter];
            let block = self.hash.hash(crate::chain!(
                &prefix[..],
                &out_len_bits[..],
                &input_chain.to_vec()[..]
            ));
            out.extend_from_slice(&block);
            counter = counter.wrapping_add(1);
        }
        out.truncate(out_len);
        out
    }

    fn update(&self, state: &mut DrbgState, seed_chain: Chain<'_>, is_reseed: bool) {
        let state_len = state.core.state_len;
        let v_new = if is_reseed {
            let prefix = [0x01u8];
            self.hash_df(crate::chain!(&prefix[..], &state.v[..], &seed_chain.to_vec()[..]), state_len)
        } else {
            self.hash_df(seed_chain, state_len)
        };
        state.v = zeroize::Zeroizing::new(v_new);
        let prefix0 = [0x00u8];
        let c_new = self.hash_df(crate::chain!(&prefix0[..], &state.v[..]), state_len);
        state.c = zeroize::Zeroizing::new(c_new);
    }
}

impl MechanismOps for HashMechanism {
    fn instantiate(&self, state: &mut DrbgState, seed_chain: Chain<'_>) -> DrbgResult<()> {
        self.update(state, seed_chain, false);
        Ok(())
    }

    fn reseed(&self, state: &mut DrbgState, seed_chain: Chain<'_>) -> DrbgResult<()> {
        self.update(state, seed_chain, true);
        Ok(())
    }

    fn generate(
        &self,
        state: &mut DrbgState,
        out: &mut [u8],
        addtl: Chain<'_>,
    ) -> DrbgResult<()> {
        let block_len = self.hash.digest_len();

        if !addtl.is_empty() {
            let prefix = [0x02u8];
            let w = self.hash.hash(crate::chain!(&prefix[..], &state.v[..], &addtl.to_vec()[..]));
            add_be(&mut state.v, &w);
        }

        // Hashgen: derive output from a running copy of V, leaving V itself
        // untouched for the post-step below.
        let mut data = state.v.to_vec();
        let mut filled = 0;
        while filled < out.len() {
            let block = self.hash.hash(crate::chain!(&data[..]));
            let take = (out.len() - filled).min(block_len);
            out[filled..filled + take].copy_from_slice(&block[..take]);
            filled += take;
            add_one(&mut data);
        }

        let prefix3 = [0x03u8];
        let h = self.hash.hash(crate::chain!(&prefix3[..], &state.v[..]));
        add_be(&mut state.v, &h);
        let c = state.c.to_vec();
        add_be(&mut state.v, &c);
        add_be(&mut state.v, &be_u64(state.reseed_counter));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{lookup, CoreId, Mechanism};
    use crate::state::DrbgState;

    #[test]
    fn instantiate_then_generate_is_deterministic() {
        let core = lookup(CoreId::new(Mechanism::Hash, Primitive::Sha256)).unwrap();
        let mech = HashMechanism::new(Primitive::Sha256);
        let entropy = [0x42u8; 48];

        let mut s1 = DrbgState::new(core);
        mech.instantiate(&mut s1, crate::chain!(&entropy[..])).unwrap();
        let mut out1 = [0u8; 64];
        mech.generate(&mut s1, &mut out1, Chain::empty()).unwrap();

        let mut s2 = DrbgState::new(core);
        mech.instantiate(&mut s2, crate::chain!(&entropy[..])).unwrap();
        let mut out2 = [0u8; 64];
        mech.generate(&mut s2, &mut out2, Chain::empty()).unwrap();

        assert_eq!(out1, out2);
    }

    #[test]
    fn additional_input_changes_output() {
        let core = lookup(CoreId::new(Mechanism::Hash, Primitive::Sha256)).unwrap();
        let mech = HashMechanism::new(Primitive::Sha256);
        let entropy = [0x11u8; 48];

        let mut s1 = DrbgState::new(core);
        mech.instantiate(&mut s1, crate::chain!(&entropy[..])).unwrap();
        let mut out1 = [0u8; 32];
        mech.generate(&mut s1, &mut out1, Chain::empty()).unwrap();

        let mut s2 = DrbgState::new(core);
        mech.instantiate(&mut s2, crate::chain!(&entropy[..])).unwrap();
        let addtl = [0x99u8; 16];
        let mut out2 = [0u8; 32];
        mech.generate(&mut s2, &mut out2, crate::chain!(&addtl[..])).unwrap();

        assert_ne!(out1, out2);
    }

    #[test]
    fn hash_df_truncates_to_requested_length() {
        let mech = HashMechanism::new(Primitive::Sha256);
        let out = mech.hash_df(crate::chain!(&b"seed"[..]), 17);
        assert_eq!(out.len(), 17);
    }
}
