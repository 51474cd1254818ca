//! Configuration registry: the static table of supported `(mechanism,
//! primitive)` cores and their fixed parameters, plus the flag encoding
//! used to select one.

use crate::errors::DrbgError;

/// One of the three SP 800-90A mechanisms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mechanism {
    Hash,
    Hmac,
    Ctr,
}

/// Underlying hash or block cipher primitive a core is built on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Primitive {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Aes128,
    Aes192,
    Aes256,
}

/// A `(mechanism, primitive)` pair identifying one supported core.
/// Prediction resistance is handled separately — it toggles independently
/// of which core is selected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CoreId {
    pub mechanism: Mechanism,
    pub primitive: Primitive,
}

impl CoreId {
    pub const fn new(mechanism: Mechanism, primitive: Primitive) -> Self {
        CoreId { mechanism, primitive }
    }
}

/// Fixed per-algorithm parameters, immutable once a core is selected.
#[derive(Clone, Copy, Debug)]
pub struct CoreParams {
    pub id: CoreId,
    /// Size in bytes of the `V`/`C` state buffers.
    pub state_len: usize,
    /// Digest size for Hash/HMAC, 16 (AES block size) for CTR.
    pub block_len: usize,
    /// Security strength in bytes, used to size entropy requests.
    pub security_strength: usize,
}

impl CoreParams {
    /// CTR-only: key length implied by `state_len - block_len`. Zero for
    /// Hash/HMAC, where the full `state_len` is the running value, not a
    /// key/counter split.
    pub const fn key_len(&self) -> usize {
        match self.id.mechanism {
            Mechanism::Ctr => self.state_len - self.block_len,
            Mechanism::Hash | Mechanism::Hmac => 0,
        }
    }
}

macro_rules! core_row {
    ($mechanism:expr, $primitive:expr, $state_len:expr, $block_len:expr, $strength:expr) => {
        CoreParams {
            id: CoreId::new($mechanism, $primitive),
            state_len: $state_len,
            block_len: $block_len,
            security_strength: $strength,
        }
    };
}

/// Every supported `(mechanism, primitive)` combination, in declaration
/// order. Lookup is first-match on `(mechanism, primitive)`, mirroring the
/// reference table's flag-masking walk.
pub static CORES: &[CoreParams] = &[
    core_row!(Mechanism::Hash, Primitive::Sha1, 55, 20, 16),
    core_row!(Mechanism::Hash, Primitive::Sha256, 55, 32, 32),
    core_row!(Mechanism::Hash, Primitive::Sha384, 111, 48, 32),
    core_row!(Mechanism::Hash, Primitive::Sha512, 111, 64, 32),
    core_row!(Mechanism::Hmac, Primitive::Sha1, 20, 20, 16),
    core_row!(Mechanism::Hmac, Primitive::Sha256, 32, 32, 32),
    core_row!(Mechanism::Hmac, Primitive::Sha384, 48, 48, 32),
    core_row!(Mechanism::Hmac, Primitive::Sha512, 64, 64, 32),
    core_row!(Mechanism::Ctr, Primitive::Aes128, 32, 16, 16),
    core_row!(Mechanism::Ctr, Primitive::Aes192, 40, 16, 24),
    core_row!(Mechanism::Ctr, Primitive::Aes256, 48, 16, 32),
];

/// Look up the parameters for a core, first match in declaration order.
pub fn lookup(id: CoreId) -> Result<&'static CoreParams, DrbgError> {
    CORES
        .iter()
        .find(|c| c.id == id)
        .ok_or(DrbgError::InvalidArgument("unknown (mechanism, primitive) combination"))
}

/// Flag bits for [`crate::controller::Drbg::reinit`]: one mechanism bit,
/// one primitive bit, optionally the prediction-resistance bit. Plain
/// constants rather than a typed bitflags wrapper, since a decoded flag
/// word is only ever consumed once, at `reinit`/`decode_flags` time.
/// `flags = 0` is reserved by the controller to mean "keep the previously
/// selected core".
pub mod flags {
    pub const HASH: u32 = 0x0001;
    pub const HMAC: u32 = 0x0002;
    pub const CTR: u32 = 0x0004;
    pub const SHA1: u32 = 0x0010;
    pub const SHA256: u32 = 0x0020;
    pub const SHA384: u32 = 0x0040;
    pub const SHA512: u32 = 0x0080;
    pub const AES128: u32 = 0x0100;
    pub const AES192: u32 = 0x0200;
    pub const AES256: u32 = 0x0400;
    pub const PREDICTION_RESISTANCE: u32 = 0x1000;
}

/// Decode a non-zero flag word into a `(CoreId, prediction_resistance)`
/// pair. `flags = 0` is the caller's responsibility to special-case.
pub fn decode_flags(bits: u32) -> Result<(CoreId, bool), DrbgError> {
    let mechanism = if bits & flags::HASH != 0 {
        Mechanism::Hash
    } else if bits & flags::HMAC != 0 {
        Mechanism::Hmac
    } else if bits & flags::CTR != 0 {
        Mechanism::Ctr
    } else {
        return Err(DrbgError::InvalidArgument("flags select no mechanism"));
    };

    let primitive = if bits & flags::SHA1 != 0 {
        Primitive::Sha1
    } else if bits & flags::SHA256 != 0 {
        Primitive::Sha256
    } else if bits & flags::SHA384 != 0 {
        Primitive::Sha384
    } else if bits & flags::SHA512 != 0 {
        Primitive::Sha512
    } else if bits & flags::AES128 != 0 {
        Primitive::Aes128
    } else if bits & flags::AES192 != 0 {
        Primitive::Aes192
    } else if bits & flags::AES256 != 0 {
        Primitive::Aes256
    } else {
        return Err(DrbgError::InvalidArgument("flags select no primitive"));
    };

    Ok((CoreId::new(mechanism, primitive), bits & flags::PREDICTION_RESISTANCE != 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_len_is_zero_outside_ctr() {
        let p = lookup(CoreId::new(Mechanism::Hmac, Primitive::Sha256)).unwrap();
        assert_eq!(p.key_len(), 0);
    }

    #[test]
    fn ctr_key_len_matches_state_minus_block() {
        let p = lookup(CoreId::new(Mechanism::Ctr, Primitive::Aes256)).unwrap();
        assert_eq!(p.key_len(), 32);
        assert_eq!(p.block_len, 16);
        assert_eq!(p.state_len, 48);
    }

    #[test]
    fn unknown_combination_is_rejected() {
        // Hash mechanism paired with an AES primitive does not exist in the
        // table.
        let id = CoreId::new(Mechanism::Hash, Primitive::Aes128);
        assert!(lookup(id).is_err());
    }

    #[test]
    fn decode_flags_extracts_mechanism_primitive_and_pr() {
        let bits = flags::CTR | flags::AES192 | flags::PREDICTION_RESISTANCE;
        let (id, pr) = decode_flags(bits).unwrap();
        assert_eq!(id.mechanism, Mechanism::Ctr);
        assert_eq!(id.primitive, Primitive::Aes192);
        assert!(pr);
    }

    #[test]
    fn decode_flags_rejects_missing_mechanism() {
        assert!(decode_flags(flags::SHA256).is_err());
    }

    #[test]
    fn all_cores_satisfy_state_len_ge_block_len() {
        for core in CORES {
            assert!(core.state_len >= core.block_len);
        }
    }
}
