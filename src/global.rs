//! Process-wide DRBG singleton: one global handle guarded by a mutex.
//!
//! [`Drbg`] itself has no notion of being a singleton; this module is just
//! one particular user of the type, behind a lock, so callers who want
//! their own independent instance are free to construct one directly.

use crate::chain::Chain;
use crate::controller::Drbg;
use crate::core::{CoreId, Mechanism, Primitive};
use crate::errors::{DrbgError, DrbgResult};
use std::sync::{Mutex, OnceLock};

static GLOBAL: OnceLock<Mutex<Option<Drbg>>> = OnceLock::new();

fn cell() -> &'static Mutex<Option<Drbg>> {
    GLOBAL.get_or_init(|| Mutex::new(None))
}

/// Default core used by `init(full = true)`: HMAC-SHA-256, no prediction
/// resistance.
pub const DEFAULT_CORE: CoreId = CoreId::new(Mechanism::Hmac, Primitive::Sha256);

/// Idempotent initialization. `full = false` only ensures the lock cell
/// exists; `full = true` instantiates [`DEFAULT_CORE`] on first call and is
/// a no-op on subsequent calls.
pub fn init(full: bool) -> DrbgResult<()> {
    let mut guard = cell().lock().expect("DRBG global lock poisoned");
    if !full || guard.is_some() {
        return Ok(());
    }
    let drbg = Drbg::new(DEFAULT_CORE, false, Chain::empty())?;
    *guard = Some(drbg);
    Ok(())
}

/// Reinitialize the global DRBG, creating it first via `init(true)` if it
/// does not yet exist. `core_id = None` retains the previously selected
/// core.
pub fn reinit(core_id: Option<CoreId>, pr: bool, pers: Chain<'_>) -> DrbgResult<()> {
    let mut guard = cell().lock().expect("DRBG global lock poisoned");
    match guard.as_mut() {
        Some(drbg) => drbg.reinit(core_id, pr, pers),
        None => {
            let core_id = core_id.unwrap_or(DEFAULT_CORE);
            let drbg = Drbg::new(core_id, pr, pers)?;
            *guard = Some(drbg);
            Ok(())
        }
    }
}

/// Fill `out` with random bytes, auto-initializing the global DRBG on
/// first use and reseeding across a detected fork.
pub fn randomize(out: &mut [u8]) -> DrbgResult<()> {
    randomize_with_addtl(out, Chain::empty())
}

/// As [`randomize`], with caller-supplied additional input mixed into the
/// generate call.
pub fn randomize_with_addtl(out: &mut [u8], addtl: Chain<'_>) -> DrbgResult<()> {
    let mut guard = cell().lock().expect("DRBG global lock poisoned");
    if guard.is_none() {
        *guard = Some(Drbg::new(DEFAULT_CORE, false, Chain::empty())?);
    }
    guard.as_mut().expect("just initialized").generate(out, addtl)
}

/// Reseed the global DRBG using `buf` as additional input, auto-
/// initializing it first if needed.
pub fn add_bytes(buf: &[u8]) -> DrbgResult<()> {
    let mut guard = cell().lock().expect("DRBG global lock poisoned");
    if guard.is_none() {
        *guard = Some(Drbg::new(DEFAULT_CORE, false, Chain::empty())?);
    }
    guard.as_mut().expect("just initialized").add_bytes(buf)
}

/// Forward to the global DRBG's entropy source, if one has been
/// initialized.
pub fn close_fds() {
    let guard = cell().lock().expect("DRBG global lock poisoned");
    if let Some(drbg) = guard.as_ref() {
        drbg.close_fds();
    }
}

/// `true` once the global DRBG has been instantiated.
pub fn is_initialized() -> bool {
    cell().lock().expect("DRBG global lock poisoned").is_some()
}

/// Tear down the global DRBG entirely, as a process might before exit.
pub fn uninstantiate() -> DrbgResult<()> {
    let mut guard = cell().lock().expect("DRBG global lock poisoned");
    if let Some(drbg) = guard.as_mut() {
        drbg.uninstantiate();
    }
    *guard = None;
    Ok(())
}

/// Surfaces callers asking "was this a real error or did I just call
/// randomize before init" distinctly; kept separate from `DrbgError` since
/// it is a usage question, not a cryptographic one.
pub fn require_initialized() -> DrbgResult<()> {
    if is_initialized() {
        Ok(())
    } else {
        Err(DrbgError::GeneralFailure("global DRBG has not been initialized"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single test function: the global singleton is process-wide state,
    // so exercising `uninstantiate`/`randomize`/`reinit` from more than one
    // `#[test]` would race against cargo's parallel test threads.
    #[test]
    fn singleton_lifecycle() {
        let _ = uninstantiate();
        assert!(!is_initialized());

        let mut out = [0u8; 16];
        randomize(&mut out).unwrap();
        assert!(is_initialized());

        reinit(None, false, Chain::empty()).unwrap();
        assert!(is_initialized());

        uninstantiate().unwrap();
        assert!(!is_initialized());
    }
}
