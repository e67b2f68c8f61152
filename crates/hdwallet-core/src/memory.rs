//! Secret memory types for entropy, seeds and private keys.
//!
//! This module provides wrappers that:
//! - Zero memory on drop via [`zeroize`]
//! - Lock pages in RAM via `mlock` so secrets are not swapped out
//! - Mask output in `Debug`/`Display`

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ErrorDetail, WalletError};

// ---------------------------------------------------------------------------
// Platform-specific memory locking
// ---------------------------------------------------------------------------

/// RAII guard that unlocks memory on drop.
///
/// Locking is best-effort: if `mlock` is refused (quota, privileges) the
/// region simply stays unlocked and a single warning is logged.
pub struct LockedRegion {
    ptr: *const u8,
    len: usize,
    locked: bool,
}

// SAFETY: the guard never dereferences its pointer; it only passes the
// range back to munlock. The bytes belong to the owning secret type.
unsafe impl Send for LockedRegion {}
unsafe impl Sync for LockedRegion {}

impl LockedRegion {
    /// Lock `len` bytes at `ptr`. Callers guarantee the pointer outlives
    /// the guard.
    #[must_use]
    pub(crate) fn try_lock(ptr: *const u8, len: usize) -> Self {
        let locked = platform::set_locked(ptr, len, true);
        if !locked && len > 0 {
            static WARNED: std::sync::Once = std::sync::Once::new();
            WARNED.call_once(|| {
                tracing::warn!(
                    "mlock failed, secret wallet material may be swapped to disk \
                     (consider raising RLIMIT_MEMLOCK)"
                );
            });
        }
        Self { ptr, len, locked }
    }

    const fn unlocked() -> Self {
        Self {
            ptr: std::ptr::null(),
            len: 0,
            locked: false,
        }
    }

    /// Returns `true` if the memory region is currently locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Drop for LockedRegion {
    fn drop(&mut self) {
        if self.locked {
            platform::set_locked(self.ptr, self.len, false);
        }
    }
}

// ---------------------------------------------------------------------------
// SecretBuffer
// ---------------------------------------------------------------------------

/// Variable-length secret: entropy, seeds, stretched keys.
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
    lock: LockedRegion,
}

impl SecretBuffer {
    /// Copy `data` into a new locked allocation.
    ///
    /// The caller should zeroize its own copy afterwards.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        let inner: SecretSlice<u8> = data.to_vec().into();
        let exposed = inner.expose_secret();
        let lock = LockedRegion::try_lock(exposed.as_ptr(), exposed.len());
        Self { inner, lock }
    }

    /// A buffer of `len` bytes from the operating system CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Entropy` if the OS random source fails.
    pub fn random(len: usize) -> Result<Self, WalletError> {
        let mut bytes = vec![0u8; len];
        OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
            WalletError::Entropy(ErrorDetail::msg(format!("CSPRNG fill failed: {e}")))
        })?;
        let result = Self::new(&bytes);
        bytes.zeroize();
        Ok(result)
    }

    /// Expose the underlying bytes. Keep the borrow short.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Number of bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the underlying memory is `mlock`'d.
    #[must_use]
    pub const fn is_mlocked(&self) -> bool {
        self.lock.is_locked()
    }
}

impl Clone for SecretBuffer {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for SecretBuffer {
    fn eq(&self, other: &Self) -> bool {
        ring::constant_time::verify_slices_are_equal(self.expose(), other.expose()).is_ok()
    }
}

impl Eq for SecretBuffer {}

impl From<Vec<u8>> for SecretBuffer {
    fn from(mut data: Vec<u8>) -> Self {
        let buffer = Self::new(&data);
        data.zeroize();
        buffer
    }
}

const MASK: &str = "SecretBuffer(***)";

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// SecretBytes<N>
// ---------------------------------------------------------------------------

/// Fixed-size secret: ed25519 seeds (32) and Kholaw extended keys (64).
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    bytes: [u8; N],
    #[zeroize(skip)]
    lock: LockedRegion,
}

impl<const N: usize> SecretBytes<N> {
    /// Move `data` into a new secret.
    ///
    /// The lock covers the address at construction time; once the value
    /// moves, `munlock` on the stale address is a harmless no-op and
    /// zeroize-on-drop still applies.
    #[must_use]
    pub fn new(data: [u8; N]) -> Self {
        let mut s = Self {
            bytes: data,
            lock: LockedRegion::unlocked(),
        };
        s.lock = LockedRegion::try_lock(s.bytes.as_ptr(), N);
        s
    }

    /// Build from a slice of exactly `N` bytes.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` if the slice has the wrong length.
    pub fn from_slice(data: &[u8]) -> Result<Self, WalletError> {
        let bytes: [u8; N] = data.try_into().map_err(|_| {
            WalletError::PrivateKey(ErrorDetail::mismatch(
                "invalid secret length",
                N,
                data.len(),
            ))
        })?;
        Ok(Self::new(bytes))
    }

    /// Expose the underlying bytes for cryptographic operations.
    #[must_use]
    pub const fn expose(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> Clone for SecretBytes<N> {
    fn clone(&self) -> Self {
        Self::new(self.bytes)
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        ring::constant_time::verify_slices_are_equal(&self.bytes, &other.bytes).is_ok()
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>(***)")
    }
}

impl<const N: usize> fmt::Display for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<const N: usize> From<[u8; N]> for SecretBytes<N> {
    fn from(data: [u8; N]) -> Self {
        Self::new(data)
    }
}

// ---------------------------------------------------------------------------
// Page locking
// ---------------------------------------------------------------------------

#[cfg(unix)]
mod platform {
    /// `mlock` (or `munlock` when `lock` is false) the range; an empty
    /// range counts as locked.
    pub(super) fn set_locked(ptr: *const u8, len: usize, lock: bool) -> bool {
        if len == 0 {
            return true;
        }
        // SAFETY: both calls only inspect the address range and report
        // invalid ranges through their return value.
        let status = unsafe {
            if lock {
                libc::mlock(ptr.cast(), len)
            } else {
                libc::munlock(ptr.cast(), len)
            }
        };
        status == 0
    }
}

#[cfg(not(unix))]
mod platform {
    pub(super) const fn set_locked(_ptr: *const u8, _len: usize, _lock: bool) -> bool {
        false
    }
}
