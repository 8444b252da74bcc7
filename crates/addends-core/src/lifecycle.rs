//! Disposal contract for objects owning releasable state.

use crate::error::{AddendsError, Result};

/// An object that can release its resources ahead of being dropped.
///
/// Disposal takes `&mut self`, so nothing borrowed from the object can be
/// in use while it tears down. After disposal every public operation fails
/// with [`AddendsError::ObjectDisposed`].
pub trait Dispose {
    /// Name reported by [`AddendsError::ObjectDisposed`].
    const OBJECT_NAME: &'static str;

    /// Releases held resources. Calling it again has no effect.
    fn dispose(&mut self);

    /// Whether [`Dispose::dispose`] has been called.
    fn is_disposed(&self) -> bool;

    /// Fails with `ObjectDisposed` once the object has been disposed.
    fn assert_alive(&self) -> Result<()> {
        if self.is_disposed() {
            Err(AddendsError::object_disposed(Self::OBJECT_NAME))
        } else {
            Ok(())
        }
    }
}
