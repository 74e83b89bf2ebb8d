//! Poison recovery for the registry lock
//!
//! A panic inside a settings type's accessor poisons the registry mutex.
//! The entry map is only ever mutated by a single insert, so the data behind
//! a poisoned lock is still consistent and can be reused.

use std::sync::{Mutex, MutexGuard};

/// Extension trait for Mutex with poison recovery
pub(crate) trait MutexExt<T> {
    /// Lock the mutex, recovering from poison errors
    fn lock_recovered(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_recovered(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Registry mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
