//! RAII guard for environment variables touched by tests.
//!
//! Config and draft lookups read `AGORA_*` variables, so tests that set them
//! must restore the previous value even when they panic. Tests using the
//! guard must still be `#[serial]`: the environment is process-global.

use std::env;
use std::ffi::{OsStr, OsString};

pub struct EnvGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvGuard {
    /// Snapshot `key` and set it to `value`.
    ///
    /// # Safety
    /// Calls `std::env::set_var`, which races with other threads reading the
    /// environment. Only use from `#[serial]` tests.
    pub unsafe fn set(key: &str, value: impl AsRef<OsStr>) -> Self {
        let original = env::var_os(key);
        unsafe { env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Snapshot `key` and remove it.
    ///
    /// # Safety
    /// Same constraints as [`EnvGuard::set`].
    pub unsafe fn remove(key: &str) -> Self {
        let original = env::var_os(key);
        unsafe { env::remove_var(key) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: guards are only created from #[serial] tests.
        match &self.original {
            Some(val) => unsafe { env::set_var(&self.key, val) },
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_restores_missing_var() {
        let key = "AGORA_TEST_GUARD_MISSING";
        unsafe { env::remove_var(key) };
        {
            let _guard = unsafe { EnvGuard::set(key, "temporary") };
            assert_eq!(env::var(key).unwrap(), "temporary");
        }
        assert!(env::var_os(key).is_none());
    }

    #[test]
    #[serial]
    fn test_env_guard_restores_previous_value() {
        let key = "AGORA_TEST_GUARD_EXISTING";
        unsafe { env::set_var(key, "before") };
        {
            let _guard = unsafe { EnvGuard::remove(key) };
            assert!(env::var_os(key).is_none());
        }
        assert_eq!(env::var(key).unwrap(), "before");
        unsafe { env::remove_var(key) };
    }
}
