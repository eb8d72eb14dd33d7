//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped, removing the variable if it
//! was previously absent. Guards for the same key stack and unwind in LIFO
//! order.
//!
//! Resolution tests usually need several variables pinned at once, so the
//! common entry point is [`isolate`], which clears a set of keys and holds
//! the lock until the returned [`EnvScope`] is dropped.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Applies `mutator` to `key` with the lock held and records the prior value.
fn mutate_locked<F>(
    key: String,
    mutator: F,
    _guard: &ReentrantMutexGuard<'static, ()>,
) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

fn write(key: &str, value: &OsStr) {
    // SAFETY: callers hold `ENV_MUTEX`.
    unsafe { env::set_var(key, value) };
}

fn clear(key: &str) {
    // SAFETY: callers hold `ENV_MUTEX`.
    unsafe { env::remove_var(key) };
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        match self.original.take() {
            Some(value) => write(&self.key, &value),
            None => clear(&self.key),
        }
    }
}

/// RAII guard that serialises environment access for its lifetime.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let lock = env::lock();
/// let _port = lock.set_var("PORT", "8080");
/// ```
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets an environment variable while holding the global lock.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        mutate_locked(key.into(), |k| write(k, value.as_ref()), &self.guard)
    }

    /// Removes an environment variable while holding the global lock.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        mutate_locked(key.into(), clear, &self.guard)
    }
}

/// RAII scope that holds the environment lock while retaining guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    lock: EnvVarLock,
}

impl EnvScope {
    /// Sets `key` for the remainder of the scope.
    pub fn set_var<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let guard = self.lock.set_var(key, value);
        self.guards.push(guard);
    }

    /// Removes `key` for the remainder of the scope.
    pub fn remove_var<K>(&mut self, key: K)
    where
        K: Into<String>,
    {
        let guard = self.lock.remove_var(key);
        self.guards.push(guard);
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Unwind newest first so stacked guards for one key restore correctly.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::set_var("FOO", "bar");
/// assert!(matches!(std::env::var("FOO"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::remove_var("FOO");
/// assert!(std::env::var("FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Acquire the global environment lock for the lifetime of the guard.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Clears every key in `keys` and holds the lock until the scope drops.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let mut scope = env::isolate(["PORT", "PORT_FILE"]);
/// scope.set_var("PORT", "9000");
/// assert_eq!(std::env::var("PORT").ok().as_deref(), Some("9000"));
/// drop(scope);
/// ```
pub fn isolate<I, K>(keys: I) -> EnvScope
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    let lock = lock();
    let guards = keys.into_iter().map(|key| lock.remove_var(key)).collect();
    EnvScope { guards, lock }
}

/// Run a closure while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}
