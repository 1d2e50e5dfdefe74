//! Generic shared config store.
//!
//! `ConfigStore<T>` wraps `Arc<RwLock<T>>` so a reload can swap a whole
//! section while handlers keep reading it.

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

/// A shared, replaceable configuration value.
pub struct ConfigStore<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> ConfigStore<T> {
    /// Create a new `ConfigStore` with the given initial value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the stored value.
    pub async fn update(&self, value: T) {
        *self.inner.write().await = value;
    }

    /// Read the current value.
    pub async fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().await
    }
}

impl<T: Clone> ConfigStore<T> {
    /// Clone the current value out of the lock.
    pub async fn snapshot(&self) -> T {
        self.inner.read().await.clone()
    }
}

impl<T> Clone for ConfigStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
