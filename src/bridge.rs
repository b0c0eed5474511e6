//! Purpose: Hold the bridge's only state: the wrapped engine and open stores.
//! Exports: `Bridge`.
//! Role: Shared context threaded through every dispatch handler.
//! Invariants: All storage behavior stays behind the `Engine`/`Store` traits.
//! Invariants: Store access goes through the handle registry; no raw pointers.

use std::sync::{Mutex, MutexGuard, OnceLock};

use tracing::info;

use crate::engine::{Engine, InitOptions, Store, StoreOptions};
use crate::error::Error;
use crate::logging;
use crate::registry::{Handle, Registry};

pub struct Bridge {
    engine: Box<dyn Engine>,
    registry: Mutex<Registry>,
    root_dir: OnceLock<String>,
}

impl Bridge {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            registry: Mutex::new(Registry::new()),
            root_dir: OnceLock::new(),
        }
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Engine root dir recorded by the last successful `initialize`.
    pub fn root_dir(&self) -> Option<&str> {
        self.root_dir.get().map(String::as_str)
    }

    /// One-time setup: wire logging to the host-chosen level, then hand the
    /// directories to the engine. Repeat calls reach the engine again (it
    /// treats re-initialization as a no-op) but keep the first root dir.
    pub fn initialize(&self, options: &InitOptions) -> Result<String, Error> {
        logging::init(options.log_level);
        let root_dir = self.engine.initialize(options)?;
        info!(
            root_dir = %root_dir,
            cache_dir = %options.cache_dir,
            log_level = ?options.log_level,
            "engine initialized"
        );
        let _ = self.root_dir.set(root_dir.clone());
        Ok(root_dir)
    }

    pub fn open_default(&self, options: &StoreOptions) -> Result<Handle, Error> {
        let store = self.engine.open_default(options)?;
        Ok(self.lock().insert(store))
    }

    pub fn open(&self, id: &str, options: &StoreOptions) -> Result<Handle, Error> {
        let store = self.engine.open(id, options)?;
        Ok(self.lock().insert(store))
    }

    pub fn with_store<T>(
        &self,
        handle: Handle,
        f: impl FnOnce(&dyn Store) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let registry = self.lock();
        f(registry.get(handle)?)
    }

    /// Detach the store from the registry and let the engine close it.
    pub fn close(&self, handle: Handle) -> Result<(), Error> {
        let mut store = self.lock().remove(handle)?;
        store.close()
    }

    pub fn open_store_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
