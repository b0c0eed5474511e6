// In-memory engine double for driving the dispatch surface. A test double,
// not a storage engine: values live in a typed map, nothing persists.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use keelstone_bridge::engine::{Engine, InitOptions, Store, StoreOptions};
use keelstone_bridge::error::{Error, ErrorKind};

pub const ENGINE_VERSION: &str = "7.2.1";

#[derive(Clone, Debug, PartialEq)]
pub enum Stored {
    Bool(bool),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    StrList(Vec<String>),
}

#[derive(Default)]
pub struct StoreState {
    pub entries: Mutex<HashMap<String, (Stored, Option<u32>)>>,
    pub synced: Mutex<Vec<bool>>,
    pub trimmed: Mutex<bool>,
    pub closed: Mutex<bool>,
}

impl StoreState {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Stored, Option<u32>)>> {
        self.entries.lock().unwrap()
    }

    pub fn expire_of(&self, key: &str) -> Option<Option<u32>> {
        self.lock().get(key).map(|(_, expire)| *expire)
    }
}

pub struct MemStore {
    state: Arc<StoreState>,
}

fn ensure_open(state: &StoreState) -> Result<(), Error> {
    if *state.closed.lock().unwrap() {
        return Err(Error::new(ErrorKind::Usage).with_message("store is closed"));
    }
    Ok(())
}

macro_rules! typed_pair {
    ($set:ident, $get:ident, $native:ty, $variant:ident) => {
        fn $set(&self, key: &str, value: $native, expire: Option<u32>) -> Result<(), Error> {
            ensure_open(&self.state)?;
            self.state
                .lock()
                .insert(key.to_string(), (Stored::$variant(value), expire));
            Ok(())
        }

        fn $get(&self, key: &str) -> Result<Option<$native>, Error> {
            ensure_open(&self.state)?;
            match self.state.lock().get(key) {
                Some((Stored::$variant(value), _)) => Ok(Some(value.clone())),
                _ => Ok(None),
            }
        }
    };
}

impl Store for MemStore {
    typed_pair!(set_bool, get_bool, bool, Bool);
    typed_pair!(set_i32, get_i32, i32, I32);
    typed_pair!(set_u32, get_u32, u32, U32);
    typed_pair!(set_i64, get_i64, i64, I64);
    typed_pair!(set_u64, get_u64, u64, U64);
    typed_pair!(set_f64, get_f64, f64, F64);

    fn set_string(&self, key: &str, value: &str, expire: Option<u32>) -> Result<(), Error> {
        ensure_open(&self.state)?;
        self.state
            .lock()
            .insert(key.to_string(), (Stored::Str(value.to_string()), expire));
        Ok(())
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, Error> {
        ensure_open(&self.state)?;
        match self.state.lock().get(key) {
            Some((Stored::Str(value), _)) => Ok(Some(value.clone())),
            _ => Ok(None),
        }
    }

    fn set_bytes(&self, key: &str, value: &[u8], expire: Option<u32>) -> Result<(), Error> {
        ensure_open(&self.state)?;
        self.state
            .lock()
            .insert(key.to_string(), (Stored::Bytes(value.to_vec()), expire));
        Ok(())
    }

    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        ensure_open(&self.state)?;
        match self.state.lock().get(key) {
            Some((Stored::Bytes(value), _)) => Ok(Some(value.clone())),
            _ => Ok(None),
        }
    }

    fn set_string_list(
        &self,
        key: &str,
        values: &[String],
        expire: Option<u32>,
    ) -> Result<(), Error> {
        ensure_open(&self.state)?;
        self.state
            .lock()
            .insert(key.to_string(), (Stored::StrList(values.to_vec()), expire));
        Ok(())
    }

    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, Error> {
        ensure_open(&self.state)?;
        match self.state.lock().get(key) {
            Some((Stored::StrList(values), _)) => Ok(Some(values.clone())),
            _ => Ok(None),
        }
    }

    fn contains(&self, key: &str) -> Result<bool, Error> {
        ensure_open(&self.state)?;
        Ok(self.state.lock().contains_key(key))
    }

    fn remove(&self, key: &str) -> Result<bool, Error> {
        ensure_open(&self.state)?;
        Ok(self.state.lock().remove(key).is_some())
    }

    fn remove_many(&self, keys: &[String]) -> Result<(), Error> {
        ensure_open(&self.state)?;
        let mut entries = self.state.lock();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, Error> {
        ensure_open(&self.state)?;
        let mut keys: Vec<String> = self.state.lock().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn count(&self) -> Result<u64, Error> {
        ensure_open(&self.state)?;
        Ok(self.state.lock().len() as u64)
    }

    fn total_size(&self) -> Result<u64, Error> {
        ensure_open(&self.state)?;
        let entries = self.state.lock();
        let mut size = 0u64;
        for (key, (stored, _)) in entries.iter() {
            size += key.len() as u64;
            size += match stored {
                Stored::Bool(_) => 1,
                Stored::I32(_) | Stored::U32(_) | Stored::F64(_) => 8,
                Stored::I64(_) | Stored::U64(_) => 8,
                Stored::Str(s) => s.len() as u64,
                Stored::Bytes(b) => b.len() as u64,
                Stored::StrList(values) => values.iter().map(|v| v.len() as u64).sum(),
            };
        }
        Ok(size)
    }

    fn clear_all(&self) -> Result<(), Error> {
        ensure_open(&self.state)?;
        self.state.lock().clear();
        Ok(())
    }

    fn sync(&self, flush: bool) -> Result<(), Error> {
        ensure_open(&self.state)?;
        self.state.synced.lock().unwrap().push(flush);
        Ok(())
    }

    fn trim(&self) -> Result<(), Error> {
        ensure_open(&self.state)?;
        *self.state.trimmed.lock().unwrap() = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        *self.state.closed.lock().unwrap() = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct EngineState {
    pub init_calls: Mutex<Vec<InitOptions>>,
    pub opened: Mutex<Vec<(Option<String>, StoreOptions)>>,
    pub stores: Mutex<Vec<Arc<StoreState>>>,
}

pub struct MemEngine {
    state: Arc<EngineState>,
    reject_crypt: bool,
}

impl MemEngine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(EngineState::default()),
            reject_crypt: false,
        }
    }

    /// Engine double that refuses keyed opens, for the fallback path.
    pub fn rejecting_crypt() -> Self {
        Self {
            state: Arc::new(EngineState::default()),
            reject_crypt: true,
        }
    }

    /// Shared view for assertions after the engine is boxed away.
    pub fn probe(&self) -> Arc<EngineState> {
        self.state.clone()
    }

    fn make_store(&self, id: Option<&str>, options: &StoreOptions) -> Result<Box<dyn Store>, Error> {
        if self.reject_crypt && options.crypt_key.is_some() {
            return Err(Error::new(ErrorKind::Permission).with_message("bad encryption key"));
        }
        let state = Arc::new(StoreState::default());
        self.state.stores.lock().unwrap().push(state.clone());
        self.state
            .opened
            .lock()
            .unwrap()
            .push((id.map(str::to_string), options.clone()));
        Ok(Box::new(MemStore { state }))
    }
}

impl Engine for MemEngine {
    fn initialize(&self, options: &InitOptions) -> Result<String, Error> {
        self.state.init_calls.lock().unwrap().push(options.clone());
        Ok(options.root_dir.clone())
    }

    fn version(&self) -> Result<String, Error> {
        Ok(ENGINE_VERSION.to_string())
    }

    fn open_default(&self, options: &StoreOptions) -> Result<Box<dyn Store>, Error> {
        self.make_store(None, options)
    }

    fn open(&self, id: &str, options: &StoreOptions) -> Result<Box<dyn Store>, Error> {
        self.make_store(Some(id), options)
    }
}
