//! Purpose: Define the seam between the bridge and the wrapped engine.
//! Exports: `Engine`, `Store`, open/init option types, `LogLevel`, `OpenMode`.
//! Role: Stable boundary for the addon's C ABI client and the test double.
//! Invariants: The bridge owns no storage behavior; everything behind these
//! traits belongs to the engine.

use crate::error::{Error, ErrorKind};

/// Engine log levels, numbered as the host passes them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Off = 4,
}

impl LogLevel {
    pub fn from_raw(raw: i32) -> Result<Self, Error> {
        match raw {
            0 => Ok(LogLevel::Debug),
            1 => Ok(LogLevel::Info),
            2 => Ok(LogLevel::Warn),
            3 => Ok(LogLevel::Error),
            4 => Ok(LogLevel::Off),
            other => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown log level {other}; expected 0..=4"))),
        }
    }
}

/// Process-scope open modes understood by the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum OpenMode {
    SingleProcess = 1,
    MultiProcess = 2,
}

impl OpenMode {
    pub fn from_raw(raw: i32) -> Result<Self, Error> {
        match raw {
            1 => Ok(OpenMode::SingleProcess),
            2 => Ok(OpenMode::MultiProcess),
            other => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown open mode {other}; expected 1 or 2"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct InitOptions {
    pub root_dir: String,
    pub cache_dir: String,
    pub log_level: LogLevel,
}

#[derive(Clone, Debug, Default)]
pub struct StoreOptions {
    pub mode: Option<OpenMode>,
    pub crypt_key: Option<String>,
    pub root_path: Option<String>,
}

impl StoreOptions {
    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_crypt_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.is_empty() {
            self.crypt_key = Some(key);
        }
        self
    }

    pub fn with_root_path(mut self, path: impl Into<String>) -> Self {
        self.root_path = Some(path.into());
        self
    }
}

/// Engine-wide operations. Object-safe so the bridge can hold any engine.
pub trait Engine: Send + Sync {
    /// One-time engine setup. Returns the engine's resolved root directory.
    fn initialize(&self, options: &InitOptions) -> Result<String, Error>;

    fn version(&self) -> Result<String, Error>;

    fn open_default(&self, options: &StoreOptions) -> Result<Box<dyn Store>, Error>;

    fn open(&self, id: &str, options: &StoreOptions) -> Result<Box<dyn Store>, Error>;
}

/// One open engine instance. Gets return `None` when the key is absent;
/// defaults are the caller's concern.
pub trait Store: Send {
    fn set_bool(&self, key: &str, value: bool, expire: Option<u32>) -> Result<(), Error>;
    fn get_bool(&self, key: &str) -> Result<Option<bool>, Error>;

    fn set_i32(&self, key: &str, value: i32, expire: Option<u32>) -> Result<(), Error>;
    fn get_i32(&self, key: &str) -> Result<Option<i32>, Error>;

    fn set_u32(&self, key: &str, value: u32, expire: Option<u32>) -> Result<(), Error>;
    fn get_u32(&self, key: &str) -> Result<Option<u32>, Error>;

    fn set_i64(&self, key: &str, value: i64, expire: Option<u32>) -> Result<(), Error>;
    fn get_i64(&self, key: &str) -> Result<Option<i64>, Error>;

    fn set_u64(&self, key: &str, value: u64, expire: Option<u32>) -> Result<(), Error>;
    fn get_u64(&self, key: &str) -> Result<Option<u64>, Error>;

    fn set_f64(&self, key: &str, value: f64, expire: Option<u32>) -> Result<(), Error>;
    fn get_f64(&self, key: &str) -> Result<Option<f64>, Error>;

    fn set_string(&self, key: &str, value: &str, expire: Option<u32>) -> Result<(), Error>;
    fn get_string(&self, key: &str) -> Result<Option<String>, Error>;

    fn set_bytes(&self, key: &str, value: &[u8], expire: Option<u32>) -> Result<(), Error>;
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    fn set_string_list(&self, key: &str, values: &[String], expire: Option<u32>)
    -> Result<(), Error>;
    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, Error>;

    fn contains(&self, key: &str) -> Result<bool, Error>;

    /// Returns whether a value existed.
    fn remove(&self, key: &str) -> Result<bool, Error>;

    fn remove_many(&self, keys: &[String]) -> Result<(), Error>;

    fn keys(&self) -> Result<Vec<String>, Error>;

    fn count(&self) -> Result<u64, Error>;

    fn total_size(&self) -> Result<u64, Error>;

    fn clear_all(&self) -> Result<(), Error>;

    /// `flush` selects a synchronous flush over an asynchronous one.
    fn sync(&self, flush: bool) -> Result<(), Error>;

    fn trim(&self) -> Result<(), Error>;

    fn close(&mut self) -> Result<(), Error>;
}
