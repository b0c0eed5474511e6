// Handle table mapping host-visible u64 handles to open stores.
//
// The host addresses stores by opaque integers. Handles are allocated
// monotonically from 1 and never reused, so a stale handle fails closed
// instead of resolving to a different store.

use std::collections::HashMap;

use crate::engine::Store;
use crate::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(u64);

impl Handle {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Handle(raw)
    }
}

pub struct Registry {
    next: u64,
    stores: HashMap<u64, Box<dyn Store>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next: 1,
            stores: HashMap::new(),
        }
    }

    pub fn insert(&mut self, store: Box<dyn Store>) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        self.stores.insert(handle.raw(), store);
        handle
    }

    pub fn get(&self, handle: Handle) -> Result<&dyn Store, Error> {
        self.stores
            .get(&handle.raw())
            .map(|store| store.as_ref())
            .ok_or_else(|| unknown_handle(handle))
    }

    pub fn remove(&mut self, handle: Handle) -> Result<Box<dyn Store>, Error> {
        self.stores
            .remove(&handle.raw())
            .ok_or_else(|| unknown_handle(handle))
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

fn unknown_handle(handle: Handle) -> Error {
    Error::new(ErrorKind::Usage).with_message(format!("unknown store handle {}", handle.raw()))
}

#[cfg(test)]
mod tests {
    use super::{Handle, Registry};
    use crate::engine::Store;
    use crate::error::{Error, ErrorKind};

    struct NullStore;

    impl Store for NullStore {
        fn set_bool(&self, _: &str, _: bool, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_bool(&self, _: &str) -> Result<Option<bool>, Error> {
            Ok(None)
        }
        fn set_i32(&self, _: &str, _: i32, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_i32(&self, _: &str) -> Result<Option<i32>, Error> {
            Ok(None)
        }
        fn set_u32(&self, _: &str, _: u32, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_u32(&self, _: &str) -> Result<Option<u32>, Error> {
            Ok(None)
        }
        fn set_i64(&self, _: &str, _: i64, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_i64(&self, _: &str) -> Result<Option<i64>, Error> {
            Ok(None)
        }
        fn set_u64(&self, _: &str, _: u64, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_u64(&self, _: &str) -> Result<Option<u64>, Error> {
            Ok(None)
        }
        fn set_f64(&self, _: &str, _: f64, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_f64(&self, _: &str) -> Result<Option<f64>, Error> {
            Ok(None)
        }
        fn set_string(&self, _: &str, _: &str, _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_string(&self, _: &str) -> Result<Option<String>, Error> {
            Ok(None)
        }
        fn set_bytes(&self, _: &str, _: &[u8], _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_bytes(&self, _: &str) -> Result<Option<Vec<u8>>, Error> {
            Ok(None)
        }
        fn set_string_list(&self, _: &str, _: &[String], _: Option<u32>) -> Result<(), Error> {
            Ok(())
        }
        fn get_string_list(&self, _: &str) -> Result<Option<Vec<String>>, Error> {
            Ok(None)
        }
        fn contains(&self, _: &str) -> Result<bool, Error> {
            Ok(false)
        }
        fn remove(&self, _: &str) -> Result<bool, Error> {
            Ok(false)
        }
        fn remove_many(&self, _: &[String]) -> Result<(), Error> {
            Ok(())
        }
        fn keys(&self) -> Result<Vec<String>, Error> {
            Ok(Vec::new())
        }
        fn count(&self) -> Result<u64, Error> {
            Ok(0)
        }
        fn total_size(&self) -> Result<u64, Error> {
            Ok(0)
        }
        fn clear_all(&self) -> Result<(), Error> {
            Ok(())
        }
        fn sync(&self, _: bool) -> Result<(), Error> {
            Ok(())
        }
        fn trim(&self) -> Result<(), Error> {
            Ok(())
        }
        fn close(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn handles_start_at_one_and_never_repeat() {
        let mut registry = Registry::new();
        let first = registry.insert(Box::new(NullStore));
        let second = registry.insert(Box::new(NullStore));
        assert_eq!(first.raw(), 1);
        assert_eq!(second.raw(), 2);

        registry.remove(first).unwrap();
        let third = registry.insert(Box::new(NullStore));
        assert_eq!(third.raw(), 3);
    }

    #[test]
    fn unknown_handle_is_a_usage_error() {
        let registry = Registry::new();
        let err = registry.get(Handle::from_raw(42)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.message().unwrap().contains("42"));
    }

    #[test]
    fn remove_empties_the_table() {
        let mut registry = Registry::new();
        let handle = registry.insert(Box::new(NullStore));
        assert_eq!(registry.len(), 1);
        registry.remove(handle).unwrap();
        assert!(registry.is_empty());
        assert!(registry.get(handle).is_err());
    }
}
