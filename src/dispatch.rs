//! Purpose: Define the host-visible function table and its handlers.
//! Exports: `Export`, `EXPORTS`, `find`, `invoke`.
//! Role: The dispatch half of the bridge; addons register `EXPORTS` at module load.
//! Invariants: Handlers marshal and delegate; storage behavior stays in the engine.
//! Invariants: Missing trailing arguments arrive as `Undefined` (host padding rules).

use crate::bridge::Bridge;
use crate::convert;
use crate::engine::{InitOptions, LogLevel, OpenMode, StoreOptions};
use crate::error::{Error, ErrorKind};
use crate::registry::Handle;
use crate::value::Value;

pub type HostFn = fn(&Bridge, &[Value]) -> Result<Value, Error>;

pub struct Export {
    pub name: &'static str,
    pub arity: usize,
    pub func: HostFn,
}

/// The host-visible surface. Addons walk this table at module load; nothing
/// is callable from the host that is not listed here.
pub const EXPORTS: &[Export] = &[
    Export { name: "initialize", arity: 3, func: initialize },
    Export { name: "version", arity: 0, func: version },
    Export { name: "getDefaultStore", arity: 2, func: get_default_store },
    Export { name: "getStoreWithId", arity: 4, func: get_store_with_id },
    Export { name: "encodeBool", arity: 4, func: encode_bool },
    Export { name: "decodeBool", arity: 3, func: decode_bool },
    Export { name: "encodeInt32", arity: 4, func: encode_i32 },
    Export { name: "decodeInt32", arity: 3, func: decode_i32 },
    Export { name: "encodeUInt32", arity: 4, func: encode_u32 },
    Export { name: "decodeUInt32", arity: 3, func: decode_u32 },
    Export { name: "encodeInt64", arity: 4, func: encode_i64 },
    Export { name: "decodeInt64", arity: 3, func: decode_i64 },
    Export { name: "encodeUInt64", arity: 4, func: encode_u64 },
    Export { name: "decodeUInt64", arity: 3, func: decode_u64 },
    Export { name: "encodeDouble", arity: 4, func: encode_f64 },
    Export { name: "decodeDouble", arity: 3, func: decode_f64 },
    Export { name: "encodeString", arity: 4, func: encode_string },
    Export { name: "decodeString", arity: 3, func: decode_string },
    Export { name: "encodeBytes", arity: 4, func: encode_bytes },
    Export { name: "decodeBytes", arity: 3, func: decode_bytes },
    Export { name: "encodeStringSet", arity: 4, func: encode_string_set },
    Export { name: "decodeStringSet", arity: 3, func: decode_string_set },
    Export { name: "containsKey", arity: 2, func: contains_key },
    Export { name: "removeValueForKey", arity: 2, func: remove_value_for_key },
    Export { name: "removeValuesForKeys", arity: 2, func: remove_values_for_keys },
    Export { name: "allKeys", arity: 1, func: all_keys },
    Export { name: "count", arity: 1, func: count },
    Export { name: "totalSize", arity: 1, func: total_size },
    Export { name: "clearAll", arity: 1, func: clear_all },
    Export { name: "sync", arity: 2, func: sync },
    Export { name: "trim", arity: 1, func: trim },
    Export { name: "close", arity: 1, func: close },
];

pub fn find(name: &str) -> Option<&'static Export> {
    EXPORTS.iter().find(|export| export.name == name)
}

/// Call an export by name, padding missing trailing arguments with
/// `Undefined` the way the host runtime pads short calls.
pub fn invoke(bridge: &Bridge, name: &str, args: &[Value]) -> Result<Value, Error> {
    let export = find(name)
        .ok_or_else(|| Error::new(ErrorKind::Usage).with_message(format!("unknown export {name}")))?;
    if args.len() >= export.arity {
        (export.func)(bridge, &args[..export.arity])
    } else {
        let mut padded = args.to_vec();
        padded.resize(export.arity, Value::Undefined);
        (export.func)(bridge, &padded)
    }
}

fn initialize(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let root_dir = convert::to_string(&args[0])?;
    let cache_dir = convert::to_string(&args[1])?;
    let log_level = LogLevel::from_raw(convert::to_i32(&args[2])?)?;
    let options = InitOptions {
        root_dir,
        cache_dir,
        log_level,
    };
    bridge.initialize(&options).map(Value::String)
}

fn version(bridge: &Bridge, _args: &[Value]) -> Result<Value, Error> {
    bridge.engine().version().map(Value::String)
}

fn open_options(mode: &Value, crypt_key: &Value) -> Result<StoreOptions, Error> {
    let mode = OpenMode::from_raw(convert::to_i32(mode)?)?;
    let mut options = StoreOptions::default().with_mode(mode);
    if let Some(key) = convert::to_string_opt(crypt_key)? {
        options = options.with_crypt_key(key);
    }
    Ok(options)
}

fn get_default_store(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let options = open_options(&args[0], &args[1])?;
    let handle = match bridge.open_default(&options) {
        Ok(handle) => handle,
        // A stale or wrong key must not brick the default store; retry plain.
        Err(_) if options.crypt_key.is_some() => {
            let plain = StoreOptions {
                crypt_key: None,
                ..options
            };
            bridge.open_default(&plain)?
        }
        Err(err) => return Err(err),
    };
    Ok(Value::from_u64(handle.raw()))
}

fn get_store_with_id(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let id = convert::to_string(&args[0])?;
    if id.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("store id must not be empty"));
    }
    let mut options = open_options(&args[1], &args[2])?;
    if let Some(root_path) = convert::to_string_opt(&args[3])? {
        options = options.with_root_path(root_path);
    }
    let handle = bridge.open(&id, &options)?;
    Ok(Value::from_u64(handle.raw()))
}

fn store_key(args: &[Value]) -> Result<(Handle, String), Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    let key = convert::to_string(&args[1])?;
    Ok((handle, key))
}

fn encode_bool(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_bool(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_bool(&key, value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_bool(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let default = convert::to_bool(&args[2])?;
    if key.is_empty() {
        return Ok(Value::Bool(default));
    }
    let found = bridge.with_store(handle, |store| store.get_bool(&key))?;
    Ok(Value::Bool(found.unwrap_or(default)))
}

fn encode_i32(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_i32(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_i32(&key, value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_i32(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let default = convert::to_i32(&args[2])?;
    if key.is_empty() {
        return Ok(Value::from(default));
    }
    let found = bridge.with_store(handle, |store| store.get_i32(&key))?;
    Ok(Value::from(found.unwrap_or(default)))
}

fn encode_u32(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_u32(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_u32(&key, value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_u32(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let default = convert::to_u32(&args[2])?;
    if key.is_empty() {
        return Ok(Value::from(default));
    }
    let found = bridge.with_store(handle, |store| store.get_u32(&key))?;
    Ok(Value::from(found.unwrap_or(default)))
}

fn encode_i64(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_i64(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_i64(&key, value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_i64(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let default = convert::to_i64(&args[2])?;
    if key.is_empty() {
        return Ok(Value::from_i64(default));
    }
    let found = bridge.with_store(handle, |store| store.get_i64(&key))?;
    Ok(Value::from_i64(found.unwrap_or(default)))
}

fn encode_u64(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_u64(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_u64(&key, value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_u64(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let default = convert::to_u64(&args[2])?;
    if key.is_empty() {
        return Ok(Value::from_u64(default));
    }
    let found = bridge.with_store(handle, |store| store.get_u64(&key))?;
    Ok(Value::from_u64(found.unwrap_or(default)))
}

fn encode_f64(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_f64(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_f64(&key, value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_f64(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let default = convert::to_f64(&args[2])?;
    if key.is_empty() {
        return Ok(Value::from(default));
    }
    let found = bridge.with_store(handle, |store| store.get_f64(&key))?;
    Ok(Value::from(found.unwrap_or(default)))
}

fn encode_string(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_string(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_string(&key, &value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_string(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        // The default slot is returned verbatim, whatever the caller passed.
        return Ok(args[2].clone());
    }
    let found = bridge.with_store(handle, |store| store.get_string(&key))?;
    match found {
        Some(value) => Ok(Value::String(value)),
        None => Ok(args[2].clone()),
    }
}

fn encode_bytes(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let value = convert::to_bytes(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_bytes(&key, &value, expire))?;
    Ok(Value::Bool(true))
}

fn decode_bytes(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(args[2].clone());
    }
    let found = bridge.with_store(handle, |store| store.get_bytes(&key))?;
    match found {
        Some(value) => Ok(Value::Bytes(value)),
        None => Ok(args[2].clone()),
    }
}

fn encode_string_set(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(Value::Bool(false));
    }
    let values = convert::to_string_list(&args[2])?;
    let expire = convert::to_expire_opt(&args[3])?;
    bridge.with_store(handle, |store| store.set_string_list(&key, &values, expire))?;
    Ok(Value::Bool(true))
}

fn decode_string_set(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    if key.is_empty() {
        return Ok(args[2].clone());
    }
    let found = bridge.with_store(handle, |store| store.get_string_list(&key))?;
    match found {
        Some(values) => Ok(Value::from_strings(values)),
        None => Ok(args[2].clone()),
    }
}

fn contains_key(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let found = bridge.with_store(handle, |store| store.contains(&key))?;
    Ok(Value::Bool(found))
}

fn remove_value_for_key(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let (handle, key) = store_key(args)?;
    let existed = bridge.with_store(handle, |store| store.remove(&key))?;
    Ok(Value::Bool(existed))
}

fn remove_values_for_keys(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    let keys = convert::to_string_list(&args[1])?;
    bridge.with_store(handle, |store| store.remove_many(&keys))?;
    Ok(Value::Undefined)
}

fn all_keys(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    let keys = bridge.with_store(handle, |store| store.keys())?;
    Ok(Value::from_strings(keys))
}

fn count(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    let count = bridge.with_store(handle, |store| store.count())?;
    Ok(Value::Number(count as f64))
}

fn total_size(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    let size = bridge.with_store(handle, |store| store.total_size())?;
    Ok(Value::Number(size as f64))
}

fn clear_all(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    bridge.with_store(handle, |store| store.clear_all())?;
    Ok(Value::Undefined)
}

fn sync(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    // Omitted flag means a full synchronous flush.
    let flush = if args[1].is_absent() {
        true
    } else {
        convert::to_bool(&args[1])?
    };
    bridge.with_store(handle, |store| store.sync(flush))?;
    Ok(Value::Undefined)
}

fn trim(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    bridge.with_store(handle, |store| store.trim())?;
    Ok(Value::Undefined)
}

fn close(bridge: &Bridge, args: &[Value]) -> Result<Value, Error> {
    let handle = Handle::from_raw(convert::to_handle(&args[0])?);
    bridge.close(handle)?;
    Ok(Value::Undefined)
}

#[cfg(test)]
mod tests {
    use super::{EXPORTS, find};
    use std::collections::HashSet;

    #[test]
    fn export_names_are_unique() {
        let mut seen = HashSet::new();
        for export in EXPORTS {
            assert!(seen.insert(export.name), "duplicate export {}", export.name);
        }
    }

    #[test]
    fn every_typed_slot_has_both_directions() {
        for ty in [
            "Bool", "Int32", "UInt32", "Int64", "UInt64", "Double", "String", "Bytes",
            "StringSet",
        ] {
            assert!(find(&format!("encode{ty}")).is_some(), "missing encode{ty}");
            assert!(find(&format!("decode{ty}")).is_some(), "missing decode{ty}");
        }
    }

    #[test]
    fn encode_and_decode_arities_match_the_calling_convention() {
        for export in EXPORTS {
            if export.name.starts_with("encode") {
                assert_eq!(export.arity, 4, "{}", export.name);
            }
            if export.name.starts_with("decode") {
                assert_eq!(export.arity, 3, "{}", export.name);
            }
        }
    }
}
