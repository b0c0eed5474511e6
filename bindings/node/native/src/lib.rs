/*
Purpose: Provide the Node N-API addon over the libkeelstone C ABI.
Key Exports: the bridge dispatch surface (initialize, version, store open,
encode*/decode*, key maintenance, close), registered at module load.
Role: Official Node binding; the host-value lift/lower for this runtime.
Invariants: Calls into the C ABI only; no storage logic in the addon.
Invariants: Every export is an entry of `keelstone_bridge::dispatch::EXPORTS`.
Invariants: Errors carry stable kinds and context in the message text.
Notes: The addon links against libkeelstone and does not re-implement internals.
*/

mod sys;

use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::LazyLock;

use libc::{c_char, c_int};
use napi::{
    CallContext, Env, JsArrayBuffer, JsBigInt, JsBuffer, JsObject, JsUnknown, Result, Status,
    ValueType,
};
use napi_derive::{js_function, module_exports};

use keelstone_bridge::dispatch;
use keelstone_bridge::engine::{Engine, InitOptions, Store, StoreOptions};
use keelstone_bridge::error::{Error as BridgeError, ErrorKind, from_abi_code};
use keelstone_bridge::{Bridge, Value};

static BRIDGE: LazyLock<Bridge> = LazyLock::new(|| Bridge::new(Box::new(NativeEngine)));

// ---- engine client over the C ABI ----

struct NativeEngine;

struct NativeStore {
    ptr: *mut sys::kst_store_t,
}

// Store handles are internally synchronized by the engine; the pointer is
// only reached through the bridge registry.
unsafe impl Send for NativeStore {}

fn cstring(name: &str, value: &str) -> std::result::Result<CString, BridgeError> {
    CString::new(value).map_err(|_| {
        BridgeError::new(ErrorKind::Usage).with_message(format!("{name} contains NUL"))
    })
}

fn opt_cstring(
    name: &str,
    value: Option<&str>,
) -> std::result::Result<Option<CString>, BridgeError> {
    value.map(|value| cstring(name, value)).transpose()
}

fn opt_ptr(value: &Option<CString>) -> *const c_char {
    value.as_ref().map_or(ptr::null(), |v| v.as_ptr())
}

fn check(rc: c_int, err: *mut sys::kst_error_t) -> std::result::Result<(), BridgeError> {
    if rc != 0 {
        return Err(take_error(err));
    }
    Ok(())
}

fn take_error(err: *mut sys::kst_error_t) -> BridgeError {
    if err.is_null() {
        return BridgeError::new(ErrorKind::Internal).with_message("unknown engine error");
    }
    let owned = unsafe { &*err };
    let kind = from_abi_code(owned.kind);
    let mut message = unsafe { cstring_to_string(owned.message) };
    let key = unsafe { cstring_to_string(owned.key) };
    if message.is_empty() {
        message = default_error_message(kind).to_string();
    }
    let mut error = BridgeError::new(kind).with_message(message);
    if !key.is_empty() {
        error = error.with_key(key);
    }
    unsafe { sys::kst_error_free(err) };
    error
}

fn default_error_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Internal => "internal error",
        ErrorKind::Usage => "usage error",
        ErrorKind::NotFound => "not found",
        ErrorKind::AlreadyExists => "already exists",
        ErrorKind::Busy => "busy",
        ErrorKind::Permission => "permission denied",
        ErrorKind::Corrupt => "corrupt",
        ErrorKind::Io => "io error",
    }
}

unsafe fn cstring_to_string(ptr: *mut c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().to_string()
}

fn copy_and_free_buf(mut buf: sys::kst_buf_t) -> Vec<u8> {
    let data = if buf.data.is_null() || buf.len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(buf.data, buf.len) }.to_vec()
    };
    unsafe { sys::kst_buf_free(&mut buf) };
    data
}

fn copy_and_free_list(mut list: sys::kst_str_list_t) -> Vec<String> {
    let items = if list.items.is_null() || list.len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(list.items, list.len) }
            .iter()
            .map(|buf| {
                if buf.data.is_null() || buf.len == 0 {
                    String::new()
                } else {
                    let bytes = unsafe { std::slice::from_raw_parts(buf.data, buf.len) };
                    String::from_utf8_lossy(bytes).to_string()
                }
            })
            .collect()
    };
    unsafe { sys::kst_str_list_free(&mut list) };
    items
}

struct CStringArray {
    ptrs: Vec<*const c_char>,
    _strings: Vec<CString>,
}

impl CStringArray {
    fn new(name: &str, values: &[String]) -> std::result::Result<Self, BridgeError> {
        let mut c_strings = Vec::with_capacity(values.len());
        for value in values {
            c_strings.push(cstring(name, value)?);
        }
        let ptrs = c_strings.iter().map(|s| s.as_ptr()).collect();
        Ok(Self {
            ptrs,
            _strings: c_strings,
        })
    }

    fn as_ptr(&self) -> *const *const c_char {
        if self.ptrs.is_empty() {
            ptr::null()
        } else {
            self.ptrs.as_ptr()
        }
    }

    fn len(&self) -> usize {
        self.ptrs.len()
    }
}

impl Engine for NativeEngine {
    fn initialize(&self, options: &InitOptions) -> std::result::Result<String, BridgeError> {
        let root_dir = cstring("root_dir", &options.root_dir)?;
        let cache_dir = cstring("cache_dir", &options.cache_dir)?;
        let mut out = sys::kst_buf_t {
            data: ptr::null_mut(),
            len: 0,
        };
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_initialize(
                root_dir.as_ptr(),
                cache_dir.as_ptr(),
                options.log_level as c_int,
                &mut out,
                &mut err,
            )
        };
        check(rc, err)?;
        Ok(String::from_utf8_lossy(&copy_and_free_buf(out)).to_string())
    }

    fn version(&self) -> std::result::Result<String, BridgeError> {
        let raw = unsafe { sys::kst_version() };
        if raw.is_null() {
            return Err(BridgeError::new(ErrorKind::Internal).with_message("engine has no version"));
        }
        Ok(unsafe { CStr::from_ptr(raw) }.to_string_lossy().to_string())
    }

    fn open_default(
        &self,
        options: &StoreOptions,
    ) -> std::result::Result<Box<dyn Store>, BridgeError> {
        let crypt_key = opt_cstring("crypt_key", options.crypt_key.as_deref())?;
        let mode = options.mode.map_or(1, |mode| mode as c_int);
        let mut out = ptr::null_mut();
        let mut err = ptr::null_mut();
        let rc =
            unsafe { sys::kst_store_open_default(mode, opt_ptr(&crypt_key), &mut out, &mut err) };
        check(rc, err)?;
        Ok(Box::new(NativeStore { ptr: out }))
    }

    fn open(
        &self,
        id: &str,
        options: &StoreOptions,
    ) -> std::result::Result<Box<dyn Store>, BridgeError> {
        let id = cstring("id", id)?;
        let root_path = opt_cstring("root_path", options.root_path.as_deref())?;
        let crypt_key = opt_cstring("crypt_key", options.crypt_key.as_deref())?;
        let mode = options.mode.map_or(1, |mode| mode as c_int);
        let mut out = ptr::null_mut();
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_open(
                id.as_ptr(),
                mode,
                opt_ptr(&root_path),
                opt_ptr(&crypt_key),
                &mut out,
                &mut err,
            )
        };
        check(rc, err)?;
        Ok(Box::new(NativeStore { ptr: out }))
    }
}

macro_rules! scalar_pair {
    ($set:ident, $get:ident, $sys_set:ident, $sys_get:ident, $native:ty) => {
        fn $set(
            &self,
            key: &str,
            value: $native,
            expire: Option<u32>,
        ) -> std::result::Result<(), BridgeError> {
            let key = cstring("key", key)?;
            let mut err = ptr::null_mut();
            let rc = unsafe {
                sys::$sys_set(
                    self.ptr,
                    key.as_ptr(),
                    value,
                    expire.unwrap_or(0),
                    expire.is_some() as u32,
                    &mut err,
                )
            };
            check(rc, err)
        }

        fn $get(&self, key: &str) -> std::result::Result<Option<$native>, BridgeError> {
            let key = cstring("key", key)?;
            let mut out: $native = Default::default();
            let mut found: u32 = 0;
            let mut err = ptr::null_mut();
            let rc =
                unsafe { sys::$sys_get(self.ptr, key.as_ptr(), &mut out, &mut found, &mut err) };
            if rc != 0 {
                return Err(take_error(err));
            }
            Ok((found != 0).then_some(out))
        }
    };
}

impl Store for NativeStore {
    fn set_bool(
        &self,
        key: &str,
        value: bool,
        expire: Option<u32>,
    ) -> std::result::Result<(), BridgeError> {
        let key = cstring("key", key)?;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_set_bool(
                self.ptr,
                key.as_ptr(),
                value as c_int,
                expire.unwrap_or(0),
                expire.is_some() as u32,
                &mut err,
            )
        };
        check(rc, err)
    }

    fn get_bool(&self, key: &str) -> std::result::Result<Option<bool>, BridgeError> {
        let key = cstring("key", key)?;
        let mut out: c_int = 0;
        let mut found: u32 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_get_bool(self.ptr, key.as_ptr(), &mut out, &mut found, &mut err)
        };
        if rc != 0 {
            return Err(take_error(err));
        }
        Ok((found != 0).then_some(out != 0))
    }

    scalar_pair!(set_i32, get_i32, kst_store_set_i32, kst_store_get_i32, i32);
    scalar_pair!(set_u32, get_u32, kst_store_set_u32, kst_store_get_u32, u32);
    scalar_pair!(set_i64, get_i64, kst_store_set_i64, kst_store_get_i64, i64);
    scalar_pair!(set_u64, get_u64, kst_store_set_u64, kst_store_get_u64, u64);
    scalar_pair!(set_f64, get_f64, kst_store_set_f64, kst_store_get_f64, f64);

    fn set_string(
        &self,
        key: &str,
        value: &str,
        expire: Option<u32>,
    ) -> std::result::Result<(), BridgeError> {
        let key = cstring("key", key)?;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_set_string(
                self.ptr,
                key.as_ptr(),
                value.as_ptr(),
                value.len(),
                expire.unwrap_or(0),
                expire.is_some() as u32,
                &mut err,
            )
        };
        check(rc, err)
    }

    fn get_string(&self, key: &str) -> std::result::Result<Option<String>, BridgeError> {
        let key = cstring("key", key)?;
        let mut out = sys::kst_buf_t {
            data: ptr::null_mut(),
            len: 0,
        };
        let mut found: u32 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_get_string(self.ptr, key.as_ptr(), &mut out, &mut found, &mut err)
        };
        if rc != 0 {
            return Err(take_error(err));
        }
        if found == 0 {
            return Ok(None);
        }
        Ok(Some(
            String::from_utf8_lossy(&copy_and_free_buf(out)).to_string(),
        ))
    }

    fn set_bytes(
        &self,
        key: &str,
        value: &[u8],
        expire: Option<u32>,
    ) -> std::result::Result<(), BridgeError> {
        let key = cstring("key", key)?;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_set_bytes(
                self.ptr,
                key.as_ptr(),
                value.as_ptr(),
                value.len(),
                expire.unwrap_or(0),
                expire.is_some() as u32,
                &mut err,
            )
        };
        check(rc, err)
    }

    fn get_bytes(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, BridgeError> {
        let key = cstring("key", key)?;
        let mut out = sys::kst_buf_t {
            data: ptr::null_mut(),
            len: 0,
        };
        let mut found: u32 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_get_bytes(self.ptr, key.as_ptr(), &mut out, &mut found, &mut err)
        };
        if rc != 0 {
            return Err(take_error(err));
        }
        if found == 0 {
            return Ok(None);
        }
        Ok(Some(copy_and_free_buf(out)))
    }

    fn set_string_list(
        &self,
        key: &str,
        values: &[String],
        expire: Option<u32>,
    ) -> std::result::Result<(), BridgeError> {
        let key = cstring("key", key)?;
        let items = CStringArray::new("values", values)?;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_set_str_list(
                self.ptr,
                key.as_ptr(),
                items.as_ptr(),
                items.len(),
                expire.unwrap_or(0),
                expire.is_some() as u32,
                &mut err,
            )
        };
        check(rc, err)
    }

    fn get_string_list(&self, key: &str) -> std::result::Result<Option<Vec<String>>, BridgeError> {
        let key = cstring("key", key)?;
        let mut out = sys::kst_str_list_t {
            items: ptr::null_mut(),
            len: 0,
        };
        let mut found: u32 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe {
            sys::kst_store_get_str_list(self.ptr, key.as_ptr(), &mut out, &mut found, &mut err)
        };
        if rc != 0 {
            return Err(take_error(err));
        }
        if found == 0 {
            return Ok(None);
        }
        Ok(Some(copy_and_free_list(out)))
    }

    fn contains(&self, key: &str) -> std::result::Result<bool, BridgeError> {
        let key = cstring("key", key)?;
        let mut found: u32 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_contains(self.ptr, key.as_ptr(), &mut found, &mut err) };
        check(rc, err)?;
        Ok(found != 0)
    }

    fn remove(&self, key: &str) -> std::result::Result<bool, BridgeError> {
        let key = cstring("key", key)?;
        let mut existed: u32 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_remove(self.ptr, key.as_ptr(), &mut existed, &mut err) };
        check(rc, err)?;
        Ok(existed != 0)
    }

    fn remove_many(&self, keys: &[String]) -> std::result::Result<(), BridgeError> {
        let items = CStringArray::new("keys", keys)?;
        let mut err = ptr::null_mut();
        let rc =
            unsafe { sys::kst_store_remove_many(self.ptr, items.as_ptr(), items.len(), &mut err) };
        check(rc, err)
    }

    fn keys(&self) -> std::result::Result<Vec<String>, BridgeError> {
        let mut out = sys::kst_str_list_t {
            items: ptr::null_mut(),
            len: 0,
        };
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_all_keys(self.ptr, &mut out, &mut err) };
        check(rc, err)?;
        Ok(copy_and_free_list(out))
    }

    fn count(&self) -> std::result::Result<u64, BridgeError> {
        let mut out: u64 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_count(self.ptr, &mut out, &mut err) };
        check(rc, err)?;
        Ok(out)
    }

    fn total_size(&self) -> std::result::Result<u64, BridgeError> {
        let mut out: u64 = 0;
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_total_size(self.ptr, &mut out, &mut err) };
        check(rc, err)?;
        Ok(out)
    }

    fn clear_all(&self) -> std::result::Result<(), BridgeError> {
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_clear_all(self.ptr, &mut err) };
        check(rc, err)
    }

    fn sync(&self, flush: bool) -> std::result::Result<(), BridgeError> {
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_sync(self.ptr, flush as u32, &mut err) };
        check(rc, err)
    }

    fn trim(&self) -> std::result::Result<(), BridgeError> {
        let mut err = ptr::null_mut();
        let rc = unsafe { sys::kst_store_trim(self.ptr, &mut err) };
        check(rc, err)
    }

    fn close(&mut self) -> std::result::Result<(), BridgeError> {
        if !self.ptr.is_null() {
            unsafe { sys::kst_store_close(self.ptr) };
            self.ptr = ptr::null_mut();
        }
        Ok(())
    }
}

impl Drop for NativeStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

// ---- host value lift/lower ----

fn lift(unknown: JsUnknown) -> Result<Value> {
    match unknown.get_type()? {
        ValueType::Undefined => Ok(Value::Undefined),
        ValueType::Null => Ok(Value::Null),
        ValueType::Boolean => Ok(Value::Bool(unknown.coerce_to_bool()?.get_value()?)),
        ValueType::Number => Ok(Value::Number(unknown.coerce_to_number()?.get_double()?)),
        ValueType::BigInt => {
            let mut bigint = unsafe { unknown.cast::<JsBigInt>() };
            Ok(Value::BigInt(bigint_to_i128(&mut bigint)?))
        }
        ValueType::String => Ok(Value::String(
            unknown.coerce_to_string()?.into_utf8()?.into_owned()?,
        )),
        ValueType::Object => {
            let object = unknown.coerce_to_object()?;
            if object.is_buffer()? {
                let buffer = unsafe { object.into_unknown().cast::<JsBuffer>() };
                return Ok(Value::Bytes(buffer.into_value()?.to_vec()));
            }
            if object.is_arraybuffer()? {
                let buffer = unsafe { object.into_unknown().cast::<JsArrayBuffer>() };
                return Ok(Value::Bytes(buffer.into_value()?.to_vec()));
            }
            if object.is_array()? {
                let length = object.get_array_length()?;
                let mut items = Vec::with_capacity(length as usize);
                for index in 0..length {
                    items.push(lift(object.get_element::<JsUnknown>(index)?)?);
                }
                return Ok(Value::Array(items));
            }
            Err(napi::Error::new(
                Status::InvalidArg,
                "unsupported object argument; pass a Buffer, ArrayBuffer, or array",
            ))
        }
        other => Err(napi::Error::new(
            Status::InvalidArg,
            format!("unsupported argument type {other:?}"),
        )),
    }
}

/// 64-bit reads cover everything the bridge accepts; anything wider is
/// over-range for every slot and collapses to an over-range sentinel.
fn bigint_to_i128(bigint: &mut JsBigInt) -> Result<i128> {
    let (signed, lossless) = bigint.get_i64()?;
    if lossless {
        return Ok(signed as i128);
    }
    let (unsigned, lossless) = bigint.get_u64()?;
    if lossless {
        return Ok(unsigned as i128);
    }
    Ok(i128::MAX)
}

fn lower(env: &Env, value: Value) -> Result<JsUnknown> {
    match value {
        Value::Undefined => Ok(env.get_undefined()?.into_unknown()),
        Value::Null => Ok(env.get_null()?.into_unknown()),
        Value::Bool(value) => Ok(env.get_boolean(value)?.into_unknown()),
        Value::Number(value) => Ok(env.create_double(value)?.into_unknown()),
        Value::BigInt(value) => lower_bigint(env, value),
        Value::String(value) => Ok(env.create_string_from_std(value)?.into_unknown()),
        Value::Bytes(value) => Ok(env
            .create_arraybuffer_with_data(value)?
            .into_raw()
            .into_unknown()),
        Value::Array(items) => {
            let mut array = env.create_array_with_length(items.len())?;
            for (index, item) in items.into_iter().enumerate() {
                array.set_element(index as u32, lower(env, item)?)?;
            }
            Ok(array.into_unknown())
        }
    }
}

fn lower_bigint(env: &Env, value: i128) -> Result<JsUnknown> {
    if let Ok(value) = i64::try_from(value) {
        return Ok(env.create_bigint_from_i64(value)?.into_unknown()?);
    }
    if let Ok(value) = u64::try_from(value) {
        return Ok(env.create_bigint_from_u64(value)?.into_unknown()?);
    }
    let magnitude = value.unsigned_abs();
    let words = vec![magnitude as u64, (magnitude >> 64) as u64];
    Ok(env
        .create_bigint_from_words(value < 0, words)?
        .into_unknown()?)
}

fn to_napi_error(err: BridgeError) -> napi::Error {
    let status = match err.kind() {
        ErrorKind::Usage => Status::InvalidArg,
        _ => Status::GenericFailure,
    };
    let mut details = vec![format!("kind={:?}", err.kind())];
    details.push(format!(
        "message={}",
        err.message()
            .unwrap_or_else(|| default_error_message(err.kind()))
    ));
    if let Some(key) = err.key() {
        details.push(format!("key={key}"));
    }
    napi::Error::new(status, format!("keelstone error: {}", details.join("; ")))
}

// ---- dispatch shims ----

fn call_export(name: &'static str, ctx: &CallContext) -> Result<JsUnknown> {
    let arity = dispatch::find(name)
        .map(|export| export.arity)
        .unwrap_or(ctx.length);
    let argc = ctx.length.min(arity);
    let mut args = Vec::with_capacity(argc);
    for index in 0..argc {
        args.push(lift(ctx.get::<JsUnknown>(index)?)?);
    }
    let result = dispatch::invoke(&BRIDGE, name, &args).map_err(to_napi_error)?;
    lower(ctx.env, result)
}

macro_rules! host_fn {
    ($fn_name:ident, $export:literal, $arity:literal) => {
        #[js_function($arity)]
        fn $fn_name(ctx: CallContext) -> Result<JsUnknown> {
            call_export($export, &ctx)
        }
    };
}

host_fn!(js_initialize, "initialize", 3);
host_fn!(js_version, "version", 0);
host_fn!(js_get_default_store, "getDefaultStore", 2);
host_fn!(js_get_store_with_id, "getStoreWithId", 4);
host_fn!(js_encode_bool, "encodeBool", 4);
host_fn!(js_decode_bool, "decodeBool", 3);
host_fn!(js_encode_int32, "encodeInt32", 4);
host_fn!(js_decode_int32, "decodeInt32", 3);
host_fn!(js_encode_uint32, "encodeUInt32", 4);
host_fn!(js_decode_uint32, "decodeUInt32", 3);
host_fn!(js_encode_int64, "encodeInt64", 4);
host_fn!(js_decode_int64, "decodeInt64", 3);
host_fn!(js_encode_uint64, "encodeUInt64", 4);
host_fn!(js_decode_uint64, "decodeUInt64", 3);
host_fn!(js_encode_double, "encodeDouble", 4);
host_fn!(js_decode_double, "decodeDouble", 3);
host_fn!(js_encode_string, "encodeString", 4);
host_fn!(js_decode_string, "decodeString", 3);
host_fn!(js_encode_bytes, "encodeBytes", 4);
host_fn!(js_decode_bytes, "decodeBytes", 3);
host_fn!(js_encode_string_set, "encodeStringSet", 4);
host_fn!(js_decode_string_set, "decodeStringSet", 3);
host_fn!(js_contains_key, "containsKey", 2);
host_fn!(js_remove_value_for_key, "removeValueForKey", 2);
host_fn!(js_remove_values_for_keys, "removeValuesForKeys", 2);
host_fn!(js_all_keys, "allKeys", 1);
host_fn!(js_count, "count", 1);
host_fn!(js_total_size, "totalSize", 1);
host_fn!(js_clear_all, "clearAll", 1);
host_fn!(js_sync, "sync", 2);
host_fn!(js_trim, "trim", 1);
host_fn!(js_close, "close", 1);

const REGISTRATIONS: &[(&str, napi::Callback)] = &[
    ("initialize", js_initialize),
    ("version", js_version),
    ("getDefaultStore", js_get_default_store),
    ("getStoreWithId", js_get_store_with_id),
    ("encodeBool", js_encode_bool),
    ("decodeBool", js_decode_bool),
    ("encodeInt32", js_encode_int32),
    ("decodeInt32", js_decode_int32),
    ("encodeUInt32", js_encode_uint32),
    ("decodeUInt32", js_decode_uint32),
    ("encodeInt64", js_encode_int64),
    ("decodeInt64", js_decode_int64),
    ("encodeUInt64", js_encode_uint64),
    ("decodeUInt64", js_decode_uint64),
    ("encodeDouble", js_encode_double),
    ("decodeDouble", js_decode_double),
    ("encodeString", js_encode_string),
    ("decodeString", js_decode_string),
    ("encodeBytes", js_encode_bytes),
    ("decodeBytes", js_decode_bytes),
    ("encodeStringSet", js_encode_string_set),
    ("decodeStringSet", js_decode_string_set),
    ("containsKey", js_contains_key),
    ("removeValueForKey", js_remove_value_for_key),
    ("removeValuesForKeys", js_remove_values_for_keys),
    ("allKeys", js_all_keys),
    ("count", js_count),
    ("totalSize", js_total_size),
    ("clearAll", js_clear_all),
    ("sync", js_sync),
    ("trim", js_trim),
    ("close", js_close),
];

#[module_exports]
fn init(mut exports: JsObject) -> Result<()> {
    debug_assert_eq!(
        REGISTRATIONS.len(),
        dispatch::EXPORTS.len(),
        "addon registrations out of sync with the dispatch table"
    );
    for (name, callback) in REGISTRATIONS {
        debug_assert!(
            dispatch::find(name).is_some(),
            "addon registers {name} but the dispatch table does not export it"
        );
        exports.create_named_method(name, *callback)?;
    }
    Ok(())
}
