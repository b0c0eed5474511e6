//! Purpose: Translate host `Value`s to native primitives and back.
//! Exports: `to_*` extractors used by every dispatch handler.
//! Role: The conversion half of the bridge; rejects instead of coercing.
//! Invariants: Conversions are lossless or they fail with `Usage`.
//! Invariants: Maybe-undefined slots map absence to `None`, never to a sentinel.

use crate::error::{Error, ErrorKind};
use crate::value::Value;

fn type_error(expected: &str, value: &Value) -> Error {
    Error::new(ErrorKind::Usage)
        .with_message(format!("expected {expected}, got {}", value.type_name()))
}

pub fn to_bool(value: &Value) -> Result<bool, Error> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(type_error("a boolean", other)),
    }
}

/// Integral check shared by the fixed-width number extractors. The host has a
/// single number type; a value only converts when it round-trips exactly.
fn integral(value: &Value, expected: &str) -> Result<f64, Error> {
    match value {
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(*n),
        Value::Number(_) => Err(Error::new(ErrorKind::Usage)
            .with_message(format!("expected {expected}, got a non-integral number"))),
        other => Err(type_error(expected, other)),
    }
}

pub fn to_i32(value: &Value) -> Result<i32, Error> {
    let n = integral(value, "a 32-bit integer")?;
    if n < i32::MIN as f64 || n > i32::MAX as f64 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("number is out of range for a 32-bit integer"));
    }
    Ok(n as i32)
}

pub fn to_u32(value: &Value) -> Result<u32, Error> {
    let n = integral(value, "an unsigned 32-bit integer")?;
    if n < 0.0 || n > u32::MAX as f64 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("number is out of range for an unsigned 32-bit integer"));
    }
    Ok(n as u32)
}

pub fn to_f64(value: &Value) -> Result<f64, Error> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(type_error("a number", other)),
    }
}

/// 64-bit slots accept a bigint or an integral number, like the host's own
/// numeric APIs. Numbers above 2^53 are rejected rather than rounded.
pub fn to_i64(value: &Value) -> Result<i64, Error> {
    match value {
        Value::BigInt(v) => i64::try_from(*v).map_err(|_| {
            Error::new(ErrorKind::Usage).with_message("bigint is out of range for a 64-bit integer")
        }),
        Value::Number(_) => {
            let n = integral(value, "a 64-bit integer")?;
            if n.abs() > MAX_SAFE_INTEGER {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("number exceeds the exact integer range; pass a bigint"));
            }
            Ok(n as i64)
        }
        other => Err(type_error("a 64-bit integer", other)),
    }
}

pub fn to_u64(value: &Value) -> Result<u64, Error> {
    match value {
        Value::BigInt(v) => u64::try_from(*v).map_err(|_| {
            Error::new(ErrorKind::Usage)
                .with_message("bigint is out of range for an unsigned 64-bit integer")
        }),
        Value::Number(_) => {
            let n = integral(value, "an unsigned 64-bit integer")?;
            if n < 0.0 {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("expected an unsigned 64-bit integer, got a negative number"));
            }
            if n > MAX_SAFE_INTEGER {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("number exceeds the exact integer range; pass a bigint"));
            }
            Ok(n as u64)
        }
        other => Err(type_error("an unsigned 64-bit integer", other)),
    }
}

/// Store handles ride as bigints; plain numbers are accepted for host
/// convenience with the same lossless rules as `to_u64`.
pub fn to_handle(value: &Value) -> Result<u64, Error> {
    to_u64(value).map_err(|err| match err.message() {
        Some(message) => Error::new(ErrorKind::Usage).with_message(format!("bad handle: {message}")),
        None => Error::new(ErrorKind::Usage).with_message("bad handle"),
    })
}

pub fn to_string(value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(type_error("a string", other)),
    }
}

pub fn to_string_opt(value: &Value) -> Result<Option<String>, Error> {
    if value.is_absent() {
        return Ok(None);
    }
    to_string(value).map(Some)
}

pub fn to_bytes(value: &Value) -> Result<Vec<u8>, Error> {
    match value {
        Value::Bytes(b) => Ok(b.clone()),
        other => Err(type_error("a byte buffer", other)),
    }
}

pub fn to_bytes_opt(value: &Value) -> Result<Option<Vec<u8>>, Error> {
    if value.is_absent() {
        return Ok(None);
    }
    to_bytes(value).map(Some)
}

pub fn to_string_list(value: &Value) -> Result<Vec<String>, Error> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(type_error("an array of strings", other)),
    };
    items.iter().map(to_string).collect()
}

/// Optional expiration slot: absent means "no per-key expiration".
pub fn to_expire_opt(value: &Value) -> Result<Option<u32>, Error> {
    if value.is_absent() {
        return Ok(None);
    }
    to_u32(value).map(Some)
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0; // 2^53 - 1
