// Contract tests for the conversion layer at the public boundary: every
// native type round-trips through `Value` exactly, and every rejection is a
// `Usage` error that names the expected type.

use keelstone_bridge::convert;
use keelstone_bridge::error::ErrorKind;
use keelstone_bridge::value::Value;

#[test]
fn native_types_round_trip_through_value() {
    assert!(convert::to_bool(&Value::from(true)).unwrap());
    assert_eq!(convert::to_i32(&Value::from(i32::MIN)).unwrap(), i32::MIN);
    assert_eq!(convert::to_u32(&Value::from(u32::MAX)).unwrap(), u32::MAX);
    assert_eq!(convert::to_i64(&Value::from_i64(i64::MAX)).unwrap(), i64::MAX);
    assert_eq!(convert::to_u64(&Value::from_u64(u64::MAX)).unwrap(), u64::MAX);
    assert_eq!(convert::to_f64(&Value::from(-0.5)).unwrap(), -0.5);
    assert_eq!(
        convert::to_string(&Value::from("snapshot")).unwrap(),
        "snapshot"
    );
    assert_eq!(
        convert::to_bytes(&Value::from(vec![7u8, 0, 7])).unwrap(),
        vec![7u8, 0, 7]
    );
    assert_eq!(
        convert::to_string_list(&Value::from_strings(["x", "y"])).unwrap(),
        vec!["x".to_string(), "y".to_string()]
    );
}

#[test]
fn sixty_four_bit_slots_accept_safe_numbers() {
    assert_eq!(convert::to_i64(&Value::Number(-1.0)).unwrap(), -1);
    assert_eq!(convert::to_u64(&Value::Number(0.0)).unwrap(), 0);
    assert_eq!(
        convert::to_handle(&Value::Number(12.0)).unwrap(),
        convert::to_handle(&Value::from_u64(12)).unwrap()
    );
}

#[test]
fn every_rejection_is_usage_with_both_type_names() {
    let err = convert::to_bool(&Value::Null).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(err.message().unwrap().contains("null"));

    let err = convert::to_bytes(&Value::String("not bytes".into())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(err.message().unwrap().contains("byte buffer"));
    assert!(err.message().unwrap().contains("string"));

    let err = convert::to_string_list(&Value::Bytes(vec![1])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn absence_is_distinct_from_emptiness() {
    assert_eq!(convert::to_string_opt(&Value::Undefined).unwrap(), None);
    assert_eq!(
        convert::to_string_opt(&Value::String(String::new())).unwrap(),
        Some(String::new())
    );
    assert_eq!(convert::to_bytes_opt(&Value::Null).unwrap(), None);
    assert_eq!(
        convert::to_bytes_opt(&Value::Bytes(Vec::new())).unwrap(),
        Some(Vec::new())
    );
}

#[test]
fn bigint_bounds_are_exact() {
    // The first value outside each range must fail, the boundary must pass.
    assert!(convert::to_i64(&Value::BigInt(i64::MAX as i128)).is_ok());
    assert!(convert::to_i64(&Value::BigInt(i64::MAX as i128 + 1)).is_err());
    assert!(convert::to_i64(&Value::BigInt(i64::MIN as i128)).is_ok());
    assert!(convert::to_i64(&Value::BigInt(i64::MIN as i128 - 1)).is_err());
    assert!(convert::to_u64(&Value::BigInt(u64::MAX as i128)).is_ok());
    assert!(convert::to_u64(&Value::BigInt(u64::MAX as i128 + 1)).is_err());
    assert!(convert::to_u64(&Value::BigInt(0)).is_ok());
    assert!(convert::to_u64(&Value::BigInt(-1)).is_err());
}
