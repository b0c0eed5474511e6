// Raw FFI bindings to the Keelstone C ABI (libkeelstone).
//
// Return-code convention: 0 is success; any other value means `out_err` was
// populated and must be released with `kst_error_free`. Buffers and string
// lists returned by the engine are released with their matching free calls.

use libc::{c_char, c_int};

#[repr(C)]
pub struct kst_store_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct kst_buf_t {
    pub data: *mut u8,
    pub len: usize,
}

#[repr(C)]
pub struct kst_str_list_t {
    pub items: *mut kst_buf_t,
    pub len: usize,
}

#[repr(C)]
pub struct kst_error_t {
    pub kind: i32,
    pub message: *mut c_char,
    pub key: *mut c_char,
}

unsafe extern "C" {
    pub fn kst_initialize(
        root_dir: *const c_char,
        cache_dir: *const c_char,
        log_level: c_int,
        out_root: *mut kst_buf_t,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_version() -> *const c_char;

    pub fn kst_store_open_default(
        mode: c_int,
        crypt_key: *const c_char,
        out_store: *mut *mut kst_store_t,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_open(
        id: *const c_char,
        mode: c_int,
        root_path: *const c_char,
        crypt_key: *const c_char,
        out_store: *mut *mut kst_store_t,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_bool(
        store: *mut kst_store_t,
        key: *const c_char,
        value: c_int,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_bool(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut c_int,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_i32(
        store: *mut kst_store_t,
        key: *const c_char,
        value: i32,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_i32(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut i32,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_u32(
        store: *mut kst_store_t,
        key: *const c_char,
        value: u32,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_u32(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut u32,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_i64(
        store: *mut kst_store_t,
        key: *const c_char,
        value: i64,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_i64(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut i64,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_u64(
        store: *mut kst_store_t,
        key: *const c_char,
        value: u64,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_u64(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut u64,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_f64(
        store: *mut kst_store_t,
        key: *const c_char,
        value: f64,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_f64(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut f64,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_string(
        store: *mut kst_store_t,
        key: *const c_char,
        value: *const u8,
        value_len: usize,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_string(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut kst_buf_t,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_bytes(
        store: *mut kst_store_t,
        key: *const c_char,
        value: *const u8,
        value_len: usize,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_bytes(
        store: *mut kst_store_t,
        key: *const c_char,
        out_value: *mut kst_buf_t,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_set_str_list(
        store: *mut kst_store_t,
        key: *const c_char,
        items: *const *const c_char,
        items_len: usize,
        expire_seconds: u32,
        has_expire: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_get_str_list(
        store: *mut kst_store_t,
        key: *const c_char,
        out_list: *mut kst_str_list_t,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_contains(
        store: *mut kst_store_t,
        key: *const c_char,
        out_found: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_remove(
        store: *mut kst_store_t,
        key: *const c_char,
        out_existed: *mut u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_remove_many(
        store: *mut kst_store_t,
        keys: *const *const c_char,
        keys_len: usize,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_all_keys(
        store: *mut kst_store_t,
        out_list: *mut kst_str_list_t,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_count(
        store: *mut kst_store_t,
        out_count: *mut u64,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_total_size(
        store: *mut kst_store_t,
        out_size: *mut u64,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_clear_all(
        store: *mut kst_store_t,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_sync(
        store: *mut kst_store_t,
        flush: u32,
        out_err: *mut *mut kst_error_t,
    ) -> c_int;

    pub fn kst_store_trim(store: *mut kst_store_t, out_err: *mut *mut kst_error_t) -> c_int;

    pub fn kst_store_close(store: *mut kst_store_t);

    pub fn kst_buf_free(buf: *mut kst_buf_t);

    pub fn kst_str_list_free(list: *mut kst_str_list_t);

    pub fn kst_error_free(err: *mut kst_error_t);
}
