//! Purpose: C ABI bridge for non-Rust hosts (libpysimple).
//! Exports: `pysimple_square`, `pysimple_call_json`, `pysimple_module_name`, validation and error helpers.
//! Role: Stable ABI surface consumed by the Node addon and plain C callers.
//! Invariants: JSON argument arrays in, f64 out; explicit free for error structs.
//! Invariants: Error kinds map 1:1 with core error kinds via `to_status_code`.
//! Invariants: Returns 0 on success and -1 on failure; outputs untouched on failure.
use crate::api::{Error, ErrorKind, marshal, module, to_status_code};
use serde_json::Value;
use std::ffi::{CStr, CString, c_char};
use std::ptr;

#[repr(C)]
pub struct pysimple_error_t {
    kind: i32,
    message: *mut c_char,
    index: u64,
    has_index: u8,
}

static MODULE_NAME_C: &CStr = c"pysimple";

#[unsafe(no_mangle)]
pub extern "C" fn pysimple_square(x: f32) -> f32 {
    crate::api::square(x)
}

#[unsafe(no_mangle)]
pub extern "C" fn pysimple_module_name() -> *const c_char {
    MODULE_NAME_C.as_ptr()
}

/// # Safety
/// `method` must be null or NUL-terminated; `args_json` must be null or valid for
/// `args_len` bytes; `out_value` and `out_err` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pysimple_call_json(
    method: *const c_char,
    args_json: *const u8,
    args_len: usize,
    out_value: *mut f64,
    out_err: *mut *mut pysimple_error_t,
) -> i32 {
    if out_value.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::InvalidArgument).with_message("out_value is null"),
        );
    }
    let method = match unsafe { parse_c_str(method, "method") } {
        Ok(method) => method,
        Err(err) => return fail(out_err, err),
    };
    let args = match unsafe { parse_args(args_json, args_len) } {
        Ok(args) => args,
        Err(err) => return fail(out_err, err),
    };
    match module().call(method, &args) {
        Ok(value) => {
            unsafe {
                *out_value = value;
            }
            0
        }
        Err(err) => fail(out_err, err),
    }
}

/// Arity check for hosts that convert arguments natively instead of via JSON.
///
/// # Safety
/// `method` must be null or NUL-terminated; `out_err` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pysimple_expect_arity(
    method: *const c_char,
    given: usize,
    expected: usize,
    out_err: *mut *mut pysimple_error_t,
) -> i32 {
    let method = match unsafe { parse_c_str(method, "method") } {
        Ok(method) => method,
        Err(err) => return fail(out_err, err),
    };
    match marshal::expect_arity(method, given, expected) {
        Ok(()) => 0,
        Err(err) => fail(out_err, err),
    }
}

/// Records that argument `index` has host type `type_name`, which is not a number.
/// Always returns -1.
///
/// # Safety
/// `method` and `type_name` must be null or NUL-terminated; `out_err` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pysimple_reject_argument(
    method: *const c_char,
    index: usize,
    type_name: *const c_char,
    out_err: *mut *mut pysimple_error_t,
) -> i32 {
    let method = match unsafe { parse_c_str(method, "method") } {
        Ok(method) => method,
        Err(err) => return fail(out_err, err),
    };
    let type_name = match unsafe { parse_c_str(type_name, "type_name") } {
        Ok(type_name) => type_name,
        Err(err) => return fail(out_err, err),
    };
    fail(out_err, marshal::not_a_number(method, index, type_name))
}

/// # Safety
/// `err` must be null or a pointer produced by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pysimple_error_free(err: *mut pysimple_error_t) {
    if err.is_null() {
        return;
    }
    let owned = unsafe { Box::from_raw(err) };
    if !owned.message.is_null() {
        unsafe {
            drop(CString::from_raw(owned.message));
        }
    }
}

unsafe fn parse_c_str<'a>(input: *const c_char, name: &str) -> Result<&'a str, Error> {
    if input.is_null() {
        return Err(Error::new(ErrorKind::InvalidArgument).with_message(format!("{name} is null")));
    }
    unsafe { CStr::from_ptr(input) }
        .to_str()
        .map_err(|err| {
            Error::new(ErrorKind::InvalidArgument)
                .with_message(format!("{name} is not valid UTF-8"))
                .with_source(err)
        })
}

unsafe fn parse_args(bytes: *const u8, len: usize) -> Result<Vec<Value>, Error> {
    if bytes.is_null() {
        return Err(Error::new(ErrorKind::InvalidArgument).with_message("args_json is null"));
    }
    let slice = unsafe { std::slice::from_raw_parts(bytes, len) };
    let text = std::str::from_utf8(slice).map_err(|err| {
        Error::new(ErrorKind::InvalidArgument)
            .with_message("invalid json utf-8")
            .with_source(err)
    })?;
    let value: Value = serde_json::from_str(text).map_err(|err| {
        Error::new(ErrorKind::InvalidArgument)
            .with_message("invalid json")
            .with_source(err)
    })?;
    match value {
        Value::Array(args) => Ok(args),
        _ => Err(Error::new(ErrorKind::InvalidArgument).with_message("args_json must be an array")),
    }
}

fn fail(out_err: *mut *mut pysimple_error_t, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(pysimple_error_t {
        kind: to_status_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        index: err.index().map(|index| index as u64).unwrap_or(0),
        has_index: if err.index().is_some() { 1 } else { 0 },
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}
