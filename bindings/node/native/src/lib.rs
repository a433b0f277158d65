/*
Purpose: Provide a Node N-API binding over the libpysimple C ABI.
Key Exports: square, call, moduleName, ErrorKind.
Role: Node counterpart of the `pysimple` Python module.
Invariants: Calls into C ABI only; no re-implementation of the computation.
Invariants: Errors include stable kinds and context in message text.
*/

use libc::c_char;
use napi::bindgen_prelude::Status;
use napi::{CallContext, Error, JsNumber, JsObject, JsUnknown, Result, ValueType};
use napi_derive::{js_function, module_exports, napi};
use std::ffi::{CStr, CString};
use std::ptr;

#[repr(C)]
struct pysimple_error_t {
    kind: i32,
    message: *mut c_char,
    index: u64,
    has_index: u8,
}

unsafe extern "C" {
    fn pysimple_square(x: f32) -> f32;
    fn pysimple_module_name() -> *const c_char;
    fn pysimple_call_json(
        method: *const c_char,
        args_json: *const u8,
        args_len: usize,
        out_value: *mut f64,
        out_err: *mut *mut pysimple_error_t,
    ) -> i32;
    fn pysimple_expect_arity(
        method: *const c_char,
        given: usize,
        expected: usize,
        out_err: *mut *mut pysimple_error_t,
    ) -> i32;
    fn pysimple_reject_argument(
        method: *const c_char,
        index: usize,
        type_name: *const c_char,
        out_err: *mut *mut pysimple_error_t,
    ) -> i32;
    fn pysimple_error_free(err: *mut pysimple_error_t);
}

#[napi]
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Internal = 1,
    InvalidArgument = 2,
    NotFound = 3,
}

/// Square a number in single precision. Takes the raw JS arguments so that
/// extra or missing arguments fail instead of being dropped by napi.
#[js_function(1)]
fn square(ctx: CallContext) -> Result<JsNumber> {
    let method = c"square";
    let mut err = ptr::null_mut();
    if unsafe { pysimple_expect_arity(method.as_ptr(), ctx.length, 1, &mut err) } != 0 {
        return Err(take_error(err));
    }
    let arg = ctx.get::<JsUnknown>(0)?;
    let value_type = arg.get_type()?;
    if value_type != ValueType::Number {
        let type_name = js_type_name(value_type);
        unsafe { pysimple_reject_argument(method.as_ptr(), 0, type_name.as_ptr(), &mut err) };
        return Err(take_error(err));
    }
    let value = arg.coerce_to_number()?.get_double()?;
    let result = unsafe { pysimple_square(value as f32) };
    ctx.env.create_double(f64::from(result))
}

#[module_exports]
fn init(mut exports: JsObject) -> Result<()> {
    exports.create_named_method("square", square)?;
    Ok(())
}

/// Dispatch by method name with a JSON array of arguments, arity-checked by the library.
#[napi]
pub fn call(method: String, args_json: String) -> Result<f64> {
    let method = CString::new(method)
        .map_err(|_| Error::new(Status::InvalidArg, "method contains NUL"))?;
    let mut out = 0.0_f64;
    let mut err = ptr::null_mut();
    let rc = unsafe {
        pysimple_call_json(
            method.as_ptr(),
            args_json.as_ptr(),
            args_json.len(),
            &mut out,
            &mut err,
        )
    };
    if rc != 0 {
        return Err(take_error(err));
    }
    Ok(out)
}

#[napi]
pub fn module_name() -> String {
    unsafe { CStr::from_ptr(pysimple_module_name()) }
        .to_string_lossy()
        .to_string()
}

fn take_error(err: *mut pysimple_error_t) -> Error {
    if err.is_null() {
        return Error::new(Status::GenericFailure, "pysimple: unknown error");
    }
    let owned = unsafe { &*err };
    let kind_label = error_kind_label(owned.kind);
    let mut message = unsafe { cstring_to_string(owned.message) };
    if message.is_empty() {
        message = default_error_message(kind_label).to_string();
    }
    let mut details = vec![format!("kind={kind_label}"), format!("message={message}")];
    if owned.has_index != 0 {
        details.push(format!("index={}", owned.index));
    }
    let status = match owned.kind {
        2 => Status::InvalidArg,
        _ => Status::GenericFailure,
    };
    unsafe { pysimple_error_free(err) };
    Error::new(status, format!("pysimple error: {}", details.join("; ")))
}

fn js_type_name(value_type: ValueType) -> &'static CStr {
    match value_type {
        ValueType::Undefined => c"undefined",
        ValueType::Null => c"null",
        ValueType::Boolean => c"boolean",
        ValueType::Number => c"number",
        ValueType::String => c"string",
        ValueType::Symbol => c"symbol",
        ValueType::Object => c"object",
        ValueType::Function => c"function",
        ValueType::External => c"external",
        ValueType::BigInt => c"bigint",
        _ => c"unknown",
    }
}

fn default_error_message(kind: &str) -> &'static str {
    match kind {
        "InvalidArgument" => "invalid argument",
        "NotFound" => "not found",
        _ => "internal error",
    }
}

fn error_kind_label(kind: i32) -> &'static str {
    match kind {
        2 => "InvalidArgument",
        3 => "NotFound",
        _ => "Internal",
    }
}

unsafe fn cstring_to_string(ptr: *mut c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().to_string()
}
