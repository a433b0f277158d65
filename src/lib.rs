//! Purpose: Library crate backing the `pysimple` extension for every host.
//! Exports: `api` (method table, computation, errors), `abi` (C ABI), `core`.
//! Role: One pure function, marshaled for CPython, Node and C callers.
//! Invariants: No state; every entry point is reentrant and side-effect free.
//! Invariants: Host bindings reach the core only through `api`.
pub mod abi;
pub mod api;
pub mod core;
#[cfg(feature = "python")]
mod python;
