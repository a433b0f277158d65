//! Purpose: Define the stable public Rust API boundary for pysimple.
//! Exports: The method table, the pure computation and the error model.
//! Role: Public, additive-only surface used by the C ABI, host bindings and tools.
//! Invariants: Bindings reach the core only through this module.

mod module;

pub use crate::core::error::{Error, ErrorKind, to_status_code};
pub use crate::core::marshal;
pub use crate::core::square::square;
pub use module::{MODULE_NAME, MethodDef, ModuleDef, module};
