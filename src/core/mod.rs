// Core modules: error model, the pure computation, and argument marshaling.
pub mod error;
pub mod marshal;
pub mod square;
