//! Purpose: Static method table registered under the `pysimple` module name.
//! Exports: `MODULE_NAME`, `MethodDef`, `ModuleDef`, `module`.
//! Role: Host-neutral registration; each binding exposes these entries natively.
//! Invariants: The table is immutable static data; lookups are by exact name.
//! Invariants: Every method validates arity and converts arguments before computing.
use crate::core::error::{Error, ErrorKind};
use crate::core::{marshal, square};
use serde_json::Value;

pub const MODULE_NAME: &str = "pysimple";

pub type MethodFn = fn(&[Value]) -> Result<f64, Error>;

#[derive(Clone, Copy)]
pub struct MethodDef {
    pub name: &'static str,
    pub doc: &'static str,
    pub call: MethodFn,
}

impl std::fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ModuleDef {
    pub name: &'static str,
    pub doc: &'static str,
    pub methods: &'static [MethodDef],
}

impl ModuleDef {
    pub fn get(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.iter().map(|method| method.name)
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<f64, Error> {
        let method = self.get(name).ok_or_else(|| {
            Error::new(ErrorKind::NotFound)
                .with_message(format!("module '{}' has no method '{name}'", self.name))
        })?;
        tracing::debug!(module = self.name, method = name, arity = args.len(), "dispatch");
        (method.call)(args)
    }
}

static METHODS: [MethodDef; 1] = [MethodDef {
    name: "square",
    doc: "Square function",
    call: call_square,
}];

static MODULE: ModuleDef = ModuleDef {
    name: MODULE_NAME,
    doc: "Single-precision square exposed to scripting hosts.",
    methods: &METHODS,
};

pub fn module() -> &'static ModuleDef {
    &MODULE
}

fn call_square(args: &[Value]) -> Result<f64, Error> {
    let input = marshal::single_f32("square", args)?;
    Ok(f64::from(square::square(input)))
}

#[cfg(test)]
mod tests {
    use super::{MODULE_NAME, module};
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn registers_square_under_module_name() {
        let module = module();
        assert_eq!(module.name, MODULE_NAME);
        assert_eq!(module.method_names().collect::<Vec<_>>(), vec!["square"]);
        let method = module.get("square").expect("square registered");
        assert_eq!(method.doc, "Square function");
        assert!(std::ptr::eq(module, super::module()));
    }

    #[test]
    fn call_dispatches_to_square() {
        assert_eq!(module().call("square", &[json!(3.0)]).unwrap(), 9.0);
        assert_eq!(module().call("square", &[json!(-2)]).unwrap(), 4.0);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let err = module().call("cube", &[json!(2.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), Some("module 'pysimple' has no method 'cube'"));
    }

    #[test]
    fn result_is_the_widened_f32_square() {
        let out = module().call("square", &[json!(1.1)]).unwrap();
        assert_eq!(out, f64::from(1.1_f32 * 1.1_f32));
    }
}
