//! Purpose: CPython extension module `pysimple` built with pyo3.
//! Exports: `pysimple.square`, `pysimple.InvalidArgument`, `pysimple.__version__`.
//! Role: Host binding; marshals a Python call into the pure f32 computation.
//! Invariants: Exactly one argument; conversion follows CPython's float protocol.
//! Invariants: `InvalidArgument` subclasses `TypeError`; `except TypeError` still catches it.
use crate::api::{self, Error, ErrorKind, marshal};
use pyo3::create_exception;
use pyo3::exceptions::{PyAttributeError, PyRuntimeError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::PyTuple;

create_exception!(
    pysimple,
    InvalidArgument,
    PyTypeError,
    "Wrong number of arguments, or an argument that is not a real number."
);

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        let message = err.message().unwrap_or("").to_string();
        match err.kind() {
            ErrorKind::InvalidArgument => InvalidArgument::new_err(message),
            ErrorKind::NotFound => PyAttributeError::new_err(message),
            ErrorKind::Internal => PyRuntimeError::new_err(message),
        }
    }
}

/// Square function
#[pyfunction]
#[pyo3(signature = (*args))]
fn square(args: &Bound<'_, PyTuple>) -> PyResult<f64> {
    marshal::expect_arity("square", args.len(), 1)?;
    let item = args.get_item(0)?;
    let wide: f64 = match item.extract() {
        Ok(wide) => wide,
        Err(err) if err.is_instance_of::<PyTypeError>(args.py()) => {
            let type_name = item.get_type().name()?;
            return Err(marshal::not_a_number("square", 0, &type_name.to_string()).into());
        }
        // OverflowError, and anything raised inside `__float__`, reach the caller unchanged.
        Err(err) => return Err(err),
    };
    Ok(f64::from(api::square(wide as f32)))
}

#[pymodule]
fn pysimple(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(square, m)?)?;
    m.add("InvalidArgument", m.py().get_type_bound::<InvalidArgument>())?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__doc__", api::module().doc)?;
    Ok(())
}

#[cfg(all(test, not(feature = "extension-module")))]
mod tests {
    use super::InvalidArgument;
    use crate::api;
    use pyo3::exceptions::{PyOverflowError, PyTypeError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::{PyDict, PyModule};

    fn with_module(check: impl FnOnce(Python<'_>, &Bound<'_, PyModule>)) {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let module = pyo3::wrap_pymodule!(super::pysimple)(py);
            check(py, module.bind(py));
        });
    }

    fn square_of(module: &Bound<'_, PyModule>, args: impl IntoPy<Py<pyo3::types::PyTuple>>) -> PyResult<f64> {
        module.getattr("square")?.call1(args)?.extract()
    }

    #[test]
    fn squares_floats_and_ints() {
        with_module(|_py, module| {
            assert_eq!(square_of(module, (0.0_f64,)).unwrap(), 0.0);
            assert_eq!(square_of(module, (-2.0_f64,)).unwrap(), 4.0);
            assert_eq!(square_of(module, (3.0_f64,)).unwrap(), 9.0);
            assert_eq!(square_of(module, (3_i64,)).unwrap(), 9.0);
            assert_eq!(square_of(module, (true,)).unwrap(), 1.0);
        });
    }

    #[test]
    fn result_keeps_single_precision() {
        with_module(|_py, module| {
            assert_eq!(square_of(module, (1.1_f64,)).unwrap(), f64::from(1.1_f32 * 1.1_f32));
            assert_eq!(square_of(module, (1e20_f64,)).unwrap(), f64::INFINITY);
        });
    }

    #[test]
    fn bad_calls_raise_invalid_argument() {
        with_module(|py, module| {
            let square = module.getattr("square").unwrap();

            let err = square.call0().unwrap_err();
            assert!(err.is_instance_of::<InvalidArgument>(py));
            assert!(err.is_instance_of::<PyTypeError>(py));
            assert_eq!(
                err.value_bound(py).to_string(),
                "square() takes exactly one argument (0 given)"
            );

            let err = square.call1((1.0_f64, 2.0_f64)).unwrap_err();
            assert!(err.is_instance_of::<InvalidArgument>(py));

            let err = square.call1(("3.0",)).unwrap_err();
            assert!(err.is_instance_of::<InvalidArgument>(py));
            assert_eq!(
                err.value_bound(py).to_string(),
                "square() argument 1 must be a real number, not str"
            );
        });
    }

    #[test]
    fn conversion_errors_other_than_type_errors_pass_through() {
        with_module(|py, module| {
            let square = module.getattr("square").unwrap();

            let huge = py.eval_bound("10**400", None, None).unwrap();
            let err = square.call1((huge,)).unwrap_err();
            assert!(err.is_instance_of::<PyOverflowError>(py));
            assert!(!err.is_instance_of::<InvalidArgument>(py));

            let locals = PyDict::new_bound(py);
            py.run_bound(
                "class Fails:\n    def __float__(self):\n        raise ValueError('boom')\n\n\
                 class Converts:\n    def __float__(self):\n        return 1.5\n",
                None,
                Some(&locals),
            )
            .unwrap();

            let fails = locals.get_item("Fails").unwrap().unwrap().call0().unwrap();
            let err = square.call1((fails,)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
            assert!(!err.is_instance_of::<InvalidArgument>(py));
            assert_eq!(err.value_bound(py).to_string(), "boom");

            let converts = locals.get_item("Converts").unwrap().unwrap().call0().unwrap();
            let out: f64 = square.call1((converts,)).unwrap().extract().unwrap();
            assert_eq!(out, 2.25);
        });
    }

    #[test]
    fn module_exposes_every_registered_method() {
        with_module(|_py, module| {
            for name in api::module().method_names() {
                assert!(module.hasattr(name).unwrap(), "missing {name}");
            }
            assert!(module.hasattr("InvalidArgument").unwrap());
            let version: String = module.getattr("__version__").unwrap().extract().unwrap();
            assert_eq!(version, env!("CARGO_PKG_VERSION"));
        });
    }
}
