//! Purpose: Configure linking for the CPython extension build.
//! Role: Cargo build-script; only active with the `extension-module` feature.
//! Invariants: Reruns when the public C header changes.
//! Invariants: Uses only Cargo-provided env vars.

fn main() {
    println!("cargo:rerun-if-changed=include/pysimple.h");

    // macOS resolves CPython symbols at import time rather than link time.
    #[cfg(feature = "extension-module")]
    pyo3_build_config::add_extension_module_link_args();
}
