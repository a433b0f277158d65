/*
Purpose: Link the Node binding against libpysimple.
Exports: None (build script only).
Role: Resolve libpysimple search path for the N-API addon.
Invariants: Uses PYSIMPLE_LIB_DIR or repo-local target/ outputs.
Notes: Fails fast when libpysimple cannot be located.
*/

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=PYSIMPLE_LIB_DIR");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let repo_root = crate_dir
        .ancestors()
        .nth(3)
        .expect("bindings/node/native should be three levels below repo root")
        .to_path_buf();

    let lib_dir = env::var("PYSIMPLE_LIB_DIR")
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain([
            repo_root.join("target").join("debug"),
            repo_root.join("target").join("release"),
        ])
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| {
            panic!("libpysimple not found; set PYSIMPLE_LIB_DIR or build target/debug/libpysimple.*")
        });

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=pysimple");
}
