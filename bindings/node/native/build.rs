/*
Purpose: Link the Node addon against libkeelstone.
Exports: None (build script only).
Role: N-API linker setup plus engine library search-path resolution.
Invariants: Uses KEELSTONE_LIB_DIR or repo-local target/ outputs.
Notes: Missing engine library downgrades to a warning; `kst_` symbols then
resolve when the host process loads the addon alongside the engine.
Notes: Reruns when KEELSTONE_LIB_DIR changes.
*/

use std::env;
use std::path::PathBuf;

fn main() {
    napi_build::setup();

    println!("cargo:rerun-if-env-changed=KEELSTONE_LIB_DIR");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let repo_root = crate_dir
        .parent()
        .and_then(|path| path.parent())
        .and_then(|path| path.parent())
        .expect("bindings/node/native should be three levels below repo root")
        .to_path_buf();

    let candidates = env::var("KEELSTONE_LIB_DIR")
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain([
            repo_root.join("target").join("debug"),
            repo_root.join("target").join("release"),
        ]);

    let mut found = None;
    for candidate in candidates {
        if candidate.join(lib_file_name()).exists() {
            found = Some(candidate);
            break;
        }
    }

    match found {
        Some(lib_dir) => {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
            println!("cargo:rustc-link-lib=keelstone");
        }
        None => {
            println!(
                "cargo:warning=libkeelstone not found; set KEELSTONE_LIB_DIR to link at build time"
            );
        }
    }
}

fn lib_file_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "keelstone.lib"
    } else if cfg!(target_os = "macos") {
        "libkeelstone.dylib"
    } else {
        "libkeelstone.so"
    }
}
