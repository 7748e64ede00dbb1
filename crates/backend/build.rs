use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Places the workspace config.toml next to the built binary, where
// `shared::config::load_config` looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=cannot locate the target profile directory, skipping config.toml");
        return;
    };

    if !source.exists() {
        println!("cargo:warning=no config.toml at {:?}, the embedded defaults apply", source);
        return;
    }

    let dest = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source, &dest) {
        panic!("failed to copy config.toml to {:?}: {}", dest, e);
    }
}

/// OUT_DIR is `target/<profile>/build/<pkg>/out`; walk up to `target/<profile>`
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
