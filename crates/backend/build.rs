use std::env;
use std::fs;
use std::path::Path;

// Places the workspace config.toml next to the built binary, where
// `shared::config::load_config` looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR is target/<profile>/build/<pkg>-<hash>/out
    let Some(target_dir) = Path::new(&out_dir).ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=no {profile} directory above OUT_DIR, config.toml not copied");
        return;
    };

    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !config.exists() {
        println!("cargo:warning=no workspace config.toml, the embedded defaults apply");
        return;
    }

    if let Err(e) = fs::copy(&config, target_dir.join("config.toml")) {
        println!("cargo:warning=failed to copy config.toml: {e}");
    }
}
