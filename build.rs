use std::{env, fs, path::Path};

use threshold_config_compiler::generate_from_path;

const FORCE_CONFIG: &str = "config/force.toml";

fn main() {
    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join(FORCE_CONFIG);
    println!("cargo:rerun-if-changed={FORCE_CONFIG}");

    let source = match generate_from_path(&config) {
        Ok(source) => source,
        Err(err) => panic!("{FORCE_CONFIG} rejected: {err}"),
    };

    let Some(out_dir) = env::var_os("OUT_DIR") else {
        panic!("OUT_DIR is not set for the build script");
    };
    let target = Path::new(&out_dir).join("force_config.rs");
    if let Err(err) = fs::write(&target, source) {
        panic!("cannot write {}: {err}", target.display());
    }
}
