use std::fs;
use std::path::PathBuf;

use clap::CommandFactory;

// Pull in cli.rs directly -- it only depends on clap (a build-dependency),
// so this compiles cleanly without dragging in the rest of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    // Re-run if the CLI definitions change.
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .expect("OUT_DIR not set by Cargo")
        .into();
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    let cmd = cli::Cli::command();
    let path = man_dir.join(format!("{}.1", cmd.get_name()));

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("failed to render man page: {e}"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
