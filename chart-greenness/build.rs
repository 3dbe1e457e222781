//! Build script for chart-greenness.
//!
//! Copies the cleaned municipality greenness CSV to OUT_DIR so `main.rs` can
//! embed it via `include_str!`. A missing fixture becomes an empty file,
//! which the app reports as an empty dataset.

use std::env;
use std::fs;
use std::path::Path;

const FIXTURE: &str = "../fixtures/cleaned_data.csv";

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("cleaned_data.csv");

    match fs::copy(FIXTURE, &dest) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::write(&dest, "").unwrap();
            println!(
                "cargo:warning=Greenness data {} not found, the dashboard will start empty",
                FIXTURE
            );
        }
        Err(e) => panic!("Failed to copy {} to {}: {}", FIXTURE, dest.display(), e),
    }

    println!("cargo:rerun-if-changed={}", FIXTURE);
    println!("cargo:rerun-if-changed=build.rs");
}
