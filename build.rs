//! Build script for the embedded `default_repo` migrations.
//!
//! `embed_migrations!` reads the SQL files at compile time, which Cargo does
//! not track on its own, so a changed migration would otherwise leave a stale
//! binary behind.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-changed=build.rs");
}
