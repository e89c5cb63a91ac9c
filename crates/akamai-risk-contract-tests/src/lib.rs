//! Locates frozen contract schemas and fixtures under the workspace
//! `contracts/` directory.

use std::path::PathBuf;

/// Returns absolute path of a file under `contracts/`.
pub fn contract_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../contracts")
        .join(relative)
}
