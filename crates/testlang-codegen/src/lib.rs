// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Code generation: validated TestLang++ programs to Rust test source.
//!
//! Rendering is pure and deterministic; the only failure mode is the
//! output write, which commits atomically so a failed run never leaves a
//! truncated artifact behind.

mod generator;

pub use generator::{generate, Generator};

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A code generation failure.
#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("could not write `{}`", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Commit a generated document to `path`.
///
/// The document is written to a sibling temporary file and renamed into
/// place, so the destination is either absent or complete.
pub fn write_file(path: &Path, contents: &str) -> Result<(), CodeGenError> {
    let tmp = tmp_path(path);
    let result = std::fs::write(&tmp, contents).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result.map_err(|source| CodeGenError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("out"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("testlang-codegen-{}-{}.rs", std::process::id(), tag))
    }

    #[test]
    fn write_commits_contents() {
        let path = scratch_path("commit");
        write_file(&path, "// generated\n").expect("write failed");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read back failed"),
            "// generated\n"
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn write_replaces_existing_file() {
        let path = scratch_path("replace");
        write_file(&path, "old\n").expect("first write failed");
        write_file(&path, "new\n").expect("second write failed");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read back failed"),
            "new\n"
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn failed_write_leaves_no_artifact() {
        let path = Path::new("/nonexistent-testlang-dir/out.rs");
        let err = write_file(path, "contents").expect_err("write should fail");
        assert!(matches!(err, CodeGenError::WriteFailed { .. }));
        assert!(!path.exists());
    }
}
