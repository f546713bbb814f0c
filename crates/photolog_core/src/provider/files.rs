//! File store contract and local filesystem implementation.

use std::fs;
use std::io;
use std::path::Path;

/// Filesystem collaborator used to adopt and remove photo files.
pub trait FileStore {
    /// Copies `src` to `dst`. `dst` must not already exist.
    fn copy(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Removes the file at `path`. An absent file is success: the goal
    /// state ("file gone") is already satisfied.
    fn remove(&self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// `FileStore` over the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn copy(&self, src: &Path, dst: &Path) -> io::Result<()> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dst)?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
