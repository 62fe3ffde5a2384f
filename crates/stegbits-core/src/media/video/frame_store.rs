use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::TempDir;

use crate::{Result, StegError};

const PREFIX: &str = "stegbits-frames-";

/// A uniquely named scratch directory holding the frames of one video
/// operation as `<n>.png`.
///
/// The directory and everything in it is removed when the store is dropped,
/// read-only entries included.
#[derive(Debug)]
pub struct FrameStore {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl FrameStore {
    /// creates the directory below `temp_root`, or below the system temp dir
    pub fn new(temp_root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let dir = match temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|source| StegError::WriteError {
            path: temp_root.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir),
            source,
        })?;
        let path = dir.path().to_path_buf();
        debug!("frame store at {path:?}");

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// the frame file name pattern as understood by ffmpeg
    pub fn pattern(&self) -> PathBuf {
        self.path.join("%d.png")
    }

    /// all `<n>.png` files ordered by `n`, anything else is ignored
    pub fn frames(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.path).map_err(|source| StegError::ReadError {
            path: self.path.clone(),
            source,
        })?;

        let mut frames = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if let Some(n) = frame_number(&path) {
                frames.push((n, path));
            }
        }
        frames.sort_unstable_by_key(|(n, _)| *n);

        Ok(frames.into_iter().map(|(_, p)| p).collect())
    }

    /// removes the directory now and reports failures
    pub fn close(mut self) -> Result<()> {
        self.remove()
    }

    fn remove(&mut self) -> Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        make_writable(dir.path());
        dir.close().map_err(|source| StegError::WriteError {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            warn!("could not remove frame store {:?}: {e}", self.path);
        }
    }
}

fn frame_number(path: &Path) -> Option<u64> {
    if !path.extension()?.eq_ignore_ascii_case("png") {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

fn make_writable(path: &Path) {
    let Ok(entries) = fs::read_dir(path) else {
        return;
    };
    for entry in entries.flatten() {
        let p = entry.path();
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if meta.is_dir() {
            make_writable(&p);
        }
        let mut perms = meta.permissions();
        if perms.readonly() {
            set_writable(&mut perms);
            if let Err(e) = fs::set_permissions(&p, perms) {
                warn!("could not make {p:?} writable: {e}");
            }
        }
    }
}

#[cfg(unix)]
fn set_writable(perms: &mut fs::Permissions) {
    use std::os::unix::fs::PermissionsExt;
    perms.set_mode(perms.mode() | 0o200);
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn set_writable(perms: &mut fs::Permissions) {
    perms.set_readonly(false);
}
