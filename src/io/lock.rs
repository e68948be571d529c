//! Cross-process serialization for `idea` write commands.
//!
//! The lock is an exclusive `flock` on `<data-dir>/.lock`. The file itself
//! is permanent: it is created on first use and never removed, so every
//! process contends on the same inode. Removing it on release would let a
//! waiter lock the unlinked inode while a newcomer locks a fresh file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

pub const LOCK_FILE: &str = ".lock";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive hold on a data directory, released when dropped.
#[derive(Debug)]
pub struct DataDirLock {
    // Closing the handle releases the flock
    _handle: File,
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("could not lock {path}: {source}")]
    Lock { path: PathBuf, source: io::Error },
    #[error("{path} is held by another idea command (waited {waited:?})")]
    Busy { path: PathBuf, waited: Duration },
}

impl DataDirLock {
    /// Take the data directory lock, polling until `timeout` has passed.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = data_dir.join(LOCK_FILE);
        let handle = open_lock_file(data_dir, &path)?;
        let deadline = Instant::now() + timeout;

        while !try_lock_exclusive(&handle).map_err(|source| LockError::Lock {
            path: path.clone(),
            source,
        })? {
            if Instant::now() >= deadline {
                return Err(LockError::Busy {
                    path,
                    waited: timeout,
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        debug!(path = %path.display(), "data dir locked");
        Ok(DataDirLock {
            _handle: handle,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_lock_file(data_dir: &Path, path: &Path) -> Result<File, LockError> {
    let open_err = |source| LockError::Open {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(data_dir).map_err(open_err)?;
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(open_err)
}

/// `Ok(false)` when another handle holds the lock.
#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<bool> {
    use std::os::unix::io::AsRawFd;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(code) if code == libc::EWOULDBLOCK || code == libc::EINTR => Ok(false),
        _ => Err(err),
    }
}

// No advisory locking off unix; commands run unserialized there.
#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> io::Result<bool> {
    Ok(true)
}
