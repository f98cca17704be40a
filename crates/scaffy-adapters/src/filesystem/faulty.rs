//! Fault-injecting filesystem wrapper for testing.
//!
//! Wraps any [`Filesystem`] and makes selected operations fail, either on
//! every call or only for paths accepted by a predicate. Everything else is
//! forwarded to the inner filesystem.
//!
//! ```no_run
//! use scaffy_adapters::filesystem::{FaultOp, FaultyFilesystem, LocalFilesystem};
//!
//! let fs = FaultyFilesystem::new(LocalFilesystem::new())
//!     .fail_when(FaultOp::WriteFile, |p| p.extension().is_some_and(|e| e == "py"));
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use scaffy_core::application::ports::{EntryKind, Filesystem};
use tracing::debug;

/// Filesystem operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultOp {
    Stat,
    CreateDirAll,
    WriteFile,
    Remove,
    RemoveDirAll,
    ReadDir,
}

impl fmt::Display for FaultOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stat => "stat",
            Self::CreateDirAll => "create_dir_all",
            Self::WriteFile => "write_file",
            Self::Remove => "remove",
            Self::RemoveDirAll => "remove_dir_all",
            Self::ReadDir => "read_dir",
        };
        f.write_str(name)
    }
}

type PathFilter = Box<dyn Fn(&Path) -> bool + Send + Sync>;

struct Fault {
    op: FaultOp,
    filter: Option<PathFilter>,
    kind: io::ErrorKind,
}

impl Fault {
    fn applies(&self, op: FaultOp, path: &Path) -> bool {
        self.op == op && self.filter.as_ref().is_none_or(|f| f(path))
    }
}

/// A [`Filesystem`] that fails on demand.
pub struct FaultyFilesystem<F> {
    inner: F,
    faults: Vec<Fault>,
    injected: Mutex<Vec<(FaultOp, PathBuf)>>,
}

impl<F: Filesystem> FaultyFilesystem<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            faults: Vec::new(),
            injected: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call to `op`.
    pub fn fail(self, op: FaultOp) -> Self {
        self.push(op, None, io::ErrorKind::Other)
    }

    /// Fail calls to `op` whose path satisfies `filter`.
    pub fn fail_when(
        self,
        op: FaultOp,
        filter: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.push(op, Some(Box::new(filter)), io::ErrorKind::Other)
    }

    /// Fail every call to `op` with an error of the given kind.
    pub fn fail_with(self, op: FaultOp, kind: io::ErrorKind) -> Self {
        self.push(op, None, kind)
    }

    /// Operations that were failed so far, in call order.
    pub fn injected(&self) -> Vec<(FaultOp, PathBuf)> {
        self.injected.lock().clone()
    }

    fn push(mut self, op: FaultOp, filter: Option<PathFilter>, kind: io::ErrorKind) -> Self {
        self.faults.push(Fault { op, filter, kind });
        self
    }

    fn check(&self, op: FaultOp, path: &Path) -> io::Result<()> {
        match self.faults.iter().find(|f| f.applies(op, path)) {
            Some(fault) => {
                debug!(%op, path = %path.display(), "injecting filesystem fault");
                self.injected.lock().push((op, path.to_path_buf()));
                Err(io::Error::new(fault.kind, format!("injected {op} failure")))
            }
            None => Ok(()),
        }
    }
}

impl<F: Filesystem> Filesystem for FaultyFilesystem<F> {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        self.check(FaultOp::Stat, path)?;
        self.inner.stat(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(FaultOp::CreateDirAll, path)?;
        self.inner.create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        self.check(FaultOp::WriteFile, path)?;
        self.inner.write_file(path, contents, mode)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.check(FaultOp::Remove, path)?;
        self.inner.remove(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(FaultOp::RemoveDirAll, path)?;
        self.inner.remove_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.check(FaultOp::ReadDir, path)?;
        self.inner.read_dir(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::LocalFilesystem;
    use tempfile::TempDir;

    #[test]
    fn unmatched_operations_pass_through() {
        let tmp = TempDir::new().unwrap();
        let fs = FaultyFilesystem::new(LocalFilesystem::new()).fail(FaultOp::Remove);
        let file = tmp.path().join("a.c");

        fs.write_file(&file, b"int x;", 0o600).unwrap();
        assert!(file.exists());

        let err = fs.remove(&file).unwrap_err();
        assert_eq!(err.to_string(), "injected remove failure");
        assert!(file.exists());
        assert_eq!(fs.injected(), vec![(FaultOp::Remove, file)]);
    }

    #[test]
    fn path_filter_limits_the_fault() {
        let tmp = TempDir::new().unwrap();
        let fs = FaultyFilesystem::new(LocalFilesystem::new())
            .fail_when(FaultOp::WriteFile, |p| p.ends_with("app.py"));

        assert!(fs.write_file(&tmp.path().join("app.go"), b"", 0o600).is_ok());
        assert!(fs.write_file(&tmp.path().join("app.py"), b"", 0o600).is_err());
        assert!(!tmp.path().join("app.py").exists());
    }

    #[test]
    fn custom_error_kind() {
        let tmp = TempDir::new().unwrap();
        let fs = FaultyFilesystem::new(LocalFilesystem::new())
            .fail_with(FaultOp::Stat, io::ErrorKind::PermissionDenied);

        assert_eq!(
            fs.stat(tmp.path()).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
    }
}
