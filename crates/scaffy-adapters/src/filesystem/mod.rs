//! Filesystem adapters.

mod faulty;
mod local;

pub use faulty::{FaultOp, FaultyFilesystem};
pub use local::{DIR_MODE, LocalFilesystem};
