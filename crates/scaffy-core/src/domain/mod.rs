//! Core domain layer for Scaffy.
//!
//! Pure data and rules: what a scaffold request looks like and how user
//! supplied names are checked and normalised. No I/O happens here.

pub mod request;
pub mod validation;

pub use request::ScaffoldRequest;
pub use validation::{MAX_NAME_LENGTH, NameError};
