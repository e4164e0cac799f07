//! Media domain: the configured root directory and the files inside it
//!
//! All access is read-only. Names coming from request paths are resolved
//! through [`MediaRoot::resolve`] or [`resolve_nested`], which refuse any
//! path that ends up outside its root after canonicalization.

mod file;
mod root;

pub use file::MediaFile;
pub use root::{resolve_nested, MediaRoot};
