//! Release discovery layer
//!
//! Turns a repository URL into the list of release-like names its remote
//! advertises.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  RefLister  │────▶│    refs     │────▶│  classifier  │
//! │(ls-remote)  │     │ (parse)     │     │(release-like)│
//! └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: release-like name heuristic
//! - [`refs`]: `git ls-remote` output parsing
//! - [`lister`]: `RefLister` trait and the git CLI implementation
//! - [`error`]: `RemoteError`

pub mod classifier;
pub mod error;
pub mod lister;
pub mod refs;

pub use classifier::{VersionClassifier, is_release_like};
pub use error::RemoteError;
pub use lister::{GitRefLister, RefLister};
pub use refs::parse_remote_refs;
