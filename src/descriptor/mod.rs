//! Descriptor layer
//! - types.rs: PackageRecord, the catalog entry
//! - host.rs: accepted hosting links, short and prefixed forms
//! - reader.rs: descriptor tree walking and decoding
//! - writer.rs: aggregate index output
//! - error.rs: DescriptorError

pub mod error;
pub mod host;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::DescriptorError;
pub use host::{GitHost, is_accepted_link, prefixed_git_link, shorten_git_link};
pub use reader::{LoadedIndex, load_descriptor, load_index};
pub use types::PackageRecord;
pub use writer::write_index;
