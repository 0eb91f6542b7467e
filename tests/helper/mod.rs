//! Shared test utilities

pub mod fixtures;
pub mod lister;

pub use fixtures::{write_descriptor, write_overrides};
pub use lister::FakeRefLister;
