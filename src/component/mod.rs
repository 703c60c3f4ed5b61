//! Feature components
//!
//! Each submodule holds one feature: its driver plus the helpers only it uses.

pub mod media_cleaner;

pub use media_cleaner::MediaCleaner;
