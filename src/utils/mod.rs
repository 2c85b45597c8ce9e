//! Utility modules for LIDO Fetch
//!
//! - `files`: output directory, record listing and image naming
//! - `http`: HTTP client and streamed downloads

pub mod files;
pub mod http;
