//! Download the images referenced by a directory of LIDO metadata records.

pub mod error;
pub mod fetch;
pub mod lido;
pub mod logging;
pub mod utils;

pub use error::{FetchError, RecordError, RetrieveError};
pub use fetch::{run_batch, BatchReport, FailurePolicy, FetchConfig};
