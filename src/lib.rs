pub mod analyzers;
pub mod cli;
pub mod error;
pub mod filters;
pub mod geocode;
pub mod models;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
