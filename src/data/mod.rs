//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::{DataLoader, LoadReport, LoaderError};
pub use processor::{DataProcessor, ProcessorError, DESCRIPTION_COLUMN};
