// imgconv/src/processors/mod.rs
mod batch;
mod color;
mod compressor;
mod loader;
mod metadata;
mod resizer;

pub use batch::{BatchProcessor, BatchReport};
pub use color::{flatten, ColorNormalizer};
pub use compressor::{png_compression, Compressor};
pub use loader::Loader;
pub use metadata::MetadataProcessor;
pub use resizer::{shrink_to_fit, Resizer};

