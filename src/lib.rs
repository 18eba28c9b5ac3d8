mod cli;
mod core;
mod interactive;
mod processors;
mod utils;

pub use crate::cli::{Algorithm, BackgroundArg, Cli};
pub use crate::core::processor::ImageProcessor;
pub use crate::core::{
    format_for_key, validate_dimensions, Background, ConversionSettings, ConvertError,
    EncodeParams, FormatEntry, InputError, OutputFormat, ProcessOptions, ResizeAlgorithm, Result,
    DEFAULT_JPEG_QUALITY, DEFAULT_PNG_COMPRESSION, FORMATS, MAX_DIMENSION, MAX_PIXELS,
};
pub use crate::interactive::{
    parse_dimension, parse_format_choice, parse_quality, parse_yes_no, Prompter,
    SettingsCollector, TermPrompter, Validator,
};
pub use crate::processors::{
    flatten, png_compression, shrink_to_fit, BatchProcessor, BatchReport, ColorNormalizer,
    Compressor, Loader, MetadataProcessor, Resizer,
};
pub use crate::utils::{
    collect_image_paths, default_source_dir, file_name_lossy, generate_output_path,
    is_supported_format, OUTPUT_DIR_NAME, VALID_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchProcessor, ConversionSettings, ImageProcessor, OutputFormat, ProcessOptions,
        SettingsCollector,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
