// imgconv/src/core/mod.rs
use image::imageops::FilterType;
use thiserror::Error;

pub mod processor;

pub const DEFAULT_JPEG_QUALITY: u8 = 85;
pub const DEFAULT_PNG_COMPRESSION: u8 = 6;
/// Largest accepted side of the target box.
pub const MAX_DIMENSION: u32 = 100_000;
/// Largest accepted target box area; a forced resize allocates all of it.
pub const MAX_PIXELS: u64 = 200_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl ResizeAlgorithm {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Fill colour used when transparency is dropped for a format without alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    White,
    Black,
}

impl Background {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Background::White => [255, 255, 255],
            Background::Black => [0, 0, 0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::Bmp => "BMP",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
        }
    }

    pub fn default_params(self) -> EncodeParams {
        match self {
            OutputFormat::Jpeg => EncodeParams::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
            OutputFormat::Png => EncodeParams::Png {
                compression_level: DEFAULT_PNG_COMPRESSION,
            },
            OutputFormat::Bmp => EncodeParams::Bmp,
        }
    }

    /// Only PNG keeps a per-pixel alpha channel on output.
    pub fn supports_alpha(self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    pub fn supports_quality(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

/// One row of the output format menu.
#[derive(Debug, Clone, Copy)]
pub struct FormatEntry {
    pub key: &'static str,
    pub format: OutputFormat,
}

pub const FORMATS: [FormatEntry; 3] = [
    FormatEntry {
        key: "1",
        format: OutputFormat::Jpeg,
    },
    FormatEntry {
        key: "2",
        format: OutputFormat::Png,
    },
    FormatEntry {
        key: "3",
        format: OutputFormat::Bmp,
    },
];

pub fn format_for_key(key: &str) -> Option<OutputFormat> {
    FORMATS
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.format)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeParams {
    Jpeg { quality: u8 },
    Png { compression_level: u8 },
    Bmp,
}

impl EncodeParams {
    fn matches(&self, format: OutputFormat) -> bool {
        matches!(
            (self, format),
            (EncodeParams::Jpeg { .. }, OutputFormat::Jpeg)
                | (EncodeParams::Png { .. }, OutputFormat::Png)
                | (EncodeParams::Bmp, OutputFormat::Bmp)
        )
    }
}

/// Everything the user chose for one run. Built once, read by every file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub format: OutputFormat,
    pub params: EncodeParams,
    pub width: u32,
    pub height: u32,
    pub keep_aspect: bool,
    pub auto_rotate: bool,
}

impl ConversionSettings {
    pub fn new(format: OutputFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            params: format.default_params(),
            width,
            height,
            keep_aspect: true,
            auto_rotate: false,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)
            .map_err(|e| ConvertError::InvalidParameter(format!("Target size: {}", e)))?;

        if !self.params.matches(self.format) {
            return Err(ConvertError::InvalidParameter(format!(
                "Encode parameters {:?} do not belong to {}",
                self.params,
                self.format.name()
            )));
        }

        if let EncodeParams::Jpeg { quality } = self.params {
            if !(1..=100).contains(&quality) {
                return Err(ConvertError::InvalidParameter(
                    "Quality must be between 1 and 100".to_string(),
                ));
            }
        }

        Ok(())
    }
}

pub fn validate_dimensions(width: u32, height: u32) -> std::result::Result<(), InputError> {
    for side in [width, height] {
        if side == 0 {
            return Err(InputError::NotPositive(0));
        }
        if side > MAX_DIMENSION {
            return Err(InputError::OutOfRange {
                value: side as i64,
                min: 1,
                max: MAX_DIMENSION as i64,
            });
        }
    }

    let pixels = width as u64 * height as u64;
    if pixels > MAX_PIXELS {
        return Err(InputError::TooManyPixels {
            width,
            height,
            max: MAX_PIXELS,
        });
    }

    Ok(())
}

/// Knobs that are not part of the interactive settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    pub algorithm: ResizeAlgorithm,
    pub background: Background,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            algorithm: ResizeAlgorithm::Bicubic,
            background: Background::White,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Directory scan error: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Input closed before the settings were complete")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Why a single answer at a prompt was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not one of the listed choices")]
    UnknownChoice(String),

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("{0} is not a positive number")]
    NotPositive(i64),

    #[error("{width}x{height} is larger than {max} pixels")]
    TooManyPixels { width: u32, height: u32, max: u64 },
}
