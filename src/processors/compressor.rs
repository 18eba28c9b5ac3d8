// imgconv/src/processors/compressor.rs
use crate::core::{EncodeParams, Result};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct Compressor {
    params: EncodeParams,
}

impl Compressor {
    pub fn new(params: EncodeParams) -> Self {
        Self { params }
    }

    /// Writes the image to `path`, replacing any existing file.
    pub fn save(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        log::debug!("Saving image to {} with {:?}", path.display(), self.params);

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.encode(image, &mut writer)?;
        writer.flush()?;

        Ok(())
    }

    #[cfg(test)]
    fn compress_to_bytes(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(image, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(&self, image: &DynamicImage, writer: &mut W) -> Result<()> {
        match self.params {
            EncodeParams::Jpeg { quality } => {
                let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100));
                image.write_with_encoder(encoder)?;
            }
            EncodeParams::Png { compression_level } => {
                let encoder = PngEncoder::new_with_quality(
                    writer,
                    png_compression(compression_level),
                    FilterType::Adaptive,
                );
                image.write_with_encoder(encoder)?;
            }
            EncodeParams::Bmp => {
                image.write_with_encoder(BmpEncoder::new(writer))?;
            }
        }

        Ok(())
    }
}

/// Maps a zlib-style level (0-9) onto the encoder's presets.
pub fn png_compression(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=7 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}
