// imgconv/src/core/processor.rs
use super::{ConversionSettings, ProcessOptions, Result};
use crate::processors::{ColorNormalizer, Compressor, Loader, MetadataProcessor, Resizer};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Runs one file through decode, orientation, rotation, colour, resize and encode.
pub struct ImageProcessor {
    settings: ConversionSettings,
    loader: Loader,
    metadata_processor: MetadataProcessor,
    normalizer: ColorNormalizer,
    resizer: Resizer,
    compressor: Compressor,
}

impl ImageProcessor {
    pub fn new(settings: ConversionSettings, options: ProcessOptions) -> Self {
        let resizer = Resizer::new(options.algorithm, settings.keep_aspect);
        let compressor = Compressor::new(settings.params);

        Self {
            settings,
            loader: Loader::new(),
            metadata_processor: MetadataProcessor::new(),
            normalizer: ColorNormalizer::new(options.background),
            resizer,
            compressor,
        }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    pub fn process(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let image = self.loader.load(input_path)?;
        let orientation = self.metadata_processor.read_orientation(input_path);

        let image = self.transform(image, orientation);

        self.compressor.save(&image, output_path)
    }

    /// Every in-memory step between decode and encode, in order.
    pub fn transform(&self, image: DynamicImage, orientation: Option<u32>) -> DynamicImage {
        let image = self.prepare(image, orientation);
        let image = self.normalizer.normalize(image, self.settings.format);
        self.resizer
            .resize(image, self.settings.width, self.settings.height)
    }

    /// Orientation fix plus the optional portrait rotation; the geometry the
    /// resize step starts from.
    pub fn prepare(&self, image: DynamicImage, orientation: Option<u32>) -> DynamicImage {
        let image = self.metadata_processor.apply_orientation(image, orientation);

        let (width, height) = image.dimensions();
        if self.settings.auto_rotate && height > width {
            log::debug!("Rotating portrait image {}x{}", width, height);
            // counter-clockwise quarter turn, canvas grows to fit
            return image.rotate270();
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputFormat;
    use image::{Rgb, RgbImage, RgbaImage};

    fn processor(settings: ConversionSettings) -> ImageProcessor {
        ImageProcessor::new(settings, ProcessOptions::default())
    }

    #[test]
    fn portrait_is_rotated_before_resize() {
        let mut settings = ConversionSettings::new(OutputFormat::Png, 800, 800);
        settings.auto_rotate = true;
        let processor = processor(settings);

        let portrait = DynamicImage::ImageRgb8(RgbImage::new(1000, 2000));
        let prepared = processor.prepare(portrait.clone(), None);
        assert_eq!(prepared.dimensions(), (2000, 1000));

        let finished = processor.transform(portrait, None);
        assert_eq!(finished.dimensions(), (800, 400));
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        let mut settings = ConversionSettings::new(OutputFormat::Png, 10, 10);
        settings.auto_rotate = true;
        let processor = processor(settings);

        // 1x2 with red on top; after a left turn red sits on the left
        let mut buffer = RgbImage::new(1, 2);
        buffer.put_pixel(0, 0, Rgb([255, 0, 0]));
        let rotated = processor.prepare(DynamicImage::ImageRgb8(buffer), None);
        assert_eq!(rotated.dimensions(), (2, 1));
        assert_eq!(rotated.to_rgb8().get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn landscape_and_disabled_rotation_untouched() {
        let mut settings = ConversionSettings::new(OutputFormat::Png, 10, 10);
        settings.auto_rotate = true;
        let landscape = DynamicImage::ImageRgb8(RgbImage::new(30, 20));
        assert_eq!(processor(settings).prepare(landscape, None).dimensions(), (30, 20));

        let settings = ConversionSettings::new(OutputFormat::Png, 10, 10);
        let portrait = DynamicImage::ImageRgb8(RgbImage::new(20, 30));
        assert_eq!(processor(settings).prepare(portrait, None).dimensions(), (20, 30));
    }

    #[test]
    fn orientation_applies_before_portrait_check() {
        // landscape pixels tagged "rotate 90" become portrait, then auto-rotate turns them back
        let mut settings = ConversionSettings::new(OutputFormat::Png, 100, 100);
        settings.auto_rotate = true;
        let image = DynamicImage::ImageRgb8(RgbImage::new(30, 20));
        let prepared = processor(settings).prepare(image, Some(6));
        assert_eq!(prepared.dimensions(), (30, 20));
    }

    #[test]
    fn transparency_follows_target_format() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));

        let jpeg = processor(ConversionSettings::new(OutputFormat::Jpeg, 4, 4));
        assert!(!jpeg.transform(rgba.clone(), None).color().has_alpha());

        let png = processor(ConversionSettings::new(OutputFormat::Png, 4, 4));
        assert!(png.transform(rgba, None).color().has_alpha());
    }
}
