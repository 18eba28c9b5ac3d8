// imgconv/src/processors/color.rs
use crate::core::{Background, OutputFormat};
use image::{ColorType, DynamicImage, Rgb, RgbImage};

/// Brings decoded pixels into a colour type the target encoder accepts.
pub struct ColorNormalizer {
    background: Background,
}

impl ColorNormalizer {
    pub fn new(background: Background) -> Self {
        Self { background }
    }

    pub fn normalize(&self, image: DynamicImage, format: OutputFormat) -> DynamicImage {
        if format.supports_alpha() {
            return image;
        }

        if image.color().has_alpha() {
            log::debug!(
                "Flattening {:?} onto {:?} for {}",
                image.color(),
                self.background,
                format.name()
            );
            return DynamicImage::ImageRgb8(flatten(&image, self.background.rgb()));
        }

        match image.color() {
            ColorType::L8 | ColorType::Rgb8 => image,
            other => {
                log::debug!("Converting {:?} to 8-bit RGB for {}", other, format.name());
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
        }
    }
}

/// Alpha-composites every pixel over an opaque background colour.
pub fn flatten(image: &DynamicImage, background: [u8; 3]) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |fg: u8, bg: u8| -> u8 {
            let a = a as u32;
            ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
        };
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};

    fn half_transparent_red() -> DynamicImage {
        let mut buffer = RgbaImage::new(2, 1);
        buffer.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        buffer.put_pixel(1, 0, Rgba([255, 0, 0, 0]));
        DynamicImage::ImageRgba8(buffer)
    }

    #[test]
    fn flatten_uses_the_background_for_transparent_pixels() {
        let flat = flatten(&half_transparent_red(), [255, 255, 255]);
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([255, 255, 255]));

        let flat = flatten(&half_transparent_red(), [0, 0, 0]);
        assert_eq!(flat.get_pixel(1, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn flatten_blends_partial_alpha() {
        let buffer = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flat = flatten(&DynamicImage::ImageRgba8(buffer), [255, 255, 255]);
        assert_eq!(flat.get_pixel(0, 0), &Rgb([127, 127, 127]));
    }

    #[test]
    fn alpha_dropped_for_jpeg_and_bmp_only() {
        let normalizer = ColorNormalizer::new(Background::White);

        let jpeg = normalizer.normalize(half_transparent_red(), OutputFormat::Jpeg);
        assert_eq!(jpeg.color(), ColorType::Rgb8);

        let bmp = normalizer.normalize(half_transparent_red(), OutputFormat::Bmp);
        assert_eq!(bmp.color(), ColorType::Rgb8);

        let png = normalizer.normalize(half_transparent_red(), OutputFormat::Png);
        assert_eq!(png.color(), ColorType::Rgba8);
    }

    #[test]
    fn opaque_eight_bit_images_pass_through() {
        let normalizer = ColorNormalizer::new(Background::White);
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([9])));
        assert_eq!(
            normalizer.normalize(gray, OutputFormat::Jpeg).color(),
            ColorType::L8
        );
    }

    #[test]
    fn sixteen_bit_images_are_narrowed_for_jpeg() {
        let normalizer = ColorNormalizer::new(Background::White);
        let deep: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(2, 2, Luma([4000]));
        let image = DynamicImage::ImageLuma16(deep);
        assert_eq!(
            normalizer.normalize(image, OutputFormat::Jpeg).color(),
            ColorType::Rgb8
        );
    }
}
