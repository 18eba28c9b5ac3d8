// imgconv/src/processors/resizer.rs
use crate::core::ResizeAlgorithm;
use image::{DynamicImage, GenericImageView};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
    keep_aspect: bool,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm, keep_aspect: bool) -> Self {
        Self {
            algorithm,
            keep_aspect,
        }
    }

    /// Fits the image into `width x height`. With `keep_aspect` the image only
    /// ever shrinks; otherwise it is stretched to exactly the box.
    pub fn resize(&self, image: DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (new_width, new_height) = if self.keep_aspect {
            shrink_to_fit(orig_width, orig_height, width, height)
        } else {
            (width, height)
        };

        if new_width == orig_width && new_height == orig_height {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            new_width,
            new_height
        );

        image.resize_exact(new_width, new_height, self.algorithm.filter_type())
    }
}

/// Largest size with the original ratio that fits inside the box without
/// enlarging the source.
pub fn shrink_to_fit(orig_w: u32, orig_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if orig_w == 0 || orig_h == 0 || (orig_w <= box_w && orig_h <= box_h) {
        return (orig_w, orig_h);
    }

    let ratio_w = box_w as f64 / orig_w as f64;
    let ratio_h = box_h as f64 / orig_h as f64;
    let ratio = ratio_w.min(ratio_h);

    let new_w = ((orig_w as f64 * ratio).round() as u32).clamp(1, box_w.max(1));
    let new_h = ((orig_h as f64 * ratio).round() as u32).clamp(1, box_h.max(1));

    (new_w, new_h)
}
