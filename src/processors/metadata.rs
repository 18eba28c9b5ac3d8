// imgconv/src/processors/metadata.rs
use exif::{In, Reader, Tag};
use image::metadata::Orientation;
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone, Default)]
pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Reads the EXIF orientation tag (1-8). Files without EXIF, or whose EXIF
    /// cannot be parsed, report `None`.
    pub fn read_orientation(&self, path: &Path) -> Option<u32> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Cannot open {} for EXIF: {}", path.display(), e);
                return None;
            }
        };
        let mut bufreader = BufReader::new(file);

        let exif = match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found in {}", path.display());
                return None;
            }
            Err(e) => {
                log::debug!("Ignoring unreadable EXIF in {}: {}", path.display(), e);
                return None;
            }
        };

        exif.get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
    }

    /// Bakes an EXIF orientation into the pixels. Unknown values leave the
    /// image untouched.
    pub fn apply_orientation(&self, mut image: DynamicImage, orientation: Option<u32>) -> DynamicImage {
        let Some(value) = orientation else {
            return image;
        };

        match u8::try_from(value).ok().and_then(Orientation::from_exif) {
            Some(Orientation::NoTransforms) => {}
            Some(transform) => {
                log::debug!("Applying EXIF orientation {} ({:?})", value, transform);
                image.apply_orientation(transform);
            }
            None => log::warn!("Ignoring invalid EXIF orientation value {}", value),
        }

        image
    }
}
