// imgconv/src/processors/batch.rs
use crate::core::processor::ImageProcessor;
use crate::core::{ConversionSettings, ConvertError, ProcessOptions, Result};
use crate::utils::{collect_image_paths, file_name_lossy, generate_output_path, OUTPUT_DIR_NAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub output_dir: PathBuf,
    /// `(file name, error text)` for each file that was skipped.
    pub failures: Vec<(String, String)>,
}

pub struct BatchProcessor {
    processor: ImageProcessor,
}

impl BatchProcessor {
    pub fn new(settings: ConversionSettings, options: ProcessOptions) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            processor: ImageProcessor::new(settings, options),
        })
    }

    /// Converts every supported file directly inside `input_dir` into
    /// `input_dir/converted`. A failing file is logged and skipped; only
    /// directory-level problems abort the run.
    pub fn process_directory(&self, input_dir: &Path) -> Result<BatchReport> {
        self.validate_input_dir(input_dir)?;

        let output_dir = input_dir.join(OUTPUT_DIR_NAME);
        std::fs::create_dir_all(&output_dir)?;

        let image_paths = collect_image_paths(input_dir)?;
        log::debug!(
            "Processing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        let extension = self.processor.settings().extension();
        let mut report = BatchReport {
            output_dir,
            ..Default::default()
        };

        for input_path in &image_paths {
            let file_name = file_name_lossy(input_path);

            let result = generate_output_path(input_path, &report.output_dir, extension)
                .and_then(|output_path| {
                    self.processor.process(input_path, &output_path)?;
                    Ok(output_path)
                });

            match result {
                Ok(output_path) => {
                    report.processed += 1;
                    log::info!("Converted: {} → {}", file_name, file_name_lossy(&output_path));
                }
                Err(e) => {
                    log::error!("Failed to process {}: {}", file_name, e);
                    report.failures.push((file_name, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    fn validate_input_dir(&self, input_dir: &Path) -> Result<()> {
        if !input_dir.is_dir() {
            return Err(ConvertError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        Ok(())
    }
}
