use anyhow::{Context, Result};
use clap::Parser;
use imgconv::{
    collect_image_paths, default_source_dir, file_name_lossy, BatchProcessor, Cli,
    SettingsCollector, TermPrompter,
};
use log::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let source_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => default_source_dir().context("Cannot locate the program directory")?,
    };

    println!("=== Image Converter ===");
    println!("Images found in {}:", source_dir.display());

    let images = collect_image_paths(&source_dir)
        .with_context(|| format!("Cannot read {}", source_dir.display()))?;

    if images.is_empty() {
        println!("No images to process!");
        return Ok(());
    }

    for path in &images {
        println!("- {}", file_name_lossy(path));
    }

    println!();
    let mut collector = SettingsCollector::new(TermPrompter::new());
    if !collector.confirm("Start conversion? (y/n)")? {
        println!("Cancelled by user.");
        return Ok(());
    }

    let settings = collector.collect()?;
    let processor = BatchProcessor::new(settings, cli.process_options())?;
    let report = processor
        .process_directory(&source_dir)
        .with_context(|| format!("Batch conversion in {} failed", source_dir.display()))?;

    println!("\nDone! Files processed: {}", report.processed);
    println!("Results saved to: {}", report.output_dir.display());

    Ok(())
}
