// imgconv/src/cli.rs
use crate::core::{Background, ProcessOptions, ResizeAlgorithm};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "imgconv", version, about = "Convert every image in a folder to one format and size")]
pub struct Cli {
    /// Folder to convert (defaults to the folder holding this program)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Resampling filter used when resizing
    #[arg(long, value_enum, default_value_t = Algorithm::Bicubic)]
    pub filter: Algorithm,

    /// Colour transparent pixels become when the target has no alpha
    #[arg(long, value_enum, default_value_t = BackgroundArg::White)]
    pub background: BackgroundArg,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            algorithm: self.filter.into(),
            background: self.background.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackgroundArg {
    White,
    Black,
}

impl From<BackgroundArg> for Background {
    fn from(background: BackgroundArg) -> Self {
        match background {
            BackgroundArg::White => Background::White,
            BackgroundArg::Black => Background::Black,
        }
    }
}
