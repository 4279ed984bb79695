use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

use neurojaccard::compare_mask_files;

pub const USAGE: &str = "Usage: neurojaccard mask1.nii.gz mask2.nii.gz";

#[derive(Parser, Debug)]
#[command(name = "neurojaccard")]
#[command(about = "Jaccard index (intersection over union) of two binary brain masks.", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// First mask volume (.nii, .nii.gz, .mgh or .mgz). Voxels with a value > 0 are inside the mask.
    mask1: PathBuf,
    /// Second mask volume, on the same voxel grid as the first one.
    mask2: PathBuf,
    /// Log progress to stderr. Repeat for more detail. The only accepted option besides the two paths.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Compare the two mask files and return their Jaccard index.
    pub fn run_program(&self) -> neurojaccard::Result<f64> {
        info!("Comparing masks '{}' and '{}'.", self.mask1.display(), self.mask2.display());
        let score = compare_mask_files(&self.mask1, &self.mask2)?;
        info!("Jaccard index is {}.", score);
        Ok(score)
    }
}
