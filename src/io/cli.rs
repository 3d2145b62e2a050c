//! Command-line interface for batch analysis of grid files

use crate::algorithm::fragmentation::create_labeled_matrix;
use crate::algorithm::pipeline::{AnalysisConfig, analyze};
use crate::algorithm::preprocessing::{Binarization, LocalThresholdMethod};
use crate::algorithm::skeletonization::ThinningAlgorithm;
use crate::io::configuration::{
    DEFAULT_MAX_ITERATIONS, GRID_FILE_EXTENSION, LABELS_SUFFIX, REPORT_SUFFIX, SKELETON_SUFFIX,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::grid_file::load_grid;
use crate::io::image::{export_labels_png, export_skeleton_png};
use crate::io::progress::ProgressManager;
use crate::io::report::full_report;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Thinning algorithm selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Zhang-Suen two sub-pass thinning
    ZhangSuen,
    /// K3M six-phase thinning
    K3m,
}

impl From<AlgorithmArg> for ThinningAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::ZhangSuen => Self::ZhangSuen,
            AlgorithmArg::K3m => Self::K3m,
        }
    }
}

/// Binarization selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BinarizationArg {
    /// Global threshold chosen by Otsu's method
    Otsu,
    /// Global threshold at 128
    Fixed,
    /// Local mean + k * std
    Niblack,
    /// Local Sauvola threshold
    Sauvola,
    /// Local Phansalkar threshold
    Phansalkar,
}

impl From<BinarizationArg> for Binarization {
    fn from(arg: BinarizationArg) -> Self {
        match arg {
            BinarizationArg::Otsu => Self::Otsu,
            BinarizationArg::Fixed => Self::fixed(),
            BinarizationArg::Niblack => Self::local(LocalThresholdMethod::Niblack),
            BinarizationArg::Sauvola => Self::local(LocalThresholdMethod::Sauvola),
            BinarizationArg::Phansalkar => Self::local(LocalThresholdMethod::Phansalkar),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tilemorph")]
#[command(
    author,
    version,
    about = "Skeleton, fragment and branch analysis of binary tile grids"
)]
/// Command-line arguments for the analysis tool
pub struct Cli {
    /// Grid text file or directory of grid files to analyze
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Thinning algorithm
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::ZhangSuen)]
    pub algorithm: AlgorithmArg,

    /// Maximum thinning iterations before giving up on convergence
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Median filter window; enables median + Otsu preprocessing
    #[arg(short, long)]
    pub kernel_size: Option<usize>,

    /// Binarization applied after the median filter
    #[arg(short, long, value_enum, default_value_t = BinarizationArg::Otsu)]
    pub binarization: BinarizationArg,

    /// Number of entities placed on the grid, reported in the features
    #[arg(short, long, default_value_t = 0)]
    pub entities: usize,

    /// Write skeleton and fragment label PNGs next to each input
    #[arg(short = 'x', long)]
    pub export: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if a report exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing reports should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Analysis configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel size is even or zero, or the iteration cap is zero
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        if self.max_iterations == 0 {
            return Err(invalid_parameter(
                "max-iterations",
                &self.max_iterations,
                &"must be at least 1",
            ));
        }
        if let Some(kernel_size) = self.kernel_size
            && kernel_size.is_multiple_of(2)
        {
            return Err(invalid_parameter(
                "kernel-size",
                &kernel_size,
                &"must be a positive odd number",
            ));
        }

        Ok(AnalysisConfig {
            kernel_size: self.kernel_size,
            binarization: self.binarization.into(),
            algorithm: self.algorithm.into(),
            max_iterations: self.max_iterations,
            entity_count: self.entities,
        })
    }
}

/// Orchestrates batch analysis of grid files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments, returning the reports written
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the target cannot be
    /// read, or any file fails to parse, analyze or export
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let config = self.cli.analysis_config()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            reports.push(self.process_file(file, &config)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if Self::is_grid_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a grid file or directory",
            ))
        }
    }

    fn is_grid_file(path: &Path) -> bool {
        let has_extension =
            path.extension().and_then(|s| s.to_str()) == Some(GRID_FILE_EXTENSION);
        let is_report = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(REPORT_SUFFIX));
        has_extension && !is_report
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let report_path = Self::report_path(input_path);
        if report_path.exists() {
            log::info!("skipping {} (report exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&self, input_path: &Path, config: &AnalysisConfig) -> Result<PathBuf> {
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let matrix = load_grid(input_path)?;
        let report = analyze(&matrix, config)?;

        if !report.thinning.converged {
            log::warn!(
                "{}: skeleton did not converge within {} iterations",
                input_path.display(),
                config.max_iterations
            );
        }

        let report_path = Self::report_path(input_path);
        std::fs::write(&report_path, full_report(&report)).with_path(&report_path, "write report")?;

        if self.cli.export {
            export_skeleton_png(
                &report.thinning.skeleton,
                &report.branches.detection,
                &Self::sibling_path(input_path, SKELETON_SUFFIX, "png"),
            )?;
            export_labels_png(
                &create_labeled_matrix(&report.working_matrix),
                &Self::sibling_path(input_path, LABELS_SUFFIX, "png"),
            )?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(report_path)
    }

    /// Path of the text report written for an input file
    pub fn report_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, REPORT_SUFFIX, GRID_FILE_EXTENSION)
    }

    fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}
