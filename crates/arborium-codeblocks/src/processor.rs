//! Highlighting HTML files on disk.

use crate::diagnostics::File;
use crate::transform::{CodeBlockHighlighter, RewriteStats};
use arborium_highlight::Engine;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Options for the processor.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// An HTML file, or a directory searched recursively for `*.html`.
    pub input: PathBuf,
    /// Where to write results. `None` rewrites the input in place.
    pub output: Option<PathBuf>,
    /// Print every file as it is processed.
    pub verbose: bool,
}

/// Statistics from processing.
#[derive(Debug, Default)]
pub struct ProcessorStats {
    /// HTML files read and rewritten without error.
    pub files_processed: usize,
    /// Files whose contents changed.
    pub files_changed: usize,
    /// Files that could not be processed.
    pub files_failed: usize,
    pub blocks: RewriteStats,
    /// Files with at least one message, in no particular order.
    pub reports: Vec<File>,
    pub bytes_input: u64,
    pub bytes_output: u64,
    /// Time spent rewriting, excluding the initial copy.
    pub process_duration: Duration,
}

impl ProcessorStats {
    pub fn message_count(&self) -> usize {
        self.reports.iter().map(|f| f.messages.len()).sum()
    }

    /// Size change of the HTML, in percent of the input.
    pub fn html_inflation_percent(&self) -> f64 {
        if self.bytes_input == 0 {
            0.0
        } else {
            (self.bytes_output as f64 - self.bytes_input as f64) / self.bytes_input as f64 * 100.0
        }
    }

    /// Input processed per second, in MB/s.
    pub fn throughput_mb_s(&self) -> f64 {
        let secs = self.process_duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            (self.bytes_input as f64 / (1024.0 * 1024.0)) / secs
        }
    }
}

/// Errors that stop a run before any file is rewritten.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("input does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to copy {} to {}: {message}", .from.display(), .to.display())]
    Clone {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    #[error(transparent)]
    Highlight(#[from] crate::Error),
}

/// Highlights code blocks in HTML files.
pub struct Processor {
    options: ProcessOptions,
    highlighter: CodeBlockHighlighter,
}

impl Processor {
    pub fn new(options: ProcessOptions, highlighter: CodeBlockHighlighter) -> Self {
        Self {
            options,
            highlighter,
        }
    }

    /// Process the input.
    ///
    /// Creates the engine first, so a bad grammar fails the run before any
    /// file is touched. Files are then rewritten in parallel on the rayon
    /// pool, blocking the calling task until they are all done. A file that
    /// fails is reported and skipped.
    pub async fn process(&self) -> Result<ProcessorStats, ProcessError> {
        let input = &self.options.input;
        if !input.exists() {
            return Err(ProcessError::MissingInput(input.clone()));
        }

        let engine = self.highlighter.engine().await?;

        if input.is_file() {
            return self.process_single(engine, input);
        }

        let root = match &self.options.output {
            Some(out) if out != input => {
                self.clone_input(out)?;
                out.as_path()
            }
            _ => input.as_path(),
        };

        let html_files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
            .map(|e| e.into_path())
            .collect();
        debug!(files = html_files.len(), root = %root.display(), "collected HTML files");

        Ok(self.process_files(engine, &html_files))
    }

    fn process_single(&self, engine: &Engine, input: &Path) -> Result<ProcessorStats, ProcessError> {
        let start = Instant::now();
        let output = self.options.output.as_deref().unwrap_or(input);
        let mut file = File::with_path(input);

        let html = fs::read_to_string(input)?;
        let (transformed, blocks) = self.highlighter.rewrite_html(engine, &html, &mut file)?;
        let changed = transformed != html;

        if changed || output != input {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(output, &transformed)?;
        }

        Ok(ProcessorStats {
            files_processed: 1,
            files_changed: usize::from(changed),
            bytes_input: html.len() as u64,
            bytes_output: transformed.len() as u64,
            blocks,
            reports: if file.messages.is_empty() { Vec::new() } else { vec![file] },
            process_duration: start.elapsed(),
            ..Default::default()
        })
    }

    fn clone_input(&self, out: &Path) -> Result<(), ProcessError> {
        // Clean slate
        if out.exists() {
            fs::remove_dir_all(out)?;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Cloning directory tree...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        clonetree::clone_tree(&self.options.input, out, &clonetree::Options::new()).map_err(
            |e| ProcessError::Clone {
                from: self.options.input.clone(),
                to: out.to_path_buf(),
                message: e.to_string(),
            },
        )?;

        spinner.finish_with_message("Clone complete");
        Ok(())
    }

    fn process_files(&self, engine: &Engine, html_files: &[PathBuf]) -> ProcessorStats {
        let progress = ProgressBar::new(html_files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
        ) {
            progress.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }

        let process_start = Instant::now();

        let files_processed = AtomicUsize::new(0);
        let files_changed = AtomicUsize::new(0);
        let files_failed = AtomicUsize::new(0);
        let bytes_input = AtomicUsize::new(0);
        let bytes_output = AtomicUsize::new(0);
        let blocks = Mutex::new(RewriteStats::default());
        let reports = Mutex::new(Vec::<File>::new());

        let verbose = self.options.verbose;

        html_files.par_iter().for_each(|path| {
            if verbose {
                progress.println(format!("Processing: {}", path.display()));
            }

            let mut file = File::with_path(path);
            match self.process_file(engine, path, &mut file) {
                Ok(outcome) => {
                    files_processed.fetch_add(1, Ordering::Relaxed);
                    if outcome.changed {
                        files_changed.fetch_add(1, Ordering::Relaxed);
                    }
                    bytes_input.fetch_add(outcome.input_size, Ordering::Relaxed);
                    bytes_output.fetch_add(outcome.output_size, Ordering::Relaxed);
                    blocks
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .merge(outcome.stats);
                }
                Err(e) => {
                    files_failed.fetch_add(1, Ordering::Relaxed);
                    warn!(path = %path.display(), "{e}");
                    progress.println(format!("Warning: Failed to process {}: {}", path.display(), e));
                }
            }

            if !file.messages.is_empty() {
                reports.lock().unwrap_or_else(PoisonError::into_inner).push(file);
            }
            progress.inc(1);
        });

        let process_duration = process_start.elapsed();
        progress.finish_and_clear();

        ProcessorStats {
            files_processed: files_processed.into_inner(),
            files_changed: files_changed.into_inner(),
            files_failed: files_failed.into_inner(),
            blocks: blocks.into_inner().unwrap_or_else(PoisonError::into_inner),
            reports: reports.into_inner().unwrap_or_else(PoisonError::into_inner),
            bytes_input: bytes_input.into_inner() as u64,
            bytes_output: bytes_output.into_inner() as u64,
            process_duration,
        }
    }

    /// Rewrite one file in place.
    fn process_file(
        &self,
        engine: &Engine,
        path: &Path,
        file: &mut File,
    ) -> Result<FileOutcome, ProcessError> {
        let html = fs::read_to_string(path)?;
        let (transformed, stats) = self.highlighter.rewrite_html(engine, &html, file)?;
        let changed = transformed != html;

        if changed {
            fs::write(path, &transformed)?;
        }

        Ok(FileOutcome {
            stats,
            changed,
            input_size: html.len(),
            output_size: transformed.len(),
        })
    }
}

struct FileOutcome {
    stats: RewriteStats,
    changed: bool,
    input_size: usize,
    output_size: usize,
}
