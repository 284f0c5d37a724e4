//! Console rendering of pipeline events.

use indicatif::{ProgressBar, ProgressStyle};
use stormex::{Event, Report};

/// Renders scan and extraction events to the terminal.
///
/// Per-entry failures always go to stderr; everything else respects the
/// quiet and verbose flags.
pub struct ConsoleReport {
    verbose: bool,
    quiet: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleReport {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            bar: None,
        }
    }

    /// Attach a progress bar sized to the match count before extraction
    /// starts.
    pub fn start_extraction(&mut self, found: usize) {
        if self.quiet {
            return;
        }
        let bar = ProgressBar::new(found as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        self.bar = Some(bar);
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Report for ConsoleReport {
    fn report(&mut self, event: Event<'_>) {
        match event {
            Event::MatchFound { path, .. } => {
                if self.verbose && !self.quiet {
                    eprintln!("  - {}", path);
                }
            }
            Event::ScanProgress { found } => {
                if !self.verbose && !self.quiet {
                    eprint!("\r  {:>7} matches...", found);
                }
            }
            Event::ScanFinished { .. } => {
                if !self.verbose && !self.quiet {
                    eprint!("\r");
                }
            }
            Event::EntryStarted { path, done, found } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(path.to_string());
                } else if self.verbose && !self.quiet {
                    let percent = if found == 0 { 0 } else { done * 100 / found };
                    eprintln!("  {:>3}% {}", percent, path);
                }
            }
            Event::EntryFinished { .. } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
            }
            Event::EntryFailed { error, .. } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
                eprintln!("Warning: {}", error);
            }
        }
    }
}
