// ABOUTME: Progress reporting sink for long-running backup and restore operations
// ABOUTME: Provides an indicatif terminal bar and a no-op sink behind one trait

use indicatif::{ProgressBar, ProgressStyle};

/// Sink for operation progress.
///
/// Receives successive percentages in `[0, 100]`. For one operation the
/// values are non-decreasing, and a non-empty operation that runs to
/// completion ends on exactly 100. Nothing else is guaranteed; a cancelled
/// or aborted operation simply stops reporting.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, percent: u8);
}

/// Discards all progress updates.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _percent: u8) {}
}

/// Any thread-safe closure can serve as a reporter.
impl<F> ProgressReporter for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Terminal progress bar backed by indicatif.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg}")
                .expect("progress template is valid")
                .progress_chars("##-"),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Leave the bar where it is, for operations that stopped early.
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}

impl ProgressReporter for BarReporter {
    fn report(&self, percent: u8) {
        self.bar.set_position(u64::from(percent.min(100)));
    }
}
