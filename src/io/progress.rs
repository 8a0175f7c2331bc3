//! Progress reporting for tile loading and mosaic composition
//!
//! Library code reports through the [`ProgressReporter`] trait so it never
//! touches the terminal itself. The CLI plugs in [`ProgressManager`], tests
//! use [`NoProgress`] or a closure.

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Receives `(current, total)` updates from long-running operations
pub trait ProgressReporter {
    /// Record that `current` of `total` units are done
    fn report(&mut self, current: usize, total: usize);
}

/// Reporter that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _current: usize, _total: usize) {}
}

impl<F> ProgressReporter for F
where
    F: FnMut(usize, usize),
{
    fn report(&mut self, current: usize, total: usize) {
        self(current, total);
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{percent:>3}}%"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Terminal progress bar for a single named phase
///
/// The bar is created lazily on the first report, so a phase that never
/// reports never draws.
pub struct ProgressManager {
    label: &'static str,
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a progress display for the phase called `label`
    pub const fn new(label: &'static str) -> Self {
        Self { label, bar: None }
    }

}

impl ProgressReporter for ProgressManager {
    fn report(&mut self, current: usize, total: usize) {
        let label = self.label;
        let bar = self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(PROGRESS_STYLE.clone());
            bar.set_message(label);
            bar
        });

        bar.set_length(total as u64);
        bar.set_position(current as u64);
        if current >= total {
            bar.finish();
        }
    }
}
