//! Progress reporting for long-running operations

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for a main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a main progress bar with a standardized style
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(DEFAULT_MAIN_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar and clear it from display
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
