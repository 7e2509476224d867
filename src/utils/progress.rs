//! Progress indicators for loading, sampling draws and pruning

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner with elapsed time, for steps of unknown length
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("    {spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_TICKS),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Bar counting bootstrap draws
pub fn create_draw_bar(draws: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(draws);
    pb.set_style(
        ProgressStyle::with_template(
            "    {msg} [{bar:40.cyan/blue}] draw {pos}/{len} ({per_sec}, eta {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Indicator for a selection phase: hidden when `show` is false, a draw bar
/// when the number of draws is known, a spinner otherwise.
pub fn selection_progress(show: bool, draws: Option<u64>, message: &str) -> ProgressBar {
    match (show, draws) {
        (false, _) => ProgressBar::hidden(),
        (true, Some(draws)) => create_draw_bar(draws, message),
        (true, None) => create_spinner(message),
    }
}

/// Finish a progress indicator with a green check
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", style("✓").green().bold(), message));
}

/// Finish a progress indicator with a yellow warning
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", style("!").yellow().bold(), style(message).yellow()));
}
