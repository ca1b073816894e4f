use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar that advances once per finished scenario.
///
/// Hidden when the user asked for no progress output, so callers can update it unconditionally.
pub(crate) fn scenario_progress(scenario_count: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(scenario_count as u64);
    match ProgressStyle::with_template(
        "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} scenarios [{elapsed_precise}] {msg}",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => log::debug!("Using the default progress style: {e}"),
    }

    pb
}
