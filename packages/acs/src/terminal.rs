//! Terminal output for the downloader binary: one progress bar counting
//! (year, state) requests, with log lines routed around it.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use census_dashboard_acs::progress::ProgressCallback;

/// Progress bar over the (year, state) requests of a run.
pub struct RequestBar {
    bar: ProgressBar,
}

impl RequestBar {
    #[must_use]
    pub fn new(multi: &MultiProgress) -> Self {
        let bar = multi.add(ProgressBar::new(0));
        bar.set_prefix("acs5");
        bar.set_style(
            ProgressStyle::with_template(
                "{prefix:.bold.cyan} {msg:32} {wide_bar:.green/dim} {pos}/{len} requests [{eta}]",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl ProgressCallback for RequestBar {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Installs `pretty_env_logger` (filtered by `RUST_LOG`) behind
/// `indicatif-log-bridge`, which hides the bars while a line is printed.
///
/// Bars must be added to the returned [`MultiProgress`].
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();
    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let max_level = logger.filter();

    if indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .is_ok()
    {
        log::set_max_level(max_level);
    }

    multi
}
