use indicatif::{ProgressBar, ProgressStyle};

const ITEMS_STYLE: &str = "{msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({eta})";

const BYTES_STYLE: &str =
    "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

/// Progress bar for item loops and downloads.
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl ProgressTracker {
    /// Counts processed items out of `len`.
    pub fn items(len: u64, msg: impl Into<String>) -> Self {
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(ITEMS_STYLE) {
            pb.set_style(style.progress_chars(PB_CHARS));
        }
        pb.set_message(msg.into());
        Self { pb }
    }

    /// Counts received bytes; shows a spinner when the size is unknown.
    pub fn bytes(total: Option<u64>) -> Self {
        let pb = match total {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::no_length(),
        };
        if let Ok(style) = ProgressStyle::with_template(BYTES_STYLE) {
            pb.set_style(style.tick_chars(TICK).progress_chars(PB_CHARS));
        }
        Self { pb }
    }

    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }

    #[cfg(test)]
    pub(crate) fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn finish(&self, msg: Option<String>) {
        match msg {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish(),
        }
    }
}
