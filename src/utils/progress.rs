//! Phase spinner that becomes a no-op when the `progress` feature is disabled

#[cfg(feature = "progress")]
pub use self::spinner::Spinner;

#[cfg(not(feature = "progress"))]
pub use self::noop::Spinner;

#[cfg(feature = "progress")]
mod spinner {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    /// Spinner shown on stderr while a construction phase runs
    pub struct Spinner {
        bar: Option<ProgressBar>,
    }

    impl Spinner {
        /// Start a spinner with `message`; `silent` suppresses all drawing
        pub fn start(message: &str, silent: bool) -> Self {
            if silent {
                return Self { bar: None };
            }

            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(80));
            Self { bar: Some(bar) }
        }

        /// Stop the spinner, leaving `message` and the elapsed time behind
        pub fn finish(self, message: &str, elapsed: Duration) {
            if let Some(bar) = self.bar {
                bar.finish_with_message(format!("{} ({:.2?})", message, elapsed));
            }
        }
    }
}

#[cfg(not(feature = "progress"))]
mod noop {
    use std::time::Duration;

    /// No-op spinner when `progress` feature is disabled
    pub struct Spinner;

    impl Spinner {
        pub fn start(_message: &str, _silent: bool) -> Self {
            Spinner
        }

        pub fn finish(self, _message: &str, _elapsed: Duration) {}
    }
}
