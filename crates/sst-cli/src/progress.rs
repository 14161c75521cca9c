use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Spinner on stderr while a request is in flight. Inert when stderr is not
/// a terminal, in quiet mode, or with JSON output.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Await `work` behind a spinner showing `message`.
pub async fn track<T, E, F>(message: &str, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let spinner = Progress::spinner(message);
    let result = work.await;
    match &result {
        Ok(_) => spinner.finish_clear(),
        Err(_) => spinner.finish_err(&format!("{message}: failed")),
    }
    result
}
