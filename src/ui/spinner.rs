//! Spinner shown while a generative-text call is outstanding.

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .expect("progress bar template is a valid static string");
    bar.set_style(spinner_style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Await `future` behind a spinner, clearing it when the future resolves.
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let bar = spinner(message);
    let output = future.await;
    bar.finish_and_clear();
    output
}
