use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"];

/// Thinking indicator that stays on screen for as long as the value lives.
///
/// Dropping it clears the line, so every exit path (answer, error, Ctrl-C)
/// leaves a clean terminal.
pub struct ThinkingSpinner {
    bar: Option<ProgressBar>,
}

impl ThinkingSpinner {
    pub fn start(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(FRAMES);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar: Some(bar) }
    }
}

impl Drop for ThinkingSpinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_spinner_draws_nothing() {
        let spinner = ThinkingSpinner::start("Thinking...", false);
        assert!(spinner.bar.is_none());
    }

    #[test]
    fn enabled_spinner_is_cleared_on_drop() {
        let spinner = ThinkingSpinner::start("Thinking...", true);
        assert!(spinner.bar.is_some());
        drop(spinner);
    }
}
