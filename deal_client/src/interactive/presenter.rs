use std::{sync::Mutex, time::Duration};

use dialoguer::console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use log::*;

use crate::{
    interactive::formatting::format_deal_cards,
    traits::Presenter,
    unlock::{ButtonStyle, ButtonView},
    view::{CardKey, DealCard, EmptyState},
};

/// Draws the deal list on the terminal. Banners are printed once; there is nothing to take down when they expire.
pub struct ConsolePresenter {
    spinner: Mutex<Option<ProgressBar>>,
    error: Style,
    success: Style,
    dim: Style,
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self {
            spinner: Mutex::new(None),
            error: Style::new().red().bold(),
            success: Style::new().green().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl ConsolePresenter {
    /// Prints `text` without tearing an active spinner.
    fn print(&self, text: String) {
        let spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        match spinner.as_ref() {
            Some(pb) => pb.suspend(|| println!("{text}")),
            None => println!("{text}"),
        }
    }
}

impl Presenter for ConsolePresenter {
    fn show_loading(&self, visible: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if visible {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            if let Ok(style) = ProgressStyle::with_template("{spinner:5} {msg} [{elapsed}]") {
                pb.set_style(style.tick_strings(&["🕛 ", "🕐 ", "🕑 ", "🕒 ", "🕓 ", "🕔 ", "🕕 ", "🕖 ", "🕗 ", "🕘 ", "🕙 ", "🕚 "]));
            }
            pb.set_message("Loading deals...");
            *spinner = Some(pb);
        } else if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn show_error(&self, message: &str) {
        self.print(format!("{}", self.error.apply_to(format!("✖ {message}"))));
    }

    fn hide_error(&self) {
        trace!("Error banner hidden");
    }

    fn show_success(&self, message: &str) {
        self.print(format!("{}", self.success.apply_to(format!("✔ {message}"))));
    }

    fn hide_success(&self) {
        trace!("Success banner hidden");
    }

    fn render_cards(&self, cards: &[DealCard]) {
        self.print(format_deal_cards(cards));
    }

    fn render_empty_state(&self, empty: &EmptyState) {
        self.print(format!(
            "{}\n{}\n{}",
            Style::new().bold().apply_to(empty.title),
            empty.hint,
            self.dim.apply_to(format!("{}: dealstream list --refresh", empty.retry_label))
        ));
    }

    fn update_deal_count(&self, text: &str) {
        self.print(format!("{}", self.dim.apply_to(text)));
    }

    fn render_button(&self, key: &CardKey, button: &ButtonView) {
        let label = match button.style {
            ButtonStyle::Ready => Style::new().cyan().apply_to(&button.label),
            ButtonStyle::Loading => Style::new().yellow().apply_to(&button.label),
            ButtonStyle::Success => Style::new().green().bold().apply_to(&button.label),
            ButtonStyle::Unlocked => Style::new().green().apply_to(&button.label),
        };
        self.print(format!("[{} on {}] {label}", key.deal_id, key.platform));
    }

    fn reveal_card(&self, key: &CardKey) {
        trace!("Revealed {} on {}", key.deal_id, key.platform);
    }

    fn open_link(&self, url: &str) {
        self.print(format!("Opening deal: {}", Style::new().underlined().apply_to(url)));
    }
}
