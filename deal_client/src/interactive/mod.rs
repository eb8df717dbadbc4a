use anyhow::Result;
use deal_engine::{deal_types::Platform, filter::PlatformFilter};
use dialoguer::{console::Style, theme::ColorfulTheme, FuzzySelect};

use crate::{
    api_client::DealServerClient,
    controller::{settle_time, DealController, UnlockOutcome},
    view::CardKey,
};

mod checkout;
pub mod formatting;
mod presenter;

pub use checkout::TerminalCheckout;
pub use presenter::ConsolePresenter;

pub type TerminalController = DealController<DealServerClient, TerminalCheckout, ConsolePresenter>;

const MENU: [&str; 4] = ["Filter by platform", "Unlock a deal", "Refresh deals", "Exit"];

/// A menu-driven deal browser.
pub struct BrowseApp {
    controller: TerminalController,
    theme: ColorfulTheme,
}

impl BrowseApp {
    pub fn new(controller: TerminalController) -> Self {
        let theme = ColorfulTheme { prompt_style: Style::new().magenta().bold(), ..ColorfulTheme::default() };
        Self { controller, theme }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.controller.load_deals(false).await;
        loop {
            let prompt = format!("DealStream » {}", self.controller.filter());
            let i = FuzzySelect::with_theme(&self.theme).with_prompt(prompt).items(&MENU).interact()?;
            match MENU[i] {
                "Filter by platform" => self.select_filter()?,
                "Unlock a deal" => self.unlock().await?,
                "Refresh deals" => {
                    self.controller.load_deals(true).await;
                },
                "Exit" => break,
                _ => continue,
            }
        }
        Ok(())
    }

    fn select_filter(&self) -> Result<()> {
        let mut options = vec![PlatformFilter::All];
        options.extend(Platform::ALL.into_iter().map(PlatformFilter::Only));
        let labels = options.iter().map(|f| f.to_string()).collect::<Vec<_>>();
        let i = FuzzySelect::with_theme(&self.theme).with_prompt("Platform").items(&labels).interact()?;
        self.controller.filter_deals(options[i]);
        Ok(())
    }

    async fn unlock(&self) -> Result<()> {
        let deals = self.controller.visible_deals();
        if deals.is_empty() {
            println!("There are no deals to unlock.");
            return Ok(());
        }
        let labels = deals.iter().map(|d| format!("{} ({}, {})", d.title, d.platform, d.current_price)).collect::<Vec<_>>();
        let i = FuzzySelect::with_theme(&self.theme).with_prompt("Deal").items(&labels).interact()?;
        let key = CardKey::for_deal(&deals[i]);
        if let UnlockOutcome::Unlocked { .. } = self.controller.unlock(&key).await {
            tokio::time::sleep(settle_time(self.controller.timings())).await;
        }
        Ok(())
    }
}
