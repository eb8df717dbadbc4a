//! View models for the deal list. Everything here is a pure function of the deals and the unlock states, so the
//! presenter only ever has to draw what it is given.
use std::collections::HashSet;

use deal_engine::deal_types::{Deal, DealId, Platform};
use ds_common::Paise;

use crate::unlock::{ButtonView, UnlockState};

pub const EMPTY_STATE: EmptyState = EmptyState {
    title: "No deals found",
    hint: "Try refreshing or selecting a different platform.",
    retry_label: "Refresh Deals",
};

/// Cards whose top edge is within this many pixels of the bottom of the viewport are not revealed yet.
pub const REVEAL_MARGIN: f64 = 100.0;

/// Identifies a card, and with it the unlock button on that card. Deal ids are only unique within a platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub deal_id: DealId,
    pub platform: Platform,
}

impl CardKey {
    pub fn new(deal_id: DealId, platform: Platform) -> Self {
        Self { deal_id, platform }
    }

    pub fn for_deal(deal: &Deal) -> Self {
        Self::new(deal.id.clone(), deal.platform)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealCard {
    pub key: CardKey,
    pub title: String,
    /// The title with HTML metacharacters escaped, for presenters that render markup.
    pub title_html: String,
    pub platform_label: String,
    pub platform_icon: &'static str,
    pub discount_badge: Option<String>,
    pub current_price: String,
    pub original_price: Option<String>,
    pub button: ButtonView,
}

impl DealCard {
    pub fn new(deal: &Deal, state: &UnlockState, unlock_price: Paise) -> Self {
        let discount_badge =
            (deal.discount_percentage > 0.0).then(|| format!("{}% OFF", deal.discount_percentage));
        let original_price = deal.original_price.as_ref().filter(|_| deal.is_reduced()).map(|p| p.to_string());
        Self {
            key: CardKey::for_deal(deal),
            title: deal.title.clone(),
            title_html: escape_html(&deal.title),
            platform_label: deal.platform.as_str().to_uppercase(),
            platform_icon: platform_icon(deal.platform),
            discount_badge,
            current_price: deal.current_price.to_string(),
            original_price,
            button: state.view(unlock_price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    pub retry_label: &'static str,
}

pub fn deal_count_text(count: usize) -> String {
    format!("{count} deals found")
}

pub fn platform_icon(platform: Platform) -> &'static str {
    match platform {
        Platform::Flipkart => "shopping-cart",
        Platform::Amazon => "amazon",
        Platform::Jiomart => "store",
        Platform::Myntra => "tshirt",
        Platform::Swiggy => "utensils",
        Platform::Bigbasket => "shopping-basket",
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

//--------------------------------------    ScrollReveal     ---------------------------------------------------------
/// Tracks which cards have scrolled into view. Once revealed, a card stays revealed until the list is re-rendered.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    revealed: HashSet<CardKey>,
}

impl ScrollReveal {
    /// Given the top edge of each card relative to the viewport, returns the cards that are now in view and were not
    /// revealed before.
    pub fn reveal(&mut self, viewport_height: f64, card_tops: &[(CardKey, f64)]) -> Vec<CardKey> {
        let threshold = viewport_height - REVEAL_MARGIN;
        card_tops
            .iter()
            .filter(|(_, top)| *top < threshold)
            .filter_map(|(key, _)| self.revealed.insert(key.clone()).then(|| key.clone()))
            .collect()
    }

    pub fn mark_revealed(&mut self, key: CardKey) -> bool {
        self.revealed.insert(key)
    }

    pub fn is_revealed(&self, key: &CardKey) -> bool {
        self.revealed.contains(key)
    }

    pub fn reset(&mut self) {
        self.revealed.clear();
    }
}
