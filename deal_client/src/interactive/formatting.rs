use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};

use crate::view::DealCard;

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

pub fn format_deal_cards(cards: &[DealCard]) -> String {
    let mut table = Table::new();
    table.set_format(markdown_format());
    table.set_titles(row!["#", "Platform", "Deal", "Price", "Was", "Discount", "Id", ""]);
    for (i, card) in cards.iter().enumerate() {
        table.add_row(row![
            i + 1,
            card.platform_label,
            card.title,
            r->card.current_price,
            r->card.original_price.as_deref().unwrap_or(""),
            r->card.discount_badge.as_deref().unwrap_or(""),
            card.key.deal_id,
            card.button.label,
        ]);
    }
    table.to_string()
}
