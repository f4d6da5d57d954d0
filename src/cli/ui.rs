use crate::core::conversion::{ConversionQuote, ConversionRecord};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Result,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Result => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn amount_cell(value: f64) -> Cell {
    Cell::new(format_amount(value)).set_alignment(CellAlignment::Right)
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Renders conversions newest first, one row each.
pub fn history_table(records: &[ConversionRecord]) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("#"),
        header_cell("From"),
        header_cell("Amount"),
        header_cell("To"),
        header_cell("Result"),
        header_cell("When"),
    ]);
    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            Cell::new(&record.from_currency),
            amount_cell(record.amount),
            Cell::new(&record.to_currency),
            amount_cell(record.result).add_attribute(Attribute::Bold),
            Cell::new(record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        ]);
    }
    table
}

/// Rate and server timestamp line for a quote, when the server sent either.
pub fn quote_details(from: &str, to: &str, quote: &ConversionQuote) -> Option<String> {
    let rate = quote.exchange_rate.map(|rate| format!("1 {from} = {rate} {to}"));
    let as_of = quote.timestamp.as_ref().map(|ts| format!("as of {ts}"));
    match (rate, as_of) {
        (Some(rate), Some(as_of)) => Some(format!("{rate} ({as_of})")),
        (rate, as_of) => rate.or(as_of),
    }
}

/// Creates a spinner that only animates once ticking is enabled.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner
}

/// Drives `spinner` from loading-flag transitions.
pub fn spinner_listener(spinner: ProgressBar) -> impl Fn(bool) + Send + Sync + 'static {
    move |loading| {
        if loading {
            spinner.enable_steady_tick(Duration::from_millis(80));
        } else {
            spinner.finish_and_clear();
        }
    }
}
