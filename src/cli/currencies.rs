use super::ui;
use crate::core::client::ConversionClient;
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(client: &ConversionClient) -> Result<()> {
    let currencies = client.list_currency_names().await?;
    if currencies.is_empty() {
        println!("The conversion service lists no currencies.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for currency in &currencies {
        table.add_row(vec![Cell::new(&currency.code), Cell::new(&currency.name)]);
    }
    println!("{table}");
    Ok(())
}
