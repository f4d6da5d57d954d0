use super::ui;
use crate::core::client::ConversionClient;
use anyhow::Result;

pub async fn run(client: &ConversionClient, remote: bool, clear: bool) -> Result<()> {
    if clear {
        client.clear_history();
        println!("Conversion history cleared.");
        return Ok(());
    }

    let records = if remote {
        client.fetch_remote_history().await?
    } else {
        client.fetch_history().entries().to_vec()
    };

    if records.is_empty() {
        println!(
            "{}",
            ui::style_text("No conversions yet.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!("{}", ui::history_table(&records));
    Ok(())
}
