use super::ui;
use crate::core::client::ConversionClient;
use crate::core::config::AppConfig;
use crate::core::conversion::CurrencyCode;
use anyhow::{Result, bail};
use tracing::debug;

/// Validated input of the `convert` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionForm {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

impl ConversionForm {
    /// Fills missing codes from the config defaults, then the first two listed
    /// currencies, and checks everything against `currencies`.
    pub fn build(
        from: Option<&str>,
        to: Option<&str>,
        amount: f64,
        config: &AppConfig,
        currencies: &[CurrencyCode],
    ) -> Result<Self> {
        let from = from
            .map(str::to_string)
            .or_else(|| config.default_from.clone())
            .or_else(|| currencies.first().cloned());
        let to = to
            .map(str::to_string)
            .or_else(|| config.default_to.clone())
            .or_else(|| currencies.get(1).cloned());

        let (Some(from), Some(to)) = (from, to) else {
            bail!("Both source and target currency are required");
        };
        let form = Self {
            from: resolve_code(&from, currencies),
            to: resolve_code(&to, currencies),
            amount,
        };
        form.validate(currencies)?;
        Ok(form)
    }

    pub fn validate(&self, currencies: &[CurrencyCode]) -> Result<()> {
        if self.from.is_empty() || self.to.is_empty() {
            bail!("Both source and target currency are required");
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            bail!("Amount must be a non-negative number");
        }
        for code in [&self.from, &self.to] {
            if !currencies.contains(code) {
                bail!("Unsupported currency: {code}");
            }
        }
        Ok(())
    }
}

/// Spelling of `input` as the API lists it, ignoring case. Unknown codes are upper-cased.
fn resolve_code(input: &str, currencies: &[CurrencyCode]) -> CurrencyCode {
    let input = input.trim();
    currencies
        .iter()
        .find(|code| code.eq_ignore_ascii_case(input))
        .cloned()
        .unwrap_or_else(|| input.to_uppercase())
}

pub async fn run(
    client: &ConversionClient,
    config: &AppConfig,
    from: Option<&str>,
    to: Option<&str>,
    amount: f64,
) -> Result<()> {
    let currencies = client.list_currencies().await?;
    let form = ConversionForm::build(from, to, amount, config, &currencies)?;
    debug!(?form, "Submitting conversion");

    let spinner = ui::new_spinner(&format!("Converting {} to {}...", form.from, form.to));
    client
        .loading()
        .on_change(ui::spinner_listener(spinner.clone()));

    let quote = client
        .convert_with_quote(&form.from, &form.to, form.amount)
        .await;
    spinner.finish_and_clear();
    let quote = quote?;

    println!(
        "{} {} = {}",
        ui::format_amount(form.amount),
        form.from,
        ui::style_text(
            &format!("{} {}", ui::format_amount(quote.result), form.to),
            ui::StyleType::Result
        )
    );
    if let Some(details) = ui::quote_details(&form.from, &form.to, &quote) {
        println!("{}", ui::style_text(&details, ui::StyleType::Subtle));
    }

    let history = client.fetch_history();
    println!(
        "\n{}",
        ui::style_text("Recent conversions", ui::StyleType::Title)
    );
    println!("{}", ui::history_table(history.entries()));
    Ok(())
}
