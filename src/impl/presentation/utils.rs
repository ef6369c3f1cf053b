use iso_currency::Currency;
use num_format::{CustomFormat, Grouping, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, INR = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

fn number_format(currency: Currency) -> CustomFormat {
    // Lakh/crore grouping for rupees (1,23,456), thousands otherwise.
    let grouping = match currency {
        Currency::INR => Grouping::Indian,
        _ => Grouping::Standard,
    };
    CustomFormat::builder()
        .grouping(grouping)
        .separator(",")
        .decimal(".")
        .minus_sign("-")
        .build()
        .expect("hardcoded number format should be valid")
}

/// Format an amount with the currency symbol prefixed, rounded to the
/// currency's minor unit, ex. "₹1,23,456.50" or "-$12.00".
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let scale = 10i64.pow(decimal_places);
    let minor_units = (amount.abs() * scale as f64).round() as i64;
    let sign = if amount < 0.0 && minor_units != 0 {
        "-"
    } else {
        ""
    };
    let integer_part = (minor_units / scale).to_formatted_string(&number_format(currency));
    if decimal_places == 0 {
        format!("{sign}{}{integer_part}", currency.symbol())
    } else {
        format!(
            "{sign}{}{integer_part}.{:0width$}",
            currency.symbol(),
            minor_units % scale,
            width = decimal_places as usize,
        )
    }
}
