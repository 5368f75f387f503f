use chrono::NaiveTime;

/// Currency symbol shown in front of every amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Render a 24-hour `HH:MM` or `HH:MM:SS` time as 12-hour with AM/PM.
///
/// Hours 0 and 12 both render as 12. Unparseable input is passed through
/// unchanged so a malformed backend value still displays something.
pub fn format_time_12h(raw: &str) -> String {
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"));

    match parsed {
        Ok(time) => time.format("%-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Display a backend-provided amount with the fixed currency prefix.
/// No client-side rounding; the number renders exactly as received.
pub fn format_amount(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, amount)
}
