use chrono::NaiveDate;
use shared::date_portion;

/// Parse the date portion (YYYY-MM-DD) of an ISO timestamp
pub fn parse_date_string(timestamp: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&date_portion(timestamp), "%Y-%m-%d").ok()
}

/// Format an ISO timestamp for display (e.g., "May 1, 2023"); unparseable input is returned as-is
pub fn format_date_for_display(timestamp: &str) -> String {
    match parse_date_string(timestamp) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// Format an amount as dollars
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}
