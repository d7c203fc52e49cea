/// Renders minor units as a display price, e.g. 1250 -> "$12.50".
pub fn format_price(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

/// Parses a human price ("12", "12.5", "12.50") into minor units. Rejects
/// anything with more than two decimal places or non-digit noise.
pub fn parse_price_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return None;
    }
    let (dollars, cents) = match trimmed.split_once('.') {
        Some((d, c)) => (d, c),
        None => (trimmed, ""),
    };
    if !dollars.chars().all(|c| c.is_ascii_digit()) || dollars.is_empty() {
        return None;
    }
    if cents.len() > 2 || !cents.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let dollars: i64 = dollars.parse().ok()?;
    let cents: i64 = match cents.len() {
        0 => 0,
        1 => cents.parse::<i64>().ok()? * 10,
        _ => cents.parse().ok()?,
    };
    Some(dollars * 100 + cents)
}
