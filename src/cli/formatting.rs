use chrono::{DateTime, Local, Utc};

/// Symbol printed in front of amounts for a currency code.
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => "$".into(),
        "TWD" => "NT$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" | "CNY" => "¥".into(),
        other => format!("{other} "),
    }
}

/// Thousands and decimal separators for a locale tag such as `de-DE`.
pub fn separators(locale: &str) -> (char, char) {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match language.as_str() {
        "de" | "es" | "it" | "pt" | "nl" | "id" | "tr" | "da" => ('.', ','),
        "fr" | "ru" | "pl" | "sv" | "nb" | "fi" | "cs" | "uk" => (' ', ','),
        _ => (',', '.'),
    }
}

/// Formats `value` as `<symbol><thousands>.<cents>`, e.g. `-$1,234.50`,
/// using the separators of `locale`.
pub fn format_amount(value: f64, currency: &str, locale: &str) -> String {
    let symbol = currency_symbol(currency);
    let (thousands, decimal) = separators(locale);
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100, thousands);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{whole}{decimal}{:02}", cents % 100)
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Local-time rendering of a creation timestamp.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Parses user input such as `1,000.50` into a non-negative amount.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_'))
        .collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("`{}` is not a valid amount", input.trim()))?;
    if !value.is_finite() {
        return Err(format!("`{}` is not a finite amount", input.trim()));
    }
    if value < 0.0 {
        return Err("amount must not be negative".into());
    }
    Ok(value)
}

/// Pads or truncates `text` to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else if width > 1 {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        text.chars().take(width).collect()
    }
}
