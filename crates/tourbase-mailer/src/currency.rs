//! Currency formatting for email amounts

use rusty_money::{iso, Locale, Money};

/// Format a major-unit amount as a currency string.
///
/// Zero-decimal currencies render without a fraction part and negative
/// amounts keep their sign:
///
/// ```
/// use tourbase_mailer::format_currency;
///
/// assert_eq!(format_currency(1000, "JPY", "ja-JP"), "¥1,000");
/// assert_eq!(format_currency(-500, "USD", "en-US"), "-$500.00");
/// ```
///
/// The locale picks the digit separators; an unknown currency code falls
/// back to a bare `"<amount> <code>"` string rather than erroring inside a
/// template.
pub fn format_currency(amount: i64, code: &str, locale: &str) -> String {
    let Some(currency) = iso::find(code) else {
        return format!("{} {}", amount, code);
    };

    // Scale to minor units so the rendered amount carries the currency's
    // full exponent (500 -> 500.00 for USD, 1000 -> 1000 for JPY).
    let scale = 10_i64.checked_pow(currency.exponent).unwrap_or(1);
    let minor = amount.saturating_mul(scale);
    let formatted = Money::from_minor(minor, currency).to_string();

    // The Display impl formats with the currency's native separators; only
    // swap when the requested locale disagrees with that native style.
    let native_comma = matches!(currency.locale, Locale::EnEu | Locale::EnBy);
    if uses_comma_decimal(locale) != native_comma {
        swap_separators(&formatted)
    } else {
        formatted
    }
}

/// Locales whose number format uses a comma decimal mark
fn uses_comma_decimal(locale: &str) -> bool {
    let primary = locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase();
    matches!(
        primary.as_str(),
        "de" | "fr" | "es" | "it" | "nl" | "pt" | "pl"
    )
}

/// Swap the digit and decimal separators, leaving everything else (symbol,
/// sign) untouched.
fn swap_separators(formatted: &str) -> String {
    formatted
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_decimal_yen() {
        let formatted = format_currency(1000, "JPY", "ja-JP");
        assert_eq!(formatted, "¥1,000");
        assert!(!formatted.contains('.'));
    }

    #[test]
    fn test_negative_dollars() {
        let formatted = format_currency(-500, "USD", "en-US");
        assert_eq!(formatted, "-$500.00");
    }

    #[test]
    fn test_german_locale_uses_comma_decimal() {
        let formatted = format_currency(1250, "USD", "de-DE");
        assert!(formatted.contains("1.250"), "got {}", formatted);
        assert!(formatted.ends_with(",00"), "got {}", formatted);
    }

    #[test]
    fn test_unknown_currency_falls_back_to_plain_string() {
        assert_eq!(format_currency(42, "WAT", "en-US"), "42 WAT");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            format_currency(999, "GBP", "en-GB"),
            format_currency(999, "GBP", "en-GB")
        );
    }
}
