//! Utility functions for formatting amounts
//!
//! Rupee amounts are printed with Indian digit grouping (lakh/crore):
//! the last three digits form one group, every group above that has two.

use rust_decimal::Decimal;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "₹ " prefix
    Inr,
    /// No currency symbol (for table cells)
    None,
}

/// Core formatting function with full control over output.
///
/// # Arguments
/// * `value` - The decimal value to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
/// * `symbol` - Whether to include currency symbol
///
/// # Examples
/// ```
/// use capgains::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234567.891), 0, CurrencySymbol::Inr),
///     "₹ 12,34,567.89"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 12, CurrencySymbol::None),
///     "    1,234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = value.round_dp(2);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::Inr => "₹ ",
        CurrencySymbol::None => "",
    };

    let result = format!(
        "{}{}{}.{}",
        prefix,
        sign,
        group_indian(integer_part),
        decimal_part
    );

    // Right-align by character count; "₹" is multi-byte
    let len = result.chars().count();
    if width > len {
        format!("{}{}", " ".repeat(width - len), result)
    } else {
        result
    }
}

/// "1234567" -> "12,34,567"
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// ============ Convenience functions ============

/// Format as rupees with symbol: "₹ 1,23,456.78"
///
/// # Examples
/// ```
/// use capgains::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(123456.78)), "₹ 1,23,456.78");
/// assert_eq!(format_currency(dec!(-50)), "₹ -50.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Inr)
}

/// Format number only (no symbol): "1,23,456.78"
pub fn format_amount(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(999)), "999.00");
        assert_eq!(format_amount(dec!(1000)), "1,000.00");
        assert_eq!(format_amount(dec!(100000)), "1,00,000.00");
        assert_eq!(format_amount(dec!(12345678)), "1,23,45,678.00");
        assert_eq!(format_amount(dec!(123456789.5)), "12,34,56,789.50");
    }

    #[test]
    fn test_negative_and_rounding() {
        assert_eq!(format_currency(dec!(-1234.567)), "₹ -1,234.57");
        assert_eq!(format_currency(dec!(-0.001)), "₹ 0.00");
    }

    #[test]
    fn test_width_counts_characters() {
        let formatted = format_currency_with_width(dec!(5), 10, CurrencySymbol::Inr);
        assert_eq!(formatted, "    ₹ 5.00");
        assert_eq!(formatted.chars().count(), 10);
    }
}
