//! Exact money display helpers
//!
//! All amounts move through the system as integer cents; `rust_decimal` only
//! enters at the display boundary so totals never drift.

use rust_decimal::Decimal;

/// Format an amount in cents as a euro string, e.g. `2499` -> `"24.99 €"`
pub fn format_eur(cents: i64) -> String {
    format!("{} €", Decimal::new(cents, 2))
}

/// Format an amount in cents without the currency suffix, e.g. `2499` -> `"24.99"`
pub fn format_plain(cents: i64) -> String {
    Decimal::new(cents, 2).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_eur(2499), "24.99 €");
        assert_eq!(format_eur(100), "1.00 €");
        assert_eq!(format_eur(5), "0.05 €");
        assert_eq!(format_eur(0), "0.00 €");
    }

    #[test]
    fn formats_large_amounts_exactly() {
        assert_eq!(format_plain(123_456_789), "1234567.89");
    }
}
