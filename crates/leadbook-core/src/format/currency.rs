use crate::error::CoreError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A monthly fee that survived normalization: the exact decimal amount plus
/// the grouped `1.234,56` display that goes back into the field and the
/// database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    display: String,
}

impl Money {
    fn from_cents(cents: i128) -> Option<Self> {
        let amount = Decimal::try_from_i128_with_scale(cents, 2).ok()?;
        Some(Self {
            display: format_cents(cents),
            amount,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

/// Normalizes raw monthly-fee input into [`Money`].
///
/// An optional `R$` prefix is dropped first. Input that is nothing but digits
/// is read as cents, so `15000` means `150,00`. Anything else is read with
/// `.` as the thousands separator and `,` as the decimal mark. Blank input is
/// `Ok(None)`; unreadable or negative input is an error the caller reports
/// without blocking the save.
pub fn normalize_currency(input: &str) -> Result<Option<Money>, CoreError> {
    let raw = input.replace("R$", "");
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let invalid = || CoreError::InvalidMonthlyFee(input.trim().to_string());

    if raw.chars().all(|ch| ch.is_ascii_digit()) {
        let cents: i128 = raw.parse().map_err(|_| invalid())?;
        return Money::from_cents(cents).map(Some).ok_or_else(invalid);
    }

    let cleaned: String = raw.replace('.', "").replace(',', ".");
    let amount: Decimal = cleaned.parse().map_err(|_| invalid())?;
    if amount.is_sign_negative() {
        return Err(invalid());
    }
    let cents = (amount.round_dp(2) * Decimal::ONE_HUNDRED)
        .to_i128()
        .ok_or_else(invalid)?;
    Money::from_cents(cents).map(Some).ok_or_else(invalid)
}

/// Lenient re-parse of a fee, whether already in display form (`1.234,56`) or
/// still raw. Used for validation and for numeric sorting of stored values;
/// callers fall back to zero when this returns `None`.
pub fn parse_fee_display(input: &str) -> Option<Decimal> {
    match normalize_currency(input) {
        Ok(Some(money)) => Some(money.amount),
        _ => None,
    }
}

fn format_cents(cents: i128) -> String {
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{grouped},{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::{normalize_currency, parse_fee_display};
    use rust_decimal::Decimal;

    fn display(input: &str) -> String {
        normalize_currency(input)
            .unwrap()
            .map(|m| m.display().to_string())
            .unwrap()
    }

    #[test]
    fn digit_only_input_is_read_as_cents() {
        assert_eq!(display("150"), "1,50");
        assert_eq!(display("15000"), "150,00");
        assert_eq!(display("5"), "0,05");
    }

    #[test]
    fn separator_input_uses_brazilian_conventions() {
        assert_eq!(display("224,50"), "224,50");
        assert_eq!(display("1.234,56"), "1.234,56");
        assert_eq!(display("1234,5"), "1.234,50");
    }

    #[test]
    fn currency_prefix_is_dropped() {
        assert_eq!(display("R$ 224,50"), "224,50");
    }

    #[test]
    fn blank_input_is_a_no_op() {
        assert_eq!(normalize_currency(""), Ok(None));
        assert_eq!(normalize_currency("  R$  "), Ok(None));
    }

    #[test]
    fn garbage_and_negative_input_are_rejected() {
        assert!(normalize_currency("abc").is_err());
        assert!(normalize_currency("1,2,3").is_err());
        assert!(normalize_currency("-150,00").is_err());
    }

    #[test]
    fn thousands_grouping_covers_large_amounts() {
        assert_eq!(display("1234567,89"), "1.234.567,89");
    }

    #[test]
    fn display_form_round_trips_through_the_parser() {
        assert_eq!(parse_fee_display("1.234,56"), Decimal::new(123456, 2).into());
        assert_eq!(parse_fee_display("150,00"), Decimal::new(15000, 2).into());
        assert_eq!(parse_fee_display("garbage"), None);
    }
}
