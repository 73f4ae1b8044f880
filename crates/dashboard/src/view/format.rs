use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Shown in place of a percentage that cannot be computed.
const UNAVAILABLE: &str = "–";

/// `amount / total * 100`, rounded half away from zero to one decimal place.
///
/// Returns `None` when `total` is zero.
pub fn percentage_of_total(amount: Decimal, total: Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return None;
    }
    let percentage = amount.checked_div(total)?.checked_mul(dec!(100))?;
    Some(percentage.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

/// `62.5%`, or a dash when there is no percentage.
pub fn format_percentage(percentage: Option<Decimal>) -> String {
    match percentage {
        Some(p) => format!("{:.1}%", p),
        None => UNAVAILABLE.to_string(),
    }
}

pub fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "GBP" => Some("£"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        _ => None,
    }
}

/// Amount in millions with one decimal: `£1.5M`, or `CHF 1.5M` for
/// currencies without a known symbol.
pub fn format_millions(amount: Decimal, currency: &str) -> String {
    let millions = (amount / dec!(1000000))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    match currency_symbol(currency) {
        Some(symbol) => format!("{}{:.1}M", symbol, millions),
        None => format!("{} {:.1}M", currency, millions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_total() {
        assert_eq!(
            percentage_of_total(dec!(500000), dec!(800000)),
            Some(dec!(62.5))
        );
        assert_eq!(
            percentage_of_total(dec!(300000), dec!(800000)),
            Some(dec!(37.5))
        );
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage_of_total(dec!(1), dec!(3)), Some(dec!(33.3)));
        assert_eq!(percentage_of_total(dec!(2), dec!(3)), Some(dec!(66.7)));
        assert_eq!(percentage_of_total(dec!(1), dec!(16)), Some(dec!(6.3)));
    }

    #[test]
    fn test_percentage_of_zero_total() {
        assert_eq!(percentage_of_total(dec!(100), Decimal::ZERO), None);
        assert_eq!(format_percentage(None), "–");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Some(dec!(62.5))), "62.5%");
        assert_eq!(format_percentage(Some(dec!(100))), "100.0%");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(dec!(1500000), "GBP"), "£1.5M");
        assert_eq!(format_millions(dec!(500000), "GBP"), "£0.5M");
        assert_eq!(format_millions(dec!(11000000000), "USD"), "$11000.0M");
        assert_eq!(format_millions(dec!(2250000), "CHF"), "CHF 2.3M");
    }
}
