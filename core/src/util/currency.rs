use crate::prelude::PriceParseError;

/// Reads a display price such as `"₱1,598,000"` as a whole number.
///
/// Every character that is not an ASCII digit is dropped and the remaining
/// digit run is read in base 10.
pub fn parse_price(display: &str) -> Result<u64, PriceParseError> {
    let digits: String = display.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(PriceParseError::NoDigits(display.to_string()));
    }
    digits
        .parse::<u64>()
        .map_err(|_| PriceParseError::Overflow(display.to_string()))
}

/// Renders a whole amount with comma grouping and the peso sign.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₱{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_peso_prices() {
        assert_eq!(parse_price("₱1,598,000"), Ok(1_598_000));
        assert_eq!(parse_price("₱998,000"), Ok(998_000));
        assert_eq!(parse_price("PHP 2 198 000.-"), Ok(2_198_000));
    }

    #[test]
    fn no_digits_is_an_error_not_a_sentinel_number() {
        assert_eq!(
            parse_price("Call for price"),
            Err(PriceParseError::NoDigits("Call for price".into()))
        );
        assert!(parse_price("").is_err());
    }

    #[test]
    fn oversized_digit_runs_overflow() {
        assert!(matches!(
            parse_price("₱99,999,999,999,999,999,999"),
            Err(PriceParseError::Overflow(_))
        ));
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_price(998_000), "₱998,000");
        assert_eq!(format_price(1_598_000), "₱1,598,000");
        assert_eq!(format_price(0), "₱0");
    }
}
