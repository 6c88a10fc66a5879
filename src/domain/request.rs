use super::payment::{Amount, PaymentRequest};
use crate::error::ValidationError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Turns raw form input into a `PaymentRequest`.
///
/// Building is pure apart from minting the idempotency key, which differs on
/// every call.
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn build(
        customer_id: &str,
        amount_text: &str,
        payee_id: &str,
    ) -> Result<PaymentRequest, ValidationError> {
        let amount = parse_amount(amount_text)?;
        let customer_id = required("customerId", customer_id)?;
        let payee_id = required("payeeId", payee_id)?;

        Ok(PaymentRequest::new(customer_id, amount, payee_id))
    }
}

/// Accepts plain decimal notation only: digits, optionally followed by a dot
/// and more digits. Signs, exponents and digit separators are rejected.
fn parse_amount(text: &str) -> Result<Amount, ValidationError> {
    let text = text.trim();
    let (whole, fraction) = text.split_once('.').unwrap_or((text, "0"));
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(ValidationError::InvalidAmount);
    }

    Decimal::from_str(text)
        .map_err(|_| ValidationError::InvalidAmount)
        .and_then(Amount::try_from)
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_valid_request() {
        let request = RequestBuilder::build("c_123", "125.50", "p_789").unwrap();
        assert_eq!(request.customer_id(), "c_123");
        assert_eq!(request.amount().value(), dec!(125.50));
        assert_eq!(request.currency(), "USD");
        assert_eq!(request.payee_id(), "p_789");
    }

    #[test]
    fn test_build_rejects_bad_amounts() {
        for text in [
            "0", "-5", "abc", "", "  ", "0.00", "12.345", "1,000", "NaN", "1_000", "1e2", "1E2",
            "+5", "5.", ".5", "1.2.3",
        ] {
            assert_eq!(
                RequestBuilder::build("c_123", text, "p_789"),
                Err(ValidationError::InvalidAmount),
                "amount {text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_build_trims_input() {
        let request = RequestBuilder::build("  c_123 ", " 10 ", "\tp_789\n").unwrap();
        assert_eq!(request.customer_id(), "c_123");
        assert_eq!(request.payee_id(), "p_789");
        assert_eq!(request.amount().value(), dec!(10));
    }

    #[test]
    fn test_build_requires_ids() {
        assert_eq!(
            RequestBuilder::build("   ", "10", "p_789"),
            Err(ValidationError::MissingField("customerId"))
        );
        assert_eq!(
            RequestBuilder::build("c_123", "10", ""),
            Err(ValidationError::MissingField("payeeId"))
        );
    }

    #[test]
    fn test_identical_fields_get_distinct_keys() {
        let first = RequestBuilder::build("c_123", "125.50", "p_789").unwrap();
        let second = RequestBuilder::build("c_123", "125.50", "p_789").unwrap();
        assert_ne!(first.idempotency_key(), second.idempotency_key());
    }
}
