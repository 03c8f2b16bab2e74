//! Financial mutation guard.
//!
//! Debt is writable exactly twice in a node's life: a bounded initial
//! value at creation, and an unconditional reset to zero through the
//! privileged bulk clear-debt action. Every other write path must call
//! [`deny_debt_mutation`] before deserializing its payload, so the
//! restriction lives in one place instead of being re-implemented per
//! entry point.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Upper bound for the debt column: NUMERIC(15, 2).
pub fn debt_ceiling() -> Decimal {
    Decimal::new(999_999_999_999_999, 2)
}

/// Validate the debt supplied at creation time.
///
/// Absent debt defaults to zero. Both bounds are inclusive: zero and
/// the ceiling itself are accepted.
pub fn validate_initial_debt(debt: Option<Decimal>) -> AppResult<Decimal> {
    let debt = debt.unwrap_or(Decimal::ZERO);

    if debt < Decimal::ZERO {
        return Err(AppError::range("debt cannot be negative"));
    }
    if debt > debt_ceiling() {
        return Err(AppError::range(format!(
            "debt cannot exceed {}",
            debt_ceiling()
        )));
    }

    Ok(debt)
}

/// Reject any update payload that carries a `debt` key.
///
/// The value is irrelevant — even re-sending the current debt fails, so
/// the contract stays simple and auditable. Called on the raw JSON
/// before deserialization so the whole update is blocked, not just the
/// field.
pub fn deny_debt_mutation(payload: &Value) -> AppResult<()> {
    if payload.get("debt").is_some() {
        return Err(AppError::ForbiddenField("debt"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_debt_defaults_to_zero() {
        assert_eq!(validate_initial_debt(None).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert_eq!(
            validate_initial_debt(Some(Decimal::ZERO)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            validate_initial_debt(Some(debt_ceiling())).unwrap(),
            debt_ceiling()
        );
    }

    #[test]
    fn negative_debt_is_out_of_range() {
        let err = validate_initial_debt(Some(Decimal::new(-1, 2))).unwrap_err();
        assert!(matches!(err, AppError::Range(_)));
    }

    #[test]
    fn debt_above_ceiling_is_out_of_range() {
        let above = debt_ceiling() + Decimal::new(1, 2);
        let err = validate_initial_debt(Some(above)).unwrap_err();
        assert!(matches!(err, AppError::Range(_)));
    }

    #[test]
    fn update_payload_with_debt_key_is_rejected() {
        let payload = json!({"name": "Node", "debt": "100.00"});
        let err = deny_debt_mutation(&payload).unwrap_err();
        assert!(matches!(err, AppError::ForbiddenField("debt")));
    }

    #[test]
    fn debt_key_is_rejected_regardless_of_value() {
        // Re-sending the current value, zero, or even null still fails.
        for value in [json!("0"), json!(0), json!(null)] {
            let payload = json!({"debt": value});
            assert!(deny_debt_mutation(&payload).is_err());
        }
    }

    #[test]
    fn payload_without_debt_passes() {
        let payload = json!({"name": "Node", "city": "Berlin"});
        assert!(deny_debt_mutation(&payload).is_ok());
    }
}
