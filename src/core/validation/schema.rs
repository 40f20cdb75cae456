//! Schema for the caller-supplied invoice fields
//!
//! `id` and `date` are never read from a submission: the store assigns the
//! id and the server stamps the date.

use super::validators::{
    cents_in_range, coerce_number, greater_than, one_of, rounded_cents, string,
};
use crate::core::form::{FieldErrors, FormData};
use crate::core::invoice::{InvoiceForm, InvoiceStatus, MAX_AMOUNT_CENTS};

/// Form field names
pub const CUSTOMER_ID: &str = "customerId";
pub const AMOUNT: &str = "amount";
pub const STATUS: &str = "status";

pub const CUSTOMER_ID_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_TOO_LARGE_MESSAGE: &str = "Please enter a smaller amount.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Validator for the `customerId`, `amount` and `status` fields
pub struct InvoiceSchema;

impl InvoiceSchema {
    /// Validate and coerce a submission without failing fast
    ///
    /// Every field is checked; on failure the returned map holds the
    /// messages of every field that did not pass.
    pub fn safe_parse(form: &FormData) -> Result<InvoiceForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = collect(
            &mut errors,
            CUSTOMER_ID,
            string(CUSTOMER_ID_MESSAGE)(form.get(CUSTOMER_ID)),
        );

        let amount = collect(
            &mut errors,
            AMOUNT,
            coerce_number(AMOUNT_MESSAGE)(form.get(AMOUNT)),
        )
        .and_then(|amount| {
            // Positivity is judged on what gets stored: 0.004 rounds to 0 cents
            let positive = greater_than(0.0, AMOUNT_MESSAGE)(rounded_cents(amount));
            let representable =
                cents_in_range(MAX_AMOUNT_CENTS, AMOUNT_TOO_LARGE_MESSAGE)(amount);
            let ok = positive.is_ok() && representable.is_ok();
            collect(&mut errors, AMOUNT, positive);
            collect(&mut errors, AMOUNT, representable);
            ok.then_some(amount)
        });

        let status = collect(
            &mut errors,
            STATUS,
            one_of::<InvoiceStatus>(STATUS_MESSAGE)(form.get(STATUS)),
        );

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => {
                Ok(InvoiceForm {
                    customer_id,
                    amount,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

fn collect<T>(errors: &mut FieldErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FormData {
        FormData::new()
            .with(CUSTOMER_ID, "c1")
            .with(AMOUNT, "19.99")
            .with(STATUS, "pending")
    }

    #[test]
    fn test_valid_submission() {
        let form = InvoiceSchema::safe_parse(&valid()).unwrap();
        assert_eq!(form.customer_id, "c1");
        assert_eq!(form.amount, 19.99);
        assert_eq!(form.status, InvoiceStatus::Pending);
        assert_eq!(form.amount_in_cents(), 1999);
    }

    #[test]
    fn test_amount_boundary() {
        let zero = valid_with(AMOUNT, "0");
        let errors = InvoiceSchema::safe_parse(&zero).unwrap_err();
        assert_eq!(errors.get(AMOUNT), [AMOUNT_MESSAGE]);

        let cent = valid_with(AMOUNT, "0.01");
        let form = InvoiceSchema::safe_parse(&cent).unwrap();
        assert_eq!(form.amount_in_cents(), 1);
    }

    #[test]
    fn test_sub_cent_amount_is_rejected() {
        let errors = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "0.004")).unwrap_err();
        assert_eq!(errors.get(AMOUNT), [AMOUNT_MESSAGE]);

        let form = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "0.005")).unwrap();
        assert_eq!(form.amount_in_cents(), 1);
    }

    #[test]
    fn test_amount_must_fit_the_amount_column() {
        let largest = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "21474836.47")).unwrap();
        assert_eq!(largest.amount_in_cents(), MAX_AMOUNT_CENTS);

        let errors = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "21474836.48")).unwrap_err();
        assert_eq!(errors.get(AMOUNT), [AMOUNT_TOO_LARGE_MESSAGE]);

        let errors = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "30000000")).unwrap_err();
        assert_eq!(errors.get(AMOUNT), [AMOUNT_TOO_LARGE_MESSAGE]);
    }

    #[test]
    fn test_non_numeric_amount_reports_amount_message() {
        let errors = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "ten")).unwrap_err();
        assert_eq!(errors.get(AMOUNT), [AMOUNT_MESSAGE]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_huge_amount_is_rejected() {
        let errors = InvoiceSchema::safe_parse(&valid_with(AMOUNT, "1e300")).unwrap_err();
        assert_eq!(errors.get(AMOUNT), [AMOUNT_TOO_LARGE_MESSAGE]);
    }

    #[test]
    fn test_all_failing_fields_are_reported() {
        let form = FormData::new().with(AMOUNT, "5").with(STATUS, "overdue");
        let errors = InvoiceSchema::safe_parse(&form).unwrap_err();

        assert_eq!(errors.get(CUSTOMER_ID), [CUSTOMER_ID_MESSAGE]);
        assert_eq!(errors.get(STATUS), [STATUS_MESSAGE]);
        assert!(!errors.contains(AMOUNT));
    }

    #[test]
    fn test_empty_submission_fails_every_field() {
        let errors = InvoiceSchema::safe_parse(&FormData::new()).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec![CUSTOMER_ID, AMOUNT, STATUS]);
    }

    #[test]
    fn test_id_and_date_in_submission_are_ignored() {
        let form = valid().with("id", "attacker-chosen").with("date", "1999-01-01");
        let parsed = InvoiceSchema::safe_parse(&form).unwrap();
        assert_eq!(parsed.customer_id, "c1");
    }

    fn valid_with(field: &str, value: &str) -> FormData {
        let mut form = FormData::new().with(field, value);
        for (name, default) in [(CUSTOMER_ID, "c1"), (AMOUNT, "19.99"), (STATUS, "pending")] {
            form.append(name, default);
        }
        form
    }
}
