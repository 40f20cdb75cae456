//! Raw form submissions and the form state handed back to callers

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A form submission: field name to raw, not yet coerced value
///
/// URL-encoded forms only ever deliver strings, but programmatic callers
/// may pass any JSON value. When a field name repeats, the first value is
/// kept, matching what a browser's `FormData.get()` returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: IndexMap<String, Value>,
}

impl FormData {
    /// Create an empty submission
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used mostly by tests and programmatic callers
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.append(name, value);
        self
    }

    /// Append a field; ignored if the name is already present
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Get the raw value of a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.append(name, value);
        }
        form
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

/// Field-keyed validation messages, in the order fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more message for `field`
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`, empty if the field passed
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// State of an invoice form, as exchanged with the page that renders it
///
/// An empty state means "nothing to report". A failed submission fills
/// `errors` and/or `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormState {
    pub fn new(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.message.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_value_wins_for_repeated_fields() {
        let form: FormData = vec![
            ("status".to_string(), "paid".to_string()),
            ("status".to_string(), "pending".to_string()),
        ]
        .into();

        assert_eq!(form.len(), 1);
        assert_eq!(form.get("status"), Some(&json!("paid")));
    }

    #[test]
    fn test_missing_field_is_none() {
        let form = FormData::new().with("amount", "12");
        assert!(form.get("customerId").is_none());
    }

    #[test]
    fn test_field_errors_keep_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.push("status", "bad status");
        errors.push("customerId", "bad customer");
        errors.push("status", "still bad");

        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["status", "customerId"]);
        assert_eq!(errors.get("status").len(), 2);
        assert!(errors.get("amount").is_empty());
    }

    #[test]
    fn test_form_state_serialization() {
        let mut errors = FieldErrors::new();
        errors.push("amount", "Please enter an amount greater than $0.");
        let state = FormState::new(errors, "Missing Fields. Failed to Create Invoice.");

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "errors": { "amount": ["Please enter an amount greater than $0."] },
                "message": "Missing Fields. Failed to Create Invoice."
            })
        );

        let empty = serde_json::to_value(FormState::default()).unwrap();
        assert_eq!(empty, json!({}));
    }
}
