//! Invoice domain types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Wire format of invoice dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount, in cents, the `amount INT` column holds
pub const MAX_AMOUNT_CENTS: i64 = i32::MAX as i64;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    /// Exact match only: no trimming, no case folding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown invoice status '{}'", s))
    }
}

/// The caller-supplied invoice fields after validation and coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Major currency units, strictly positive
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Amount in cents
    ///
    /// Rounded so that decimal inputs like `19.99` land on `1999` rather
    /// than truncating the binary approximation.
    pub fn amount_in_cents(&self) -> i64 {
        to_cents(self.amount)
    }

    /// Row values for an INSERT dated `date`
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            amount_in_cents: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
            date,
        }
    }

    /// Row values for an UPDATE; the stored date is left alone
    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            amount_in_cents: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
        }
    }
}

fn to_cents(amount: f64) -> i64 {
    crate::core::validation::validators::rounded_cents(amount) as i64
}

/// Values written by an INSERT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by an UPDATE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

/// A stored invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    /// Cents
    pub amount: i64,
    pub status: InvoiceStatus,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl Invoice {
    pub fn from_new(id: Uuid, new: NewInvoice) -> Self {
        Self {
            id,
            customer_id: new.customer_id,
            amount: new.amount_in_cents,
            status: new.status,
            date: new.date,
        }
    }

    pub fn apply(&mut self, changes: InvoiceChanges) {
        self.customer_id = changes.customer_id;
        self.amount = changes.amount_in_cents;
        self.status = changes.status;
    }
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
