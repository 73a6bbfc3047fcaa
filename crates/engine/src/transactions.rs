//! Transaction primitives.
//!
//! A `Transaction` is a single dated income or expense. Records are created
//! through [`Ledger::add`](crate::Ledger::add) and never edited afterwards.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

/// Date format used on the wire and in user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Category used when the user leaves the field empty.
    pub fn default_category(self) -> &'static str {
        match self {
            Self::Income => "General",
            Self::Expense => "Misc",
        }
    }

    /// Sign applied to the amount when accumulating a balance.
    pub(crate) fn signed(self, amount: MoneyCents) -> MoneyCents {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Opaque transaction identifier.
///
/// New ids are UUID v4 in simple (hex) form, but any non-empty string read
/// back from storage is accepted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub category: String,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// Builds a record with a freshly generated id.
    ///
    /// Rejects non-positive amounts and amounts above [`MoneyCents::MAX`];
    /// an empty category falls back to the
    /// kind default.
    pub fn new(
        kind: TransactionKind,
        amount: MoneyCents,
        category: &str,
        note: &str,
        date: NaiveDate,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        if !amount.is_within_limit() {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self {
            id: TransactionId::generate(),
            kind,
            amount,
            category: resolve_category(kind, category),
            note: note.trim().to_string(),
            date,
        })
    }

    /// Amount with the sign of its kind (income positive, expense negative).
    pub fn signed_amount(&self) -> MoneyCents {
        self.kind.signed(self.amount)
    }

    /// Date in its `YYYY-MM-DD` wire form.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if self.id.as_str().is_empty() {
            return Err(EngineError::Storage("transaction id is empty".to_string()));
        }
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "stored amount for {} must be > 0",
                self.id
            )));
        }
        if !self.amount.is_within_limit() {
            return Err(EngineError::InvalidAmount(format!(
                "stored amount for {} exceeds {}",
                self.id,
                MoneyCents::MAX
            )));
        }
        if self.category.trim().is_empty() {
            return Err(EngineError::Storage(format!(
                "transaction {} has an empty category",
                self.id
            )));
        }
        Ok(())
    }
}

/// User input for a new transaction, still unvalidated.
///
/// `amount` is kept as raw text so that a non-numeric value is rejected by
/// the ledger the same way a non-positive one is.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: String,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, amount: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind,
            amount: amount.into(),
            category: String::new(),
            note: String::new(),
            date,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub(crate) fn into_transaction(self) -> ResultEngine<Transaction> {
        let amount: MoneyCents = self.amount.parse()?;
        Transaction::new(self.kind, amount, &self.category, &self.note, self.date)
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(value.trim().to_string()))
}

fn resolve_category(kind: TransactionKind, category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        kind.default_category().to_string()
    } else {
        trimmed.to_string()
    }
}
