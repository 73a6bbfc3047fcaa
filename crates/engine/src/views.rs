//! Derived views over a ledger.
//!
//! All functions here are pure: they take the transactions (and, where it
//! matters, the current date) as arguments and recompute everything from
//! scratch. The ledger is small enough that no incremental state is kept.

use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, Transaction, TransactionKind};

/// Length of the trailing window used by [`category_breakdown`].
pub const TRAILING_WINDOW_DAYS: u64 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn matches(self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

/// Transient list filter: kind plus free-text search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub kind: TypeFilter,
    pub search: String,
}

impl ViewFilter {
    pub fn new(kind: TypeFilter, search: impl Into<String>) -> Self {
        Self {
            kind,
            search: search.into(),
        }
    }

    /// Whether `tx` passes both the kind filter and the search text.
    ///
    /// Search is a case-insensitive substring match on category and note, and
    /// a plain substring match on the compact amount and the date string.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if !self.kind.matches(tx.kind) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        tx.category.to_lowercase().contains(&needle)
            || tx.note.to_lowercase().contains(&needle)
            || tx.amount.compact().contains(&needle)
            || tx.date_string().contains(&needle)
    }
}

/// Returns the transactions passing `filter`, in their original order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &ViewFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|tx| filter.matches(tx)).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: MoneyCents,
    pub expense: MoneyCents,
    pub balance: MoneyCents,
}

/// Income, expense and balance over every transaction, ignoring any filter.
///
/// Sums saturate at the `i64` bounds; both sums are non-negative, so the
/// balance subtraction cannot overflow.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = MoneyCents::ZERO;
    let mut expense = MoneyCents::ZERO;
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => income = income.saturating_add(tx.amount),
            TransactionKind::Expense => expense = expense.saturating_add(tx.amount),
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: MoneyCents,
}

/// Running balance in date order, one point per transaction.
///
/// Transactions sharing a date keep their relative ledger order (stable
/// sort) and each produce their own point.
pub fn balance_series(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);

    let mut running = MoneyCents::ZERO;
    ordered
        .into_iter()
        .map(|tx| {
            running = running.saturating_add(tx.signed_amount());
            BalancePoint {
                date: tx.date,
                balance: running,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: MoneyCents,
}

/// First day of the trailing window ending on `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(TRAILING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}

/// Expense totals per category over the trailing window.
///
/// An expense is in the window when its date is on or after
/// `today - 30 days`. Categories appear in the order they are first met in
/// `transactions`.
pub fn category_breakdown(transactions: &[Transaction], today: NaiveDate) -> Vec<CategoryTotal> {
    let cutoff = window_start(today);
    let mut out: Vec<CategoryTotal> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense && tx.date >= cutoff)
    {
        match out.iter_mut().find(|entry| entry.category == tx.category) {
            Some(entry) => entry.total = entry.total.saturating_add(tx.amount),
            None => out.push(CategoryTotal {
                category: tx.category.clone(),
                total: tx.amount,
            }),
        }
    }
    out
}

/// Every derived view, recomputed in one pass after a mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dashboard<'a> {
    pub transactions: Vec<&'a Transaction>,
    pub totals: Totals,
    pub balance_series: Vec<BalancePoint>,
    pub categories: Vec<CategoryTotal>,
}

impl<'a> Dashboard<'a> {
    pub fn compute(
        transactions: &'a [Transaction],
        filter: &ViewFilter,
        today: NaiveDate,
    ) -> Self {
        Self {
            transactions: filter_transactions(transactions, filter),
            totals: totals(transactions),
            balance_series: balance_series(transactions),
            categories: category_breakdown(transactions, today),
        }
    }
}
