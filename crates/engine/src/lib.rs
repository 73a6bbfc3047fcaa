//! Core of the tally personal finance tracker.
//!
//! - [`Ledger`] owns the transactions and keeps a [`KeyValueStore`] slot in
//!   sync with them.
//! - [`views`] computes totals, the running balance series and the trailing
//!   30 day expense breakdown from a slice of transactions.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use engine::{Ledger, MemoryStore, NewTransaction, TransactionKind, views};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
//! let mut ledger = Ledger::load(MemoryStore::new());
//! ledger
//!     .add(NewTransaction::new(TransactionKind::Income, "1000", today).category("Salary"))
//!     .unwrap();
//! ledger
//!     .add(NewTransaction::new(TransactionKind::Expense, "250", today).category("Food"))
//!     .unwrap();
//!
//! let totals = views::totals(ledger.transactions());
//! assert_eq!(totals.balance.to_string(), "750.00");
//! ```

pub use error::EngineError;
pub use ledger::{CLEAR_ALL_WARNING, Confirm, Ledger};
pub use money::MoneyCents;
pub use storage::{DEFAULT_STORAGE_KEY, FileStore, KeyValueStore, MemoryStore};
pub use transactions::{
    DATE_FORMAT, NewTransaction, Transaction, TransactionId, TransactionKind, parse_date,
};
pub use views::{
    BalancePoint, CategoryTotal, Dashboard, Totals, TypeFilter, ViewFilter, balance_series,
    category_breakdown, filter_transactions, totals,
};

mod error;
mod ledger;
mod money;
mod storage;
mod transactions;
pub mod views;

type ResultEngine<T> = Result<T, EngineError>;
