//! The ledger store: the authoritative list of transactions and its
//! persisted copy.
//!
//! Every mutation writes the whole collection back to the store. Storage
//! problems never surface as errors: a failed read starts an empty ledger, a
//! failed write keeps the in-memory state and logs a warning.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    NewTransaction, ResultEngine, Transaction, TransactionId,
    storage::{DEFAULT_STORAGE_KEY, KeyValueStore},
};

/// Warning shown before [`Ledger::clear_all`] wipes everything.
pub const CLEAR_ALL_WARNING: &str =
    "This will permanently delete ALL transactions. This cannot be undone. Continue?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    key: String,
    /// Most recently added first.
    transactions: Vec<Transaction>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Loads the ledger from the default slot.
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Loads the ledger from `key`, falling back to an empty ledger when the
    /// slot is missing, unreadable or not a JSON array.
    pub fn load_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let transactions = match store.get(&key) {
            Ok(Some(raw)) => decode_ledger(&key, &raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read ledger from \"{key}\": {err}");
                Vec::new()
            }
        };
        tracing::debug!("loaded {} transactions from \"{key}\"", transactions.len());
        Self {
            store,
            key,
            transactions,
        }
    }

    /// Validates and prepends a new transaction, then persists.
    ///
    /// On an invalid amount nothing changes and the error is returned for the
    /// caller to show.
    pub fn add(&mut self, input: NewTransaction) -> ResultEngine<&Transaction> {
        self.add_with_ids(input, TransactionId::generate)
    }

    /// [`Ledger::add`] with ids drawn from `next_id` until one is not taken.
    /// Ids loaded from storage are arbitrary strings, so a fresh id is always
    /// checked against the ledger.
    pub(crate) fn add_with_ids(
        &mut self,
        input: NewTransaction,
        mut next_id: impl FnMut() -> TransactionId,
    ) -> ResultEngine<&Transaction> {
        let mut tx = input.into_transaction()?;
        tx.id = loop {
            let id = next_id();
            if self.get(id.as_str()).is_none() {
                break id;
            }
            tracing::debug!("generated id {id} is already taken; retrying");
        };
        tracing::debug!("adding {} {} ({})", tx.kind, tx.amount, tx.id);
        self.transactions.insert(0, tx);
        self.persist();
        Ok(&self.transactions[0])
    }

    /// Removes the transaction with `id`. Returns `false` (and leaves the
    /// store untouched) when no such transaction exists.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id.as_str() != id);
        if self.transactions.len() == before {
            tracing::debug!("delete: no transaction with id {id}");
            return false;
        }
        tracing::debug!("deleted transaction {id}");
        self.persist();
        true
    }

    /// Empties the ledger and removes the persisted slot once `confirm`
    /// agrees. Returns whether the ledger was cleared.
    pub fn clear_all(&mut self, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(CLEAR_ALL_WARNING) {
            tracing::debug!("clear all declined");
            return false;
        }
        self.transactions.clear();
        if let Err(err) = self.store.remove(&self.key) {
            tracing::warn!("failed to remove ledger slot \"{}\": {err}", self.key);
        }
        tracing::info!("ledger cleared");
        true
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.transactions) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("failed to serialize ledger: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(&self.key, &payload) {
            tracing::warn!("failed to persist ledger to \"{}\": {err}", self.key);
        }
    }
}

impl<S> Ledger<S> {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Decodes a stored payload. Records that do not decode, break an invariant
/// or repeat an earlier id are dropped one by one.
fn decode_ledger(key: &str, raw: &str) -> Vec<Transaction> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            tracing::warn!(
                "ledger slot \"{key}\" holds a {} instead of an array; starting empty",
                json_type(&other)
            );
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!("ledger slot \"{key}\" is not valid JSON ({err}); starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let tx = match serde_json::from_value::<Transaction>(item) {
            Ok(tx) => tx,
            Err(err) => {
                tracing::warn!("dropping stored record #{index}: {err}");
                continue;
            }
        };
        if let Err(err) = tx.validate() {
            tracing::warn!("dropping stored record #{index}: {err}");
            continue;
        }
        if !seen.insert(tx.id.clone()) {
            tracing::warn!("dropping stored record #{index}: duplicate id {}", tx.id);
            continue;
        }
        transactions.push(tx);
    }
    transactions
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
