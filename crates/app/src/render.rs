//! Plain-text and JSON rendering of the derived views.

use std::io::Write;

use crossterm::style::{Color, Stylize};
use engine::{BalancePoint, CategoryTotal, Dashboard, MoneyCents, Totals, Transaction, TransactionKind};
use serde::Serialize;

use crate::error::Result;

const BAR_WIDTH: i64 = 30;

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    fn paint(self, text: String, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text
        }
    }

    fn money(self, amount: MoneyCents) -> String {
        let text = amount.to_string();
        if amount.is_negative() {
            self.paint(text, Color::Red)
        } else if amount.is_positive() {
            self.paint(text, Color::Green)
        } else {
            text
        }
    }
}

pub fn json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn transactions(out: &mut impl Write, items: &[&Transaction], style: Style) -> Result<()> {
    if items.is_empty() {
        writeln!(out, "No transactions.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<32}  {:<10}  {:<7}  {:>12}  {:<16}  NOTE",
        "ID", "DATE", "TYPE", "AMOUNT", "CATEGORY"
    )?;
    for tx in items {
        let amount = format!("{:>12}", tx.amount.to_string());
        let amount = match tx.kind {
            TransactionKind::Income => style.paint(amount, Color::Green),
            TransactionKind::Expense => style.paint(amount, Color::Red),
        };
        writeln!(
            out,
            "{:<32}  {:<10}  {:<7}  {}  {:<16}  {}",
            tx.id,
            tx.date_string(),
            tx.kind,
            amount,
            tx.category,
            tx.note
        )?;
    }
    Ok(())
}

pub fn totals(out: &mut impl Write, totals: &Totals, style: Style) -> Result<()> {
    writeln!(
        out,
        "Income {}  Expense {}  Balance {}",
        style.paint(totals.income.to_string(), Color::Green),
        style.paint(totals.expense.to_string(), Color::Red),
        style.money(totals.balance)
    )?;
    Ok(())
}

pub fn series(out: &mut impl Write, points: &[BalancePoint], style: Style) -> Result<()> {
    if points.is_empty() {
        writeln!(out, "No balance history yet.")?;
        return Ok(());
    }
    for point in points {
        let balance = format!("{:>12}", point.balance.to_string());
        let balance = if point.balance.is_negative() {
            style.paint(balance, Color::Red)
        } else {
            balance
        };
        writeln!(out, "{}  {}", point.date, balance)?;
    }
    Ok(())
}

pub fn categories(out: &mut impl Write, entries: &[CategoryTotal], style: Style) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No expenses in the last 30 days.")?;
        return Ok(());
    }
    let max = entries
        .iter()
        .map(|e| e.total.cents())
        .max()
        .unwrap_or(0)
        .max(1);
    let label_width = entries.iter().map(|e| e.category.chars().count()).max().unwrap_or(0);
    for entry in entries {
        let len = (i128::from(entry.total.cents()) * i128::from(BAR_WIDTH) / i128::from(max))
            .max(1) as usize;
        writeln!(
            out,
            "{:<label_width$}  {:>12}  {}",
            entry.category,
            entry.total.to_string(),
            style.paint("#".repeat(len), Color::Red)
        )?;
    }
    Ok(())
}

pub fn dashboard(out: &mut impl Write, view: &Dashboard<'_>, style: Style) -> Result<()> {
    totals(out, &view.totals, style)?;
    writeln!(out)?;
    transactions(out, &view.transactions, style)?;
    writeln!(out, "\nBalance over time")?;
    series(out, &view.balance_series, style)?;
    writeln!(out, "\nExpenses, last 30 days")?;
    categories(out, &view.categories, style)?;
    Ok(())
}
