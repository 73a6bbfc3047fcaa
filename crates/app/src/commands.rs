//! Dispatches parsed commands onto the ledger and renders the result.

use std::io::Write;

use chrono::NaiveDate;
use engine::{Confirm, Dashboard, KeyValueStore, Ledger, NewTransaction, ViewFilter, views};
use serde_json::json;

use crate::{
    cli::{AddArgs, Command, FilterArgs, Format},
    error::Result,
    render::{self, Style},
};

/// Per-invocation values the commands need besides the ledger.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub today: NaiveDate,
    pub format: Format,
    pub style: Style,
}

pub fn execute<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    command: Command,
    ctx: &Context,
    confirm: &mut impl Confirm,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add(args) => add(ledger, args, ctx, out),
        Command::Delete(args) => {
            let deleted = ledger.delete(&args.id);
            match ctx.format {
                Format::Json => render::json(out, &json!({ "id": args.id, "deleted": deleted })),
                Format::Text => {
                    if deleted {
                        writeln!(out, "Deleted {}", args.id)?;
                    } else {
                        writeln!(out, "No transaction with id {}", args.id)?;
                    }
                    render::totals(out, &views::totals(ledger.transactions()), ctx.style)
                }
            }
        }
        Command::Clear(args) => {
            let cleared = if args.yes {
                ledger.clear_all(&mut |_: &str| true)
            } else {
                ledger.clear_all(confirm)
            };
            match ctx.format {
                Format::Json => render::json(out, &json!({ "cleared": cleared })),
                Format::Text => {
                    if cleared {
                        writeln!(out, "All transactions deleted.")?;
                    } else {
                        writeln!(out, "Nothing deleted.")?;
                    }
                    Ok(())
                }
            }
        }
        Command::List(filter) => {
            let items = views::filter_transactions(ledger.transactions(), &view_filter(filter));
            match ctx.format {
                Format::Json => render::json(out, &items),
                Format::Text => render::transactions(out, &items, ctx.style),
            }
        }
        Command::Totals => {
            let totals = views::totals(ledger.transactions());
            match ctx.format {
                Format::Json => render::json(out, &totals),
                Format::Text => render::totals(out, &totals, ctx.style),
            }
        }
        Command::Series => {
            let points = views::balance_series(ledger.transactions());
            match ctx.format {
                Format::Json => render::json(out, &points),
                Format::Text => render::series(out, &points, ctx.style),
            }
        }
        Command::Categories => {
            let entries = views::category_breakdown(ledger.transactions(), ctx.today);
            match ctx.format {
                Format::Json => render::json(out, &entries),
                Format::Text => render::categories(out, &entries, ctx.style),
            }
        }
        Command::Dashboard(filter) => {
            let view = Dashboard::compute(ledger.transactions(), &view_filter(filter), ctx.today);
            match ctx.format {
                Format::Json => render::json(out, &view),
                Format::Text => render::dashboard(out, &view, ctx.style),
            }
        }
    }
}

fn add<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    args: AddArgs,
    ctx: &Context,
    out: &mut impl Write,
) -> Result<()> {
    let date = match args.date.as_deref() {
        Some(raw) => engine::parse_date(raw)?,
        None => ctx.today,
    };
    let input = NewTransaction::new(args.kind, args.amount, date)
        .category(args.category)
        .note(args.note);
    let tx = ledger.add(input)?.clone();
    match ctx.format {
        Format::Json => render::json(out, &tx),
        Format::Text => {
            writeln!(
                out,
                "Added {} {} ({}) on {} [{}]",
                tx.kind,
                tx.amount,
                tx.category,
                tx.date_string(),
                tx.id
            )?;
            render::totals(out, &views::totals(ledger.transactions()), ctx.style)
        }
    }
}

fn view_filter(args: FilterArgs) -> ViewFilter {
    ViewFilter::new(args.kind, args.search)
}
