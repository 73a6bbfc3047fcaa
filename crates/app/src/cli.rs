use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{TransactionKind, TypeFilter};

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Track personal income and expenses in a local ledger")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the directory holding the ledger file.
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
    /// Override the timezone used to compute "today" (IANA name).
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record an income or an expense.
    Add(AddArgs),
    /// Delete a transaction by id.
    Delete(DeleteArgs),
    /// Delete every transaction.
    Clear(ClearArgs),
    /// List transactions, newest entry first.
    List(FilterArgs),
    /// Show income, expense and balance.
    Totals,
    /// Show the running balance by date.
    Series,
    /// Show expenses per category over the last 30 days.
    Categories,
    /// Show every view at once.
    Dashboard(FilterArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(value_parser = parse_kind)]
    pub kind: TransactionKind,
    /// Positive amount, e.g. `250` or `12.50`.
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    #[arg(long, short, default_value = "")]
    pub category: String,
    #[arg(long, short, default_value = "")]
    pub note: String,
    /// Date as YYYY-MM-DD (defaults to today).
    #[arg(long, short)]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long = "type", short = 't', value_parser = parse_type_filter, default_value = "all")]
    pub kind: TypeFilter,
    #[arg(long, short, default_value = "")]
    pub search: String,
}

fn parse_kind(raw: &str) -> Result<TransactionKind, String> {
    raw.parse().map_err(|_| format!("expected income or expense, got {raw}"))
}

fn parse_type_filter(raw: &str) -> Result<TypeFilter, String> {
    raw.parse()
        .map_err(|_| format!("expected all, income or expense, got {raw}"))
}
