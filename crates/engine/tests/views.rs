use chrono::{Days, NaiveDate};
use engine::{
    Dashboard, MoneyCents, Transaction, TransactionId, TransactionKind, TypeFilter, ViewFilter,
    views,
};

fn day(value: &str) -> NaiveDate {
    engine::parse_date(value).unwrap()
}

fn tx(id: &str, kind: TransactionKind, units: i64, category: &str, note: &str, date: &str) -> Transaction {
    Transaction {
        id: TransactionId::from(id),
        kind,
        amount: MoneyCents::from_units(units),
        category: category.to_string(),
        note: note.to_string(),
        date: day(date),
    }
}

/// Most recently added first, dates deliberately out of order.
fn sample() -> Vec<Transaction> {
    use TransactionKind::{Expense, Income};
    vec![
        tx("t6", Expense, 30, "Food", "Groceries", "2024-05-10"),
        tx("t5", Income, 200, "Freelance", "Logo design", "2024-05-03"),
        tx("t4", Expense, 120, "Travel", "train to Milan", "2024-03-20"),
        tx("t3", Expense, 15, "food", "", "2024-05-03"),
        tx("t2", Expense, 900, "Rent", "May", "2024-05-01"),
        tx("t1", Income, 2500, "Salary", "April", "2024-04-30"),
    ]
}

fn ids<'a>(items: impl IntoIterator<Item = &'a Transaction>) -> Vec<&'a str> {
    items.into_iter().map(|tx| tx.id.as_str()).collect()
}

#[test]
fn totals_cover_the_whole_ledger() {
    let txs = sample();
    let totals = views::totals(&txs);
    assert_eq!(totals.income, MoneyCents::from_units(2700));
    assert_eq!(totals.expense, MoneyCents::from_units(1065));
    assert_eq!(totals.balance, totals.income - totals.expense);

    let empty = views::totals(&[]);
    assert_eq!(empty.balance, MoneyCents::ZERO);
}

#[test]
fn type_filter_keeps_ledger_order() {
    let txs = sample();
    let incomes = views::filter_transactions(&txs, &ViewFilter::new(TypeFilter::Income, ""));
    assert_eq!(ids(incomes), vec!["t5", "t1"]);

    let all = views::filter_transactions(&txs, &ViewFilter::default());
    assert_eq!(all.len(), txs.len());
}

#[test]
fn search_matches_category_note_amount_and_date() {
    let txs = sample();
    let search = |text: &str| {
        ids(views::filter_transactions(
            &txs,
            &ViewFilter::new(TypeFilter::All, text),
        ))
    };

    assert_eq!(search("FOOD"), vec!["t6", "t3"]);
    assert_eq!(search("milan"), vec!["t4"]);
    assert_eq!(search("2500"), vec!["t1"]);
    assert_eq!(search("2024-05-03"), vec!["t5", "t3"]);
    assert_eq!(search("nothing like this"), Vec::<&str>::new());
}

#[test]
fn search_matches_fractional_amounts() {
    let mut txs = sample();
    txs.insert(
        0,
        Transaction {
            amount: MoneyCents::new(1250),
            ..tx("t7", TransactionKind::Expense, 0, "Coffee", "", "2024-05-11")
        },
    );
    let search = |text: &str| {
        ids(views::filter_transactions(
            &txs,
            &ViewFilter::new(TypeFilter::All, text),
        ))
    };

    assert_eq!(search("12.5"), vec!["t7"]);
    assert_eq!(search("12,5"), Vec::<&str>::new());
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    use TransactionKind::{Expense, Income};
    let big = |id: &str, kind| Transaction {
        amount: MoneyCents::MAX,
        ..tx(id, kind, 0, "Big", "", "2024-05-01")
    };
    let txs: Vec<Transaction> = (0..20_000)
        .map(|i| big(&format!("i{i}"), Income))
        .chain((0..10).map(|i| big(&format!("e{i}"), Expense)))
        .collect();

    let totals = views::totals(&txs);
    assert_eq!(totals.income, MoneyCents::new(i64::MAX));
    assert_eq!(totals.expense, MoneyCents::new(MoneyCents::MAX.cents() * 10));
    assert_eq!(totals.balance, totals.income - totals.expense);

    let series = views::balance_series(&txs);
    assert_eq!(series.len(), txs.len());
    assert!(series.iter().all(|point| point.balance.is_positive()));
}

#[test]
fn type_filter_and_search_intersect() {
    let txs = sample();
    let filter = ViewFilter::new(TypeFilter::Income, "05-03");
    assert_eq!(ids(views::filter_transactions(&txs, &filter)), vec!["t5"]);

    let filter = ViewFilter::new(TypeFilter::Income, "food");
    assert!(views::filter_transactions(&txs, &filter).is_empty());
}

#[test]
fn balance_series_is_chronological_and_complete() {
    let txs = sample();
    let series = views::balance_series(&txs);
    assert_eq!(series.len(), txs.len());

    let dates: Vec<String> = series.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(
        dates,
        vec![
            "2024-03-20",
            "2024-04-30",
            "2024-05-01",
            "2024-05-03",
            "2024-05-03",
            "2024-05-10"
        ]
    );

    let balances: Vec<i64> = series.iter().map(|p| p.balance.cents() / 100).collect();
    // Equal dates keep ledger order: t5 (+200) before t3 (-15).
    assert_eq!(balances, vec![-120, 2380, 1480, 1680, 1665, 1635]);
    assert_eq!(series.last().unwrap().balance, views::totals(&txs).balance);
}

#[test]
fn balance_series_of_empty_ledger_is_empty() {
    assert!(views::balance_series(&[]).is_empty());
}

#[test]
fn breakdown_uses_trailing_thirty_days() {
    let txs = sample();
    let today = day("2024-05-10");
    let breakdown = views::category_breakdown(&txs, today);

    let entries: Vec<(&str, i64)> = breakdown
        .iter()
        .map(|e| (e.category.as_str(), e.total.cents() / 100))
        .collect();
    // Travel is 51 days old; category labels are case sensitive.
    assert_eq!(entries, vec![("Food", 30), ("food", 15), ("Rent", 900)]);
}

#[test]
fn breakdown_excludes_expense_forty_days_old() {
    let today = day("2024-05-10");
    let forty_days_ago = today.checked_sub_days(Days::new(40)).unwrap().to_string();
    let txs = vec![
        tx("a", TransactionKind::Expense, 300, "Travel", "", &forty_days_ago),
        tx("b", TransactionKind::Expense, 10, "Food", "", "2024-05-09"),
    ];
    let breakdown = views::category_breakdown(&txs, today);
    assert!(breakdown.iter().all(|e| e.category != "Travel"));
    assert_eq!(breakdown.len(), 1);
}

#[test]
fn breakdown_cutoff_is_inclusive_across_year_rollover() {
    let today = day("2024-01-15");
    let txs = vec![
        tx("edge", TransactionKind::Expense, 5, "Gifts", "", "2023-12-16"),
        tx("out", TransactionKind::Expense, 7, "Gifts", "", "2023-12-15"),
        tx("inc", TransactionKind::Income, 50, "Gifts", "", "2024-01-10"),
        tx("new", TransactionKind::Expense, 3, "Gifts", "", "2024-01-15"),
    ];
    let breakdown = views::category_breakdown(&txs, today);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].total, MoneyCents::from_units(8));
}

#[test]
fn breakdown_sums_repeated_categories() {
    let today = day("2024-05-10");
    let txs = vec![
        tx("1", TransactionKind::Expense, 4, "Coffee", "", "2024-05-10"),
        tx("2", TransactionKind::Expense, 6, "Lunch", "", "2024-05-09"),
        tx("3", TransactionKind::Expense, 5, "Coffee", "", "2024-05-08"),
    ];
    let breakdown = views::category_breakdown(&txs, today);
    let entries: Vec<(&str, i64)> = breakdown
        .iter()
        .map(|e| (e.category.as_str(), e.total.cents() / 100))
        .collect();
    assert_eq!(entries, vec![("Coffee", 9), ("Lunch", 6)]);
}

#[test]
fn dashboard_is_deterministic() {
    let txs = sample();
    let filter = ViewFilter::new(TypeFilter::Expense, "");
    let today = day("2024-05-10");

    let first = Dashboard::compute(&txs, &filter, today);
    let second = Dashboard::compute(&txs, &filter, today);
    assert_eq!(first, second);

    assert_eq!(ids(first.transactions.iter().copied()), vec!["t6", "t4", "t3", "t2"]);
    // Totals ignore the filter.
    assert_eq!(first.totals, views::totals(&txs));
    assert_eq!(first.balance_series.len(), txs.len());
}
