//! Reporting domain logic for the shop books tracker.
//!
//! This module contains all business logic for deriving dashboard view
//! models from the transaction collection: month windows, summaries, daily
//! and category breakdowns, the 6-month trend, month-over-month comparison,
//! top transactions, interesting dates, and list filtering. The UI should
//! only handle presentation concerns; every computation here is a pure,
//! synchronous function over an in-memory snapshot of transactions and is
//! safe to re-run on every store update.

use chrono::{Datelike, NaiveDate};
use log::warn;
use shared::{
    CategoryBreakdown, DailyBreakdown, DayGroup, InterestingDates, MonthComparison, MonthRef,
    MonthlySummary, PeriodFilter, SortBy, Transaction, TransactionFilter, TransactionType,
    TrendPoint, TypeFilter,
};
use std::collections::BTreeMap;

use crate::domain::categories;

/// Number of months in the trend series, the current month included
pub const TREND_MONTHS: usize = 6;

/// Default size of the top-transactions ranking
pub const TOP_TRANSACTIONS: usize = 5;

/// Reporting service that computes all dashboard view models
#[derive(Clone, Default)]
pub struct ReportingService;

impl ReportingService {
    pub fn new() -> Self {
        Self
    }

    /// Parse the calendar-day part of a transaction date.
    ///
    /// Accepts RFC 3339 timestamps and plain YYYY-MM-DD strings; only the
    /// date part participates in aggregation.
    pub fn parse_transaction_date(&self, date_str: &str) -> Option<NaiveDate> {
        let date_part = date_str.split('T').next()?;
        let parts: Vec<&str> = date_part.split('-').collect();
        if parts.len() != 3 {
            return None;
        }
        let (year, month, day) = (
            parts[0].parse::<i32>().ok()?,
            parts[1].parse::<u32>().ok()?,
            parts[2].parse::<u32>().ok()?,
        );
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn date_of(&self, transaction: &Transaction) -> Option<NaiveDate> {
        match self.parse_transaction_date(&transaction.date) {
            Some(date) => Some(date),
            None => {
                warn!(
                    "Skipping transaction {} with unparseable date '{}'",
                    transaction.id, transaction.date
                );
                None
            }
        }
    }

    /// Transactions whose date falls inside the selected calendar month,
    /// first and last day inclusive. Records with unparseable dates are
    /// skipped with a warning.
    pub fn month_data(&self, transactions: &[Transaction], month: MonthRef) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| {
                self.date_of(t)
                    .map(|d| d.year() == month.year && d.month() == month.month)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Sum amounts by type; zero transactions yield an all-zero summary
    pub fn month_summary(&self, month_data: &[Transaction]) -> MonthlySummary {
        let income: f64 = month_data
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Income)
            .map(|t| t.amount)
            .sum();
        let expense: f64 = month_data
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
            .map(|t| t.amount)
            .sum();

        MonthlySummary { income, expense, balance: income - expense }
    }

    /// Per-day income/expense totals, one entry per distinct calendar date,
    /// sorted descending by date
    pub fn daily_breakdown(&self, month_data: &[Transaction]) -> Vec<DailyBreakdown> {
        let mut daily: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

        for transaction in month_data {
            let Some(date) = self.date_of(transaction) else { continue };
            let entry = daily.entry(date).or_insert((0.0, 0.0));
            match transaction.transaction_type {
                TransactionType::Income => entry.0 += transaction.amount,
                TransactionType::Expense => entry.1 += transaction.amount,
            }
        }

        daily
            .into_iter()
            .rev()
            .map(|(date, (income, expense))| DailyBreakdown {
                date: date.format("%Y-%m-%d").to_string(),
                income,
                expense,
            })
            .collect()
    }

    /// Expense totals per category, in first-encounter order. Categories
    /// outside the fixed table get the fallback color rather than failing.
    pub fn category_breakdown(&self, month_data: &[Transaction]) -> Vec<CategoryBreakdown> {
        let mut slices: Vec<CategoryBreakdown> = Vec::new();

        for transaction in month_data
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
        {
            match slices.iter_mut().find(|s| s.name == transaction.category) {
                Some(slice) => slice.value += transaction.amount,
                None => slices.push(CategoryBreakdown {
                    name: transaction.category.clone(),
                    value: transaction.amount,
                    color: categories::expense_category_color(&transaction.category).to_string(),
                }),
            }
        }

        slices
    }

    /// Summaries for the 6 calendar months ending at `reference`, oldest to
    /// newest. Always exactly 6 entries; months without data are zeros.
    pub fn monthly_trend(&self, transactions: &[Transaction], reference: MonthRef) -> Vec<TrendPoint> {
        let mut months = Vec::with_capacity(TREND_MONTHS);
        let mut cursor = reference;
        for _ in 0..TREND_MONTHS {
            months.push(cursor);
            cursor = cursor.previous();
        }
        months.reverse();

        months
            .into_iter()
            .map(|month| {
                let summary = self.month_summary(&self.month_data(transactions, month));
                TrendPoint {
                    month: self.month_label(month),
                    income: summary.income,
                    expense: summary.expense,
                    profit: summary.balance,
                }
            })
            .collect()
    }

    /// Short display label for a month, e.g. "Mar 24"
    fn month_label(&self, month: MonthRef) -> String {
        match NaiveDate::from_ymd_opt(month.year, month.month, 1) {
            Some(date) => date.format("%b %y").to_string(),
            None => format!("{}/{}", month.month, month.year),
        }
    }

    /// Compare the selected month's summary to the prior calendar month's.
    ///
    /// Percentage denominators are the prior month's values; when a prior
    /// value is zero (or non-positive, for balance) the percentage change is
    /// 0 by policy while the absolute diff is still computed.
    pub fn last_month_comparison(
        &self,
        transactions: &[Transaction],
        month: MonthRef,
    ) -> MonthComparison {
        let current = self.month_summary(&self.month_data(transactions, month));
        let prior = self.month_summary(&self.month_data(transactions, month.previous()));

        let pct = |current: f64, prior: f64| {
            if prior > 0.0 {
                (current - prior) / prior * 100.0
            } else {
                0.0
            }
        };

        MonthComparison {
            income_change_pct: pct(current.income, prior.income),
            expense_change_pct: pct(current.expense, prior.expense),
            balance_change_pct: pct(current.balance, prior.balance),
            income_diff: current.income - prior.income,
            expense_diff: current.expense - prior.expense,
            balance_diff: current.balance - prior.balance,
        }
    }

    /// The `n` largest transactions by amount, descending. The sort is
    /// stable: equal amounts keep their original relative order.
    pub fn top_transactions(&self, month_data: &[Transaction], n: usize) -> Vec<Transaction> {
        let mut ranked = month_data.to_vec();
        ranked.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// Stand-out days of the month: highest income sum, highest expense sum,
    /// and highest profit. `None` when the month has no transactions. Each
    /// selected day keeps its constituent transactions for drill-down.
    pub fn interesting_dates(&self, month_data: &[Transaction]) -> Option<InterestingDates> {
        let mut groups: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();

        for transaction in month_data {
            let Some(date) = self.date_of(transaction) else { continue };
            let group = groups.entry(date).or_insert_with(|| DayGroup {
                date: date.format("%Y-%m-%d").to_string(),
                income: 0.0,
                expense: 0.0,
                transactions: Vec::new(),
            });
            group.transactions.push(transaction.clone());
            match transaction.transaction_type {
                TransactionType::Income => group.income += transaction.amount,
                TransactionType::Expense => group.expense += transaction.amount,
            }
        }

        if groups.is_empty() {
            return None;
        }

        // Strict greater-than, so ties go to the earliest date
        fn best_day<'a>(days: &[&'a DayGroup], key: impl Fn(&DayGroup) -> f64) -> &'a DayGroup {
            let mut best = days[0];
            for &day in &days[1..] {
                if key(day) > key(best) {
                    best = day;
                }
            }
            best
        }

        let days: Vec<&DayGroup> = groups.values().collect();
        Some(InterestingDates {
            best_sales_day: best_day(&days, |d| d.income).clone(),
            highest_expense_day: best_day(&days, |d| d.expense).clone(),
            best_profit_day: best_day(&days, |d| d.income - d.expense).clone(),
        })
    }

    /// Apply search, type and period filters, then sort. Each filter is a
    /// strict subset operation; the period window is anchored to `today`,
    /// not to the selected month. Records with unparseable dates are only
    /// dropped when a period filter needs to place them in time.
    pub fn filter_transactions(
        &self,
        transactions: &[Transaction],
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> Vec<Transaction> {
        let mut filtered: Vec<Transaction> = transactions.to_vec();

        if !filter.search_term.is_empty() {
            let needle = filter.search_term.to_lowercase();
            filtered.retain(|t| {
                t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            });
        }

        match filter.type_filter {
            TypeFilter::All => {}
            TypeFilter::Income => {
                filtered.retain(|t| t.transaction_type == TransactionType::Income)
            }
            TypeFilter::Expense => {
                filtered.retain(|t| t.transaction_type == TransactionType::Expense)
            }
        }

        if filter.period_filter != PeriodFilter::All {
            let cutoff = match filter.period_filter {
                PeriodFilter::Today => today,
                PeriodFilter::Week => today - chrono::Duration::days(7),
                PeriodFilter::Month => today - chrono::Duration::days(30),
                PeriodFilter::All => unreachable!(),
            };
            filtered.retain(|t| match self.date_of(t) {
                Some(date) if filter.period_filter == PeriodFilter::Today => date == today,
                Some(date) => date >= cutoff,
                None => false,
            });
        }

        match filter.sort_by {
            SortBy::Newest => filtered.sort_by(|a, b| {
                self.sort_date(b).cmp(&self.sort_date(a))
            }),
            SortBy::Oldest => filtered.sort_by(|a, b| {
                self.sort_date(a).cmp(&self.sort_date(b))
            }),
            SortBy::Highest => filtered.sort_by(|a, b| {
                b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortBy::Lowest => filtered.sort_by(|a, b| {
                a.amount.partial_cmp(&b.amount).unwrap_or(std::cmp::Ordering::Equal)
            }),
        }

        filtered
    }

    fn sort_date(&self, transaction: &Transaction) -> NaiveDate {
        self.parse_transaction_date(&transaction.date)
            .unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(
        transaction_type: TransactionType,
        amount: f64,
        category: &str,
        date: &str,
    ) -> Transaction {
        Transaction {
            id: format!("test_{}_{}", date, amount),
            date: date.to_string(),
            description: format!("{} on {}", category, date),
            amount,
            category: category.to_string(),
            transaction_type,
            created_at: "2024-01-01T00:00:00+07:00".to_string(),
        }
    }

    fn march_2024_fixture() -> Vec<Transaction> {
        vec![
            tx(TransactionType::Income, 1000.0, "ขายสินค้า", "2024-03-05"),
            tx(TransactionType::Expense, 300.0, "ต้นทุนสินค้า", "2024-03-05"),
            tx(TransactionType::Expense, 200.0, "ค่าขนส่ง", "2024-03-10"),
        ]
    }

    #[test]
    fn test_month_data_window_is_inclusive() {
        let service = ReportingService::new();
        let transactions = vec![
            tx(TransactionType::Income, 10.0, "ขายสินค้า", "2024-02-29"),
            tx(TransactionType::Income, 20.0, "ขายสินค้า", "2024-03-01"),
            tx(TransactionType::Income, 30.0, "ขายสินค้า", "2024-03-31"),
            tx(TransactionType::Income, 40.0, "ขายสินค้า", "2024-04-01"),
        ];

        let march = service.month_data(&transactions, MonthRef::new(2024, 3));
        let amounts: Vec<f64> = march.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![20.0, 30.0]);
    }

    #[test]
    fn test_month_data_skips_unparseable_dates() {
        let service = ReportingService::new();
        let mut transactions = march_2024_fixture();
        transactions.push(tx(TransactionType::Income, 99.0, "ขายสินค้า", "not-a-date"));

        let march = service.month_data(&transactions, MonthRef::new(2024, 3));
        assert_eq!(march.len(), 3);
    }

    #[test]
    fn test_month_summary_scenario() {
        let service = ReportingService::new();
        let month_data = service.month_data(&march_2024_fixture(), MonthRef::new(2024, 3));
        let summary = service.month_summary(&month_data);

        assert_eq!(summary.income, 1000.0);
        assert_eq!(summary.expense, 500.0);
        assert_eq!(summary.balance, 500.0);
    }

    #[test]
    fn test_month_summary_balance_identity() {
        let service = ReportingService::new();
        let month_data = service.month_data(&march_2024_fixture(), MonthRef::new(2024, 3));
        let summary = service.month_summary(&month_data);
        assert_eq!(summary.balance, summary.income - summary.expense);

        let empty = service.month_summary(&[]);
        assert_eq!(empty, MonthlySummary::default());
    }

    #[test]
    fn test_daily_breakdown_sorted_descending() {
        let service = ReportingService::new();
        let month_data = service.month_data(&march_2024_fixture(), MonthRef::new(2024, 3));
        let daily = service.daily_breakdown(&month_data);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, "2024-03-10");
        assert_eq!(daily[0].expense, 200.0);
        assert_eq!(daily[1].date, "2024-03-05");
        assert_eq!(daily[1].income, 1000.0);
        assert_eq!(daily[1].expense, 300.0);
    }

    #[test]
    fn test_category_breakdown_scenario() {
        let service = ReportingService::new();
        let month_data = service.month_data(&march_2024_fixture(), MonthRef::new(2024, 3));
        let breakdown = service.category_breakdown(&month_data);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "ต้นทุนสินค้า");
        assert_eq!(breakdown[0].value, 300.0);
        assert_eq!(breakdown[0].color, "#FF6B6B");
        assert_eq!(breakdown[1].name, "ค่าขนส่ง");
        assert_eq!(breakdown[1].value, 200.0);
    }

    #[test]
    fn test_category_breakdown_sums_to_expense_total() {
        let service = ReportingService::new();
        let month_data = service.month_data(&march_2024_fixture(), MonthRef::new(2024, 3));

        let category_total: f64 = service
            .category_breakdown(&month_data)
            .iter()
            .map(|c| c.value)
            .sum();
        assert_eq!(category_total, service.month_summary(&month_data).expense);
    }

    #[test]
    fn test_category_breakdown_unknown_category_fallback() {
        let service = ReportingService::new();
        let month_data = vec![tx(TransactionType::Expense, 50.0, "ค่ากาแฟ", "2024-03-02")];
        let breakdown = service.category_breakdown(&month_data);

        assert_eq!(breakdown[0].color, categories::FALLBACK_COLOR);
    }

    #[test]
    fn test_monthly_trend_always_six_entries() {
        let service = ReportingService::new();
        let reference = MonthRef::new(2024, 3);

        // No data at all
        assert_eq!(service.monthly_trend(&[], reference).len(), 6);

        // Sparse data
        let trend = service.monthly_trend(&march_2024_fixture(), reference);
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].month, "Oct 23");
        assert_eq!(trend[5].month, "Mar 24");
        assert_eq!(trend[5].income, 1000.0);
        assert_eq!(trend[5].profit, 500.0);
        for point in &trend[..5] {
            assert_eq!(point.income, 0.0);
            assert_eq!(point.expense, 0.0);
        }
    }

    #[test]
    fn test_last_month_comparison_zero_denominator_policy() {
        let service = ReportingService::new();
        // Prior month (Feb) has no expenses; current (Mar) has 100
        let transactions = vec![
            tx(TransactionType::Income, 400.0, "ขายสินค้า", "2024-02-10"),
            tx(TransactionType::Expense, 100.0, "ภาษี", "2024-03-15"),
        ];

        let comparison = service.last_month_comparison(&transactions, MonthRef::new(2024, 3));
        assert_eq!(comparison.expense_change_pct, 0.0);
        assert_eq!(comparison.expense_diff, 100.0);
        // Prior balance was positive 400, current is -100
        assert_eq!(comparison.balance_diff, -500.0);
        assert_eq!(comparison.balance_change_pct, (-100.0 - 400.0) / 400.0 * 100.0);
    }

    #[test]
    fn test_last_month_comparison_non_positive_balance_denominator() {
        let service = ReportingService::new();
        // Prior month balance is negative; balance percentage must be 0
        let transactions = vec![
            tx(TransactionType::Expense, 200.0, "ภาษี", "2024-02-10"),
            tx(TransactionType::Income, 300.0, "ขายสินค้า", "2024-03-15"),
        ];

        let comparison = service.last_month_comparison(&transactions, MonthRef::new(2024, 3));
        assert_eq!(comparison.balance_change_pct, 0.0);
        assert_eq!(comparison.balance_diff, 500.0);
    }

    #[test]
    fn test_top_transactions_ranking_and_stability() {
        let service = ReportingService::new();
        let mut month_data = vec![
            tx(TransactionType::Income, 100.0, "ขายสินค้า", "2024-03-01"),
            tx(TransactionType::Expense, 500.0, "ต้นทุนสินค้า", "2024-03-02"),
            tx(TransactionType::Income, 300.0, "ขายสินค้า", "2024-03-03"),
            tx(TransactionType::Expense, 300.0, "ค่าขนส่ง", "2024-03-04"),
            tx(TransactionType::Income, 50.0, "ขายสินค้า", "2024-03-05"),
            tx(TransactionType::Income, 700.0, "ขายสินค้า", "2024-03-06"),
        ];
        month_data[0].id = "a".into();

        let top = service.top_transactions(&month_data, 5);
        assert_eq!(top.len(), 5);
        let amounts: Vec<f64> = top.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![700.0, 500.0, 300.0, 300.0, 100.0]);
        // Equal amounts preserve original relative order
        assert_eq!(top[2].category, "ขายสินค้า");
        assert_eq!(top[3].category, "ค่าขนส่ง");
        // The smallest amount is the one left out
        assert!(top.iter().all(|t| t.amount >= 50.0));
    }

    #[test]
    fn test_interesting_dates_scenario() {
        let service = ReportingService::new();
        let month_data = service.month_data(&march_2024_fixture(), MonthRef::new(2024, 3));
        let dates = service.interesting_dates(&month_data).unwrap();

        // Day 5: income 1000, expense 300, profit 700. Day 10: profit -200.
        assert_eq!(dates.best_sales_day.date, "2024-03-05");
        assert_eq!(dates.highest_expense_day.date, "2024-03-05");
        assert_eq!(dates.best_profit_day.date, "2024-03-05");
        assert_eq!(dates.best_profit_day.income - dates.best_profit_day.expense, 700.0);
        // Drill-down transactions are retained
        assert_eq!(dates.best_profit_day.transactions.len(), 2);
    }

    #[test]
    fn test_interesting_dates_empty_input() {
        let service = ReportingService::new();
        assert!(service.interesting_dates(&[]).is_none());
    }

    fn filter_fixture(today: NaiveDate) -> Vec<Transaction> {
        let days_ago = |n: i64| (today - chrono::Duration::days(n)).format("%Y-%m-%d").to_string();
        vec![
            tx(TransactionType::Income, 100.0, "ขายสินค้า", &days_ago(0)),
            tx(TransactionType::Expense, 200.0, "ค่าขนส่ง", &days_ago(3)),
            tx(TransactionType::Income, 300.0, "ขายบริการ", &days_ago(10)),
            tx(TransactionType::Expense, 400.0, "ภาษี", &days_ago(40)),
        ]
    }

    #[test]
    fn test_filter_transactions_search_is_case_insensitive() {
        let service = ReportingService::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut transactions = filter_fixture(today);
        transactions[0].description = "Coffee Beans".to_string();

        let filter = TransactionFilter {
            search_term: "coffee".to_string(),
            ..Default::default()
        };
        let result = service.filter_transactions(&transactions, &filter, today);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "Coffee Beans");
    }

    #[test]
    fn test_filter_transactions_period_windows() {
        let service = ReportingService::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = filter_fixture(today);

        let with_period = |period| TransactionFilter {
            period_filter: period,
            ..Default::default()
        };

        assert_eq!(
            service.filter_transactions(&transactions, &with_period(PeriodFilter::Today), today).len(),
            1
        );
        assert_eq!(
            service.filter_transactions(&transactions, &with_period(PeriodFilter::Week), today).len(),
            2
        );
        assert_eq!(
            service.filter_transactions(&transactions, &with_period(PeriodFilter::Month), today).len(),
            3
        );
        assert_eq!(
            service.filter_transactions(&transactions, &with_period(PeriodFilter::All), today).len(),
            4
        );
    }

    #[test]
    fn test_filter_transactions_combined_is_intersection() {
        let service = ReportingService::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = filter_fixture(today);

        let combined = TransactionFilter {
            search_term: "ค่า".to_string(),
            type_filter: TypeFilter::Expense,
            period_filter: PeriodFilter::Week,
            sort_by: SortBy::Newest,
        };
        let combined_ids: Vec<String> = service
            .filter_transactions(&transactions, &combined, today)
            .into_iter()
            .map(|t| t.id)
            .collect();

        let single = |f: TransactionFilter| -> Vec<String> {
            service
                .filter_transactions(&transactions, &f, today)
                .into_iter()
                .map(|t| t.id)
                .collect()
        };
        let by_search = single(TransactionFilter {
            search_term: "ค่า".to_string(),
            ..Default::default()
        });
        let by_type = single(TransactionFilter {
            type_filter: TypeFilter::Expense,
            ..Default::default()
        });
        let by_period = single(TransactionFilter {
            period_filter: PeriodFilter::Week,
            ..Default::default()
        });

        for id in &combined_ids {
            assert!(by_search.contains(id) && by_type.contains(id) && by_period.contains(id));
        }
        // And nothing in all three is missing from the combined result
        for id in by_search {
            if by_type.contains(&id) && by_period.contains(&id) {
                assert!(combined_ids.contains(&id));
            }
        }
    }

    #[test]
    fn test_filter_transactions_idempotent() {
        let service = ReportingService::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = filter_fixture(today);

        let filter = TransactionFilter {
            type_filter: TypeFilter::Expense,
            sort_by: SortBy::Highest,
            ..Default::default()
        };
        let once = service.filter_transactions(&transactions, &filter, today);
        let twice = service.filter_transactions(&once, &filter, today);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_transactions_sort_orders() {
        let service = ReportingService::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = filter_fixture(today);

        let sorted = |sort_by| {
            service.filter_transactions(
                &transactions,
                &TransactionFilter { sort_by, ..Default::default() },
                today,
            )
        };

        let newest = sorted(SortBy::Newest);
        assert_eq!(newest[0].amount, 100.0);
        assert_eq!(newest[3].amount, 400.0);

        let oldest = sorted(SortBy::Oldest);
        assert_eq!(oldest[0].amount, 400.0);

        let highest = sorted(SortBy::Highest);
        assert_eq!(highest[0].amount, 400.0);

        let lowest = sorted(SortBy::Lowest);
        assert_eq!(lowest[0].amount, 100.0);
    }
}
