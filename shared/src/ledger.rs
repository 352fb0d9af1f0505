//! Net profit aggregation over the finance ledger
//!
//! Purchase entries count as income and supply entries as expense. Both are
//! stored positive, so the sign is applied here.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{FinanceEntry, NetProfitReport, TransactionKind};
use crate::types::DateRange;

/// Net profit over `[start_date, end_date]` and the entries inside it.
///
/// The end date is included in full: everything before midnight at the start
/// of the following day is counted.
pub fn compute_net_profit(
    entries: &[FinanceEntry],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> (Decimal, Vec<FinanceEntry>) {
    let (from, until) = range_bounds(start_date, end_date);

    let filtered: Vec<FinanceEntry> = entries
        .iter()
        .filter(|entry| entry.created_at >= from && until.map_or(true, |u| entry.created_at < u))
        .cloned()
        .collect();

    let net_profit = filtered.iter().map(FinanceEntry::signed_amount).sum();

    (net_profit, filtered)
}

/// Full report for a date range, with income and expense broken out
pub fn net_profit_report(entries: &[FinanceEntry], range: DateRange) -> NetProfitReport {
    let (net_profit, entries) = compute_net_profit(entries, range.start, range.end);
    let total_income = total_for(&entries, TransactionKind::Purchase);
    let total_expense = total_for(&entries, TransactionKind::Supply);

    NetProfitReport {
        start_date: range.start,
        end_date: range.end,
        total_income,
        total_expense,
        net_profit,
        entries,
    }
}

/// Range spanning the first through the last entry date, or just `today`
/// for an empty ledger
pub fn ledger_date_span(entries: &[FinanceEntry], today: NaiveDate) -> DateRange {
    let dates = entries.iter().map(|e| e.created_at.date_naive());
    let start = dates.clone().min().unwrap_or(today);
    let end = dates.max().unwrap_or(today);
    DateRange::new(start, end)
}

fn total_for(entries: &[FinanceEntry], kind: TransactionKind) -> Decimal {
    entries
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.amount)
        .sum()
}

/// Lower bound inclusive, upper bound exclusive. `None` means the end date is
/// the last representable day and nothing lies beyond it.
fn range_bounds(start_date: NaiveDate, end_date: NaiveDate) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
    let from = Utc.from_utc_datetime(&start_date.and_time(NaiveTime::MIN));
    let until = end_date
        .succ_opt()
        .map(|next| Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)));
    (from, until)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;

    fn entry(id: i64, kind: TransactionKind, amount: i64, at: &str) -> FinanceEntry {
        FinanceEntry {
            id,
            kind,
            payment_method: PaymentMethod::Cash,
            amount: Decimal::from(amount),
            supplier_id: 1,
            customer_id: None,
            created_at: DateTime::parse_from_rfc3339(at).unwrap().with_timezone(&Utc),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_purchase_is_the_profit() {
        let entries = vec![entry(1, TransactionKind::Purchase, 500, "2024-03-10T12:00:00Z")];
        let (profit, filtered) = compute_net_profit(&entries, day("2024-03-10"), day("2024-03-10"));
        assert_eq!(profit, Decimal::from(500));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn supply_is_subtracted() {
        let entries = vec![
            entry(1, TransactionKind::Purchase, 500, "2024-03-10T09:00:00Z"),
            entry(2, TransactionKind::Supply, 200, "2024-03-10T10:00:00Z"),
        ];
        let (profit, _) = compute_net_profit(&entries, day("2024-03-10"), day("2024-03-10"));
        assert_eq!(profit, Decimal::from(300));
    }

    #[test]
    fn end_of_day_is_included_and_next_midnight_is_not() {
        let entries = vec![
            entry(1, TransactionKind::Purchase, 100, "2024-03-10T23:59:59Z"),
            entry(2, TransactionKind::Purchase, 999, "2024-03-11T00:00:00Z"),
        ];
        let (profit, filtered) = compute_net_profit(&entries, day("2024-03-01"), day("2024-03-10"));
        assert_eq!(profit, Decimal::from(100));
        assert_eq!(filtered.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn start_of_day_is_included() {
        let entries = vec![
            entry(1, TransactionKind::Purchase, 40, "2024-03-09T23:59:59Z"),
            entry(2, TransactionKind::Purchase, 60, "2024-03-10T00:00:00Z"),
        ];
        let (profit, _) = compute_net_profit(&entries, day("2024-03-10"), day("2024-03-12"));
        assert_eq!(profit, Decimal::from(60));
    }

    #[test]
    fn report_breaks_out_income_and_expense() {
        let entries = vec![
            entry(1, TransactionKind::Purchase, 500, "2024-03-10T09:00:00Z"),
            entry(2, TransactionKind::Supply, 200, "2024-03-10T10:00:00Z"),
            entry(3, TransactionKind::Supply, 50, "2024-03-11T10:00:00Z"),
        ];
        let report = net_profit_report(&entries, DateRange::new(day("2024-03-10"), day("2024-03-11")));
        assert_eq!(report.total_income, Decimal::from(500));
        assert_eq!(report.total_expense, Decimal::from(250));
        assert_eq!(report.net_profit, Decimal::from(250));
        assert_eq!(report.entries.len(), 3);
    }

    #[test]
    fn date_span_covers_first_and_last_entry() {
        let entries = vec![
            entry(1, TransactionKind::Purchase, 1, "2024-03-12T09:00:00Z"),
            entry(2, TransactionKind::Supply, 1, "2024-02-01T10:00:00Z"),
        ];
        let span = ledger_date_span(&entries, day("2030-01-01"));
        assert_eq!(span, DateRange::new(day("2024-02-01"), day("2024-03-12")));

        let empty = ledger_date_span(&[], day("2030-01-01"));
        assert_eq!(empty, DateRange::new(day("2030-01-01"), day("2030-01-01")));
    }
}
