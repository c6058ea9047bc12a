//! Read-side queries over log entries.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use subtrack_core::Money;

use crate::entry::{InvoiceLogEntry, ListedInvoice, MonthlyTotal};

/// Newest first by `created_at`, at most `limit`, numbered from 1.
///
/// Entries sharing a timestamp list the later-appended one first.
pub fn latest_first(mut entries: Vec<InvoiceLogEntry>, limit: usize) -> Vec<ListedInvoice> {
    entries.reverse();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| ListedInvoice {
            index: i + 1,
            entry,
        })
        .collect()
}

/// Totals grouped by `YYYY-MM`, newest month first.
///
/// Entries without a well-formed `created_at` are skipped.
pub fn monthly_totals(entries: &[InvoiceLogEntry]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<Reverse<&str>, Money> = BTreeMap::new();
    for entry in entries {
        if let Some(month) = entry.year_month() {
            let sum = by_month.entry(Reverse(month)).or_insert(Money::ZERO);
            *sum = *sum + entry.total;
        }
    }

    by_month
        .into_iter()
        .map(|(Reverse(month), total)| MonthlyTotal {
            year_month: month.to_string(),
            total: total.round_cents(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(created_at: &str, number: &str, cents: i64) -> InvoiceLogEntry {
        InvoiceLogEntry {
            created_at: created_at.to_string(),
            store_key: "S01".to_string(),
            store_name: "SubTrack Downtown".to_string(),
            school_name: "Lincoln Elementary".to_string(),
            delivery_date: "01-15-2025".to_string(),
            subtotal: Money::from_cents(cents),
            total: Money::from_cents(cents),
            invoice_number: number.to_string(),
            document_path: None,
        }
    }

    #[test]
    fn lists_newest_first_with_display_index() {
        let listed = latest_first(
            vec![
                entry("2025-01-01T10:00:00", "A", 100),
                entry("2025-03-01T10:00:00", "C", 300),
                entry("2025-02-01T10:00:00", "B", 200),
            ],
            10,
        );

        let numbers: Vec<(usize, &str)> = listed
            .iter()
            .map(|l| (l.index, l.entry.invoice_number.as_str()))
            .collect();
        assert_eq!(numbers, vec![(1, "C"), (2, "B"), (3, "A")]);
    }

    #[test]
    fn limit_truncates_and_zero_limit_is_empty() {
        let entries = vec![
            entry("2025-01-01T10:00:00", "A", 100),
            entry("2025-02-01T10:00:00", "B", 200),
        ];
        let listed = latest_first(entries.clone(), 1);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entry.invoice_number, "B");
        assert!(latest_first(entries, 0).is_empty());
    }

    #[test]
    fn equal_timestamps_list_latest_append_first() {
        let listed = latest_first(
            vec![
                entry("2025-01-01T10:00:00", "first", 100),
                entry("2025-01-01T10:00:00", "second", 100),
            ],
            10,
        );
        assert_eq!(listed[0].entry.invoice_number, "second");
    }

    #[test]
    fn monthly_totals_group_and_sort_descending() {
        let totals = monthly_totals(&[
            entry("2025-01-05T10:00:00", "A", 1000),
            entry("2025-02-01T10:00:00", "B", 250),
            entry("2025-01-20T10:00:00", "C", 780),
            entry("garbage", "D", 9999),
            entry("", "E", 9999),
        ]);

        assert_eq!(
            totals,
            vec![
                MonthlyTotal {
                    year_month: "2025-02".to_string(),
                    total: Money::from_cents(250),
                },
                MonthlyTotal {
                    year_month: "2025-01".to_string(),
                    total: Money::from_cents(1780),
                },
            ]
        );
    }

    #[test]
    fn monthly_totals_of_nothing_is_empty() {
        assert!(monthly_totals(&[]).is_empty());
    }

    proptest! {
        /// Property: monthly totals partition the grand total of dated entries.
        #[test]
        fn monthly_totals_sum_to_grand_total(
            rows in prop::collection::vec((2020u32..2030u32, 1u32..13u32, 0i64..100_000i64), 0..40)
        ) {
            let entries: Vec<InvoiceLogEntry> = rows
                .iter()
                .map(|(y, m, cents)| entry(&format!("{y}-{m:02}-15T12:00:00"), "X", *cents))
                .collect();

            let totals = monthly_totals(&entries);
            let grand: Money = entries.iter().map(|e| e.total).sum();
            let by_month: Money = totals.iter().map(|t| t.total).sum();
            prop_assert_eq!(by_month, grand);

            let months: Vec<&str> = totals.iter().map(|t| t.year_month.as_str()).collect();
            let mut sorted = months.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            prop_assert_eq!(months, sorted);
        }
    }
}
