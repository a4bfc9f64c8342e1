use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::record::DrawRecord;
use crate::trends::types::MonthlySummary;
use crate::trends::utility::mean;

#[derive(Default)]
struct MonthAccumulator {
    invitations: u64,
    pool_totals: Vec<f64>,
}

/// Sums invitations and averages the reported pool size per calendar month.
///
/// Rounds without a usable draw size contribute to neither figure. Months
/// with no positive average pool size are dropped.
pub fn build_monthly_draw_summary(records: &[DrawRecord]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<NaiveDate, MonthAccumulator> = BTreeMap::new();

    for r in records {
        let Some(size) = r.draw_size else {
            continue;
        };
        let Some(month) = r.draw_date.with_day(1) else {
            continue;
        };
        let acc = months.entry(month).or_default();
        acc.invitations += u64::from(size);
        if let Some(total) = r.pool_total {
            acc.pool_totals.push(f64::from(total));
        }
    }

    months
        .into_iter()
        .filter_map(|(month, acc)| {
            let mean_candidates = mean(&acc.pool_totals);
            (mean_candidates > 0.0).then_some(MonthlySummary {
                month,
                invitations: acc.invitations,
                mean_candidates,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::test_support::{date, record};

    #[test]
    fn test_sums_and_means_per_month() {
        let mut a = record(1, "2023-01-04");
        a.draw_size = Some(3_500);
        a.pool_total = Some(200_000);
        let mut b = record(2, "2023-01-18");
        b.draw_size = Some(1_000);
        b.pool_total = Some(210_000);
        let mut c = record(3, "2023-02-01");
        c.draw_size = Some(5_500);
        c.pool_total = Some(190_000);

        let summary = build_monthly_draw_summary(&[c, a, b]);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].month, date("2023-01-01"));
        assert_eq!(summary[0].label(), "2023-01");
        assert_eq!(summary[0].invitations, 4_500);
        assert_eq!(summary[0].mean_candidates, 205_000.0);
        assert_eq!(summary[1].invitations, 5_500);
    }

    #[test]
    fn test_months_without_pool_totals_are_dropped() {
        let mut a = record(1, "2023-03-04");
        a.pool_total = None;
        let mut b = record(2, "2023-04-04");
        b.pool_total = Some(0);

        assert!(build_monthly_draw_summary(&[a, b]).is_empty());
    }

    #[test]
    fn test_round_without_size_is_left_out_of_mean() {
        let mut sized = record(1, "2023-01-04");
        sized.draw_size = Some(1_000);
        sized.pool_total = Some(200_000);
        let mut unsized_round = record(2, "2023-01-18");
        unsized_round.draw_size = None;
        unsized_round.pool_total = Some(100_000);

        let summary = build_monthly_draw_summary(&[sized, unsized_round]);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].invitations, 1_000);
        assert_eq!(summary[0].mean_candidates, 200_000.0);
    }
}
