//! Consecutive-day goal adherence.

use chrono::NaiveDate;

use crate::record::HydrationRecord;

/// Counts consecutive days ending at `today` on which the goal was met.
///
/// Records are walked newest first. The walk stops at the first date gap
/// (including a missing record for `today`) or the first day under the 90%
/// threshold. Records dated after `today` break the streak immediately.
pub fn calculate_streak(records: &[HydrationRecord], today: NaiveDate) -> u32 {
    let mut sorted: Vec<&HydrationRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    for (expected_offset, record) in (0_i64..).zip(sorted) {
        let days_diff = (today - record.date).num_days();
        if days_diff != expected_offset || !record.goal_met() {
            break;
        }
        streak += 1;
    }

    tracing::debug!(streak, %today, "calculated streak");
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn days_ago(n: i64, target_ml: u32, consumed_ml: u32) -> HydrationRecord {
        HydrationRecord {
            date: today() - chrono::Duration::days(n),
            target_ml,
            consumed_ml,
        }
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(calculate_streak(&[], today()), 0);
    }

    #[test]
    fn three_met_days_ending_today() {
        let records = [
            days_ago(2, 2000, 1800),
            days_ago(1, 2000, 2000),
            days_ago(0, 2000, 2500),
        ];
        assert_eq!(calculate_streak(&records, today()), 3);
    }

    #[test]
    fn under_threshold_day_breaks_streak() {
        let records = [
            days_ago(2, 2000, 2000),
            days_ago(1, 2000, 1600),
            days_ago(0, 2000, 2000),
        ];
        assert_eq!(calculate_streak(&records, today()), 1);
    }

    #[test]
    fn gap_stops_the_walk() {
        let records = [
            days_ago(3, 2000, 2000),
            days_ago(1, 2000, 2000),
            days_ago(0, 2000, 2000),
        ];
        assert_eq!(calculate_streak(&records, today()), 2);
    }

    #[test]
    fn missing_today_breaks_streak() {
        let records = [days_ago(2, 2000, 2000), days_ago(1, 2000, 2000)];
        assert_eq!(calculate_streak(&records, today()), 0);
    }

    #[test]
    fn unmet_today_breaks_streak() {
        let records = [days_ago(1, 2000, 2000), days_ago(0, 2000, 500)];
        assert_eq!(calculate_streak(&records, today()), 0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let records = [
            days_ago(0, 2000, 2000),
            days_ago(2, 2000, 2000),
            days_ago(1, 2000, 2000),
        ];
        assert_eq!(calculate_streak(&records, today()), 3);
    }

    #[test]
    fn future_record_breaks_streak() {
        let records = [days_ago(-1, 2000, 2000), days_ago(0, 2000, 2000)];
        assert_eq!(calculate_streak(&records, today()), 0);
    }
}
