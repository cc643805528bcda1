//! Day judging and run finding
//!
//! Pure functions over ordered sample sequences. `judge_days` partitions
//! hourly samples into calendar days in the configured timezone and judges
//! each day; `find_runs` scans the verdicts for maximal runs of
//! consecutive good days.

use chrono::{DateTime, NaiveDate, Utc};

use super::{AlertCriteria, ConsecutiveRun, DayVerdict, HourlySample};
use crate::value_objects::Timezone;

/// Map a UTC instant to its calendar date in the given timezone
///
/// Deterministic and independent of the process locale; this is the only
/// place where an hour is assigned to a day.
#[must_use]
pub fn local_date(time: DateTime<Utc>, timezone: &Timezone) -> NaiveDate {
    time.with_timezone(&timezone.tz()).date_naive()
}

/// Judge every calendar day present in `samples`
///
/// Samples must be ordered by time ascending (the fetcher guarantees
/// this). Produces one verdict per distinct day, date-ascending. Days with
/// no samples are not emitted; days with partial coverage are judged on
/// the hours available. The wind range is inclusive on both bounds.
#[must_use]
pub fn judge_days(samples: &[HourlySample], criteria: &AlertCriteria) -> Vec<DayVerdict> {
    let mut verdicts = Vec::new();
    let mut current: Option<(NaiveDate, u32)> = None;

    for sample in samples {
        let date = local_date(sample.time, &criteria.timezone);
        let in_range = u32::from(sample.wind.is_within(criteria.min_wind, criteria.max_wind));

        match current {
            Some((day, count)) if day == date => {
                current = Some((day, count + in_range));
            },
            Some((day, count)) => {
                verdicts.push(close_day(day, count, criteria));
                current = Some((date, in_range));
            },
            None => {
                current = Some((date, in_range));
            },
        }
    }

    if let Some((day, count)) = current {
        verdicts.push(close_day(day, count, criteria));
    }

    verdicts
}

fn close_day(date: NaiveDate, hours_in_range: u32, criteria: &AlertCriteria) -> DayVerdict {
    DayVerdict::new(
        date,
        hours_in_range,
        hours_in_range >= criteria.min_hours_per_day,
    )
}

/// Find maximal runs of consecutive good days with length >= `required`
///
/// Scans left to right accumulating a streak of good days. A bad day ends
/// the streak, and so does a gap in calendar dates: a missing day inside
/// the window is treated as a break, not skipped. Each maximal run is
/// reported exactly once, spanning its full length; overlapping sub-runs
/// are never emitted. Returned runs are ordered by start date.
#[must_use]
pub fn find_runs(verdicts: &[DayVerdict], required: u32) -> Vec<ConsecutiveRun> {
    let mut runs = Vec::new();
    let mut streak: Option<(NaiveDate, NaiveDate)> = None;

    for verdict in verdicts {
        if verdict.is_good {
            streak = match streak {
                Some((start, last)) if last.succ_opt() == Some(verdict.date) => {
                    Some((start, verdict.date))
                },
                Some((start, last)) => {
                    runs.push(ConsecutiveRun::new(start, last));
                    Some((verdict.date, verdict.date))
                },
                None => Some((verdict.date, verdict.date)),
            };
        } else if let Some((start, last)) = streak.take() {
            runs.push(ConsecutiveRun::new(start, last));
        }
    }

    if let Some((start, last)) = streak {
        runs.push(ConsecutiveRun::new(start, last));
    }

    runs.retain(|run| run.len() >= required);
    runs
}


#[cfg(test)]
mod proptest_tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::value_objects::{GeoLocation, WindSpeed};

    fn criteria(min_hours: u32) -> AlertCriteria {
        AlertCriteria::new(
            WindSpeed::from_knots(14.0),
            WindSpeed::from_knots(22.0),
            min_hours,
            2,
            7,
            GeoLocation::hel_peninsula(),
            Timezone::utc(),
        )
        .expect("valid criteria")
    }

    /// Up to a week of ordered hourly samples with arbitrary speeds
    fn samples_strategy() -> impl Strategy<Value = Vec<HourlySample>> {
        prop::collection::vec(0.0f64..60.0, 0..168).prop_map(|speeds| {
            speeds
                .into_iter()
                .enumerate()
                .map(|(i, knots)| {
                    let hours = i64::try_from(i).unwrap_or(0);
                    HourlySample::new(
                        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0)
                            .single()
                            .expect("valid time")
                            + chrono::Duration::hours(hours),
                        WindSpeed::from_knots(knots),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn hours_in_range_matches_direct_count(samples in samples_strategy()) {
            let crit = criteria(6);
            let verdicts = judge_days(&samples, &crit);

            for verdict in &verdicts {
                let expected = samples
                    .iter()
                    .filter(|s| local_date(s.time, &crit.timezone) == verdict.date)
                    .filter(|s| s.wind.is_within(crit.min_wind, crit.max_wind))
                    .count();
                prop_assert_eq!(verdict.hours_in_range as usize, expected);
            }
        }

        #[test]
        fn every_verdict_has_a_sample_on_its_day(samples in samples_strategy()) {
            let crit = criteria(6);
            for verdict in judge_days(&samples, &crit) {
                prop_assert!(
                    samples.iter().any(|s| local_date(s.time, &crit.timezone) == verdict.date)
                );
            }
        }

        #[test]
        fn analysis_is_idempotent(samples in samples_strategy()) {
            let crit = criteria(6);
            let first = judge_days(&samples, &crit);
            let second = judge_days(&samples, &crit);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(find_runs(&first, 2), find_runs(&second, 2));
        }

        #[test]
        fn reported_runs_meet_required_length(
            samples in samples_strategy(),
            required in 1u32..5
        ) {
            let crit = criteria(6);
            let verdicts = judge_days(&samples, &crit);
            for run in find_runs(&verdicts, required) {
                prop_assert!(run.len() >= required);
                prop_assert!(run.start_date <= run.end_date);
            }
        }
    }
}
