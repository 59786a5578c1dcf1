//! Daily occupancy statistics over the merged boarding and daycare visits.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::pci::analysis::model::{BoardType, DailyAggregate, VisitDayRecord, VisitType};
use crate::pci::analysis::window::DateWindow;

/// Weight of a departing pet in the headcount.
pub const DEPARTING_WEIGHT: f64 = 0.5;

/// Merges both visit lists into one list ordered by date, then visit type.
///
/// The sort is stable, so visits of the same day and type keep their input
/// order.
pub fn merge_visits(
    boarding: Vec<VisitDayRecord>,
    daycare: Vec<VisitDayRecord>,
) -> Vec<VisitDayRecord> {
    let mut merged = boarding;
    merged.extend(daycare);
    merged.sort_by_key(|record| (record.date, record.visit_type));
    merged
}

/// Counts the merged visits per day.
///
/// Returns one aggregate per distinct date, in date order.
pub fn daily_aggregates(sorted: &[VisitDayRecord]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();

    for record in sorted {
        let day = days
            .entry(record.date)
            .or_insert_with(|| DailyAggregate::empty(record.date));
        match record.visit_type {
            VisitType::Daycare => day.daycare_visits += 1,
            VisitType::Boarding => day.boarding_visits += 1,
        }
        match record.board_type {
            Some(BoardType::Arriving) => day.arriving_count += 1,
            Some(BoardType::Ongoing) => day.ongoing_count += 1,
            Some(BoardType::Departing) => day.departing_count += 1,
            None => {}
        }
    }

    days.into_values()
        .map(|mut day| {
            day.headcount = headcount(&day);
            day
        })
        .collect()
}

/// `daycare + arriving + ongoing + 0.5 * departing`.
pub fn headcount(day: &DailyAggregate) -> f64 {
    f64::from(day.daycare_visits)
        + f64::from(day.arriving_count)
        + f64::from(day.ongoing_count)
        + DEPARTING_WEIGHT * f64::from(day.departing_count)
}

/// Merges both inputs and returns the sorted view together with the daily
/// summary.
pub fn aggregate_data(
    boarding: Vec<VisitDayRecord>,
    daycare: Vec<VisitDayRecord>,
) -> (Vec<VisitDayRecord>, Vec<DailyAggregate>) {
    let sorted = merge_visits(boarding, daycare);
    let aggregates = daily_aggregates(&sorted);
    debug!(
        visit_days = sorted.len(),
        days = aggregates.len(),
        "aggregated occupancy"
    );
    (sorted, aggregates)
}

/// Keeps the aggregates whose date falls inside `window`.
pub fn filter_window(aggregates: &[DailyAggregate], window: &DateWindow) -> Vec<DailyAggregate> {
    aggregates
        .iter()
        .filter(|day| window.contains(day.date))
        .cloned()
        .collect()
}
