//! Clients who visited recently but have nothing booked after today.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::pci::analysis::model::{ClientBookingSummary, VisitDayRecord};

/// Summarises every client with at least one visit in
/// `[lookback_date, today]`, counting their visits after `today`.
///
/// Clients who only have future visits are not reported. Output is ordered by
/// client name.
pub fn booking_summaries(
    visits: &[VisitDayRecord],
    today: NaiveDate,
    lookback_date: NaiveDate,
) -> Vec<ClientBookingSummary> {
    let mut past: BTreeMap<&str, (u32, NaiveDate)> = BTreeMap::new();
    let mut future: BTreeMap<&str, u32> = BTreeMap::new();

    for visit in visits {
        if lookback_date <= visit.date && visit.date <= today {
            let entry = past
                .entry(visit.client.as_str())
                .or_insert((0, visit.date));
            entry.0 += 1;
            entry.1 = entry.1.max(visit.date);
        } else if visit.date > today {
            *future.entry(visit.client.as_str()).or_default() += 1;
        }
    }

    past.into_iter()
        .map(|(client, (total_visits, last_visit))| {
            let future_visits = future.get(client).copied().unwrap_or(0);
            ClientBookingSummary {
                client: client.to_string(),
                total_visits,
                last_visit,
                future_visits,
                has_future_booking: future_visits > 0,
            }
        })
        .collect()
}

/// Clients active in the lookback window with no visit after `today`.
pub fn suggested_bookings(
    visits: &[VisitDayRecord],
    today: NaiveDate,
    lookback_date: NaiveDate,
) -> Vec<ClientBookingSummary> {
    let summaries = booking_summaries(visits, today, lookback_date);
    let active = summaries.len();
    let suggestions: Vec<ClientBookingSummary> = summaries
        .into_iter()
        .filter(|summary| !summary.has_future_booking)
        .collect();
    debug!(
        active_clients = active,
        without_booking = suggestions.len(),
        "computed booking gaps"
    );
    suggestions
}
