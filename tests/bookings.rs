mod common;

use common::date;
use pci_analysis::bookings::{booking_summaries, suggested_bookings};
use pci_analysis::io::csv_write::to_csv_string;
use pci_analysis::model::{BoardType, VisitDayRecord};

fn visits() -> Vec<VisitDayRecord> {
    vec![
        VisitDayRecord::daycare(date("2024-05-01"), "Lapsed", "Rex"),
        VisitDayRecord::daycare(date("2024-05-20"), "Regular", "Bella"),
        VisitDayRecord::boarding(date("2024-06-05"), "Regular", "Bella", BoardType::Arriving),
        VisitDayRecord::daycare(date("2024-05-25"), "Lapsed", "Rex"),
        VisitDayRecord::daycare(date("2024-06-10"), "Newcomer", "Max"),
        VisitDayRecord::daycare(date("2024-03-01"), "Ancient", "Tom"),
    ]
}

#[test]
fn clients_without_future_visits_are_suggested() {
    let today = date("2024-06-01");
    let suggestions = suggested_bookings(&visits(), today, date("2024-05-01"));

    assert_eq!(suggestions.len(), 1);
    let lapsed = &suggestions[0];
    assert_eq!(lapsed.client, "Lapsed");
    assert_eq!(lapsed.total_visits, 2);
    assert_eq!(lapsed.last_visit, date("2024-05-25"));
    assert_eq!(lapsed.future_visits, 0);
    assert!(!lapsed.has_future_booking);
}

#[test]
fn visit_on_the_lookback_boundary_counts() {
    let visits = vec![VisitDayRecord::daycare(date("2024-05-01"), "Edge", "Rex")];
    let suggestions = suggested_bookings(&visits, date("2024-06-01"), date("2024-05-01"));

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].client, "Edge");
    assert_eq!(suggestions[0].future_visits, 0);

    let csv = to_csv_string(&suggestions).expect("csv rendered");
    assert_eq!(
        csv,
        "Client,total_visits,last_visit,future_visits,has_future_booking\nEdge,1,2024-05-01,0,No\n"
    );
}

#[test]
fn summaries_cover_only_clients_with_past_activity() {
    let summaries = booking_summaries(&visits(), date("2024-06-01"), date("2024-05-01"));
    let clients: Vec<_> = summaries
        .iter()
        .map(|summary| (summary.client.as_str(), summary.future_visits))
        .collect();

    assert_eq!(clients, vec![("Lapsed", 0), ("Regular", 1)]);
    assert!(summaries[1].has_future_booking);
}

#[test]
fn visits_today_are_past_not_future() {
    let visits = vec![VisitDayRecord::daycare(date("2024-06-01"), "Today", "Rex")];
    let suggestions = suggested_bookings(&visits, date("2024-06-01"), date("2024-05-01"));
    assert_eq!(suggestions.len(), 1);
}

#[test]
fn empty_partitions_yield_nothing() {
    assert!(suggested_bookings(&[], date("2024-06-01"), date("2024-05-01")).is_empty());

    let only_future = vec![VisitDayRecord::daycare(date("2024-07-01"), "Later", "Rex")];
    assert!(suggested_bookings(&only_future, date("2024-06-01"), date("2024-05-01")).is_empty());
}
