mod common;

use chrono::Duration;
use common::{boarding_table, date, daycare_table};
use pci_analysis::aggregate::{aggregate_data, filter_window, headcount};
use pci_analysis::boarding::parse_boarding;
use pci_analysis::config::{BoardingLayout, DaycareLayout};
use pci_analysis::daycare::parse_daycare;
use pci_analysis::model::{BoardType, VisitDayRecord, VisitType};
use pci_analysis::table::Cell;
use pci_analysis::window::DateWindow;
use proptest::prelude::*;

#[test]
fn single_stay_with_empty_daycare_log() {
    let boarding = parse_boarding(
        boarding_table(&[("Jane", "Rex", "2024-01-01", "2024-01-03")]),
        &BoardingLayout::default(),
    )
    .expect("boarding parsed");
    let daycare =
        parse_daycare(daycare_table(&[]), &DaycareLayout::default()).expect("daycare parsed");

    let (_, daily) = aggregate_data(boarding, daycare);
    let summary: Vec<_> = daily
        .iter()
        .map(|day| {
            (
                day.date,
                day.arriving_count,
                day.ongoing_count,
                day.departing_count,
                day.headcount,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (date("2024-01-01"), 1, 0, 0, 1.0),
            (date("2024-01-02"), 0, 1, 0, 1.0),
            (date("2024-01-03"), 0, 0, 1, 0.5),
        ]
    );
    assert!(daily.iter().all(|day| day.boarding_visits == 1 && day.daycare_visits == 0));
    assert_eq!(daily[0].day_of_week, "Monday");
}

#[test]
fn boarding_sorts_before_daycare_on_the_same_day() {
    let daycare = parse_daycare(
        daycare_table(&[Cell::text("2024-01-02 00:00:00"), Cell::text("Smith: Rex")]),
        &DaycareLayout::default(),
    )
    .expect("daycare parsed");
    let boarding = parse_boarding(
        boarding_table(&[("Jane", "Bo", "2024-01-02", "2024-01-04")]),
        &BoardingLayout::default(),
    )
    .expect("boarding parsed");

    let (sorted, daily) = aggregate_data(boarding, daycare);
    let kinds: Vec<_> = sorted
        .iter()
        .map(|visit| (visit.date, visit.visit_type))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (date("2024-01-02"), VisitType::Boarding),
            (date("2024-01-02"), VisitType::Daycare),
            (date("2024-01-03"), VisitType::Boarding),
            (date("2024-01-04"), VisitType::Boarding),
        ]
    );
    assert_eq!(daily[0].daycare_visits, 1);
    assert_eq!(daily[0].headcount, 2.0);
}

#[test]
fn empty_inputs_produce_empty_outputs() {
    let (sorted, daily) = aggregate_data(Vec::new(), Vec::new());
    assert!(sorted.is_empty());
    assert!(daily.is_empty());
}

#[test]
fn window_filters_compose() {
    let boarding = parse_boarding(
        boarding_table(&[
            ("Jane", "Rex", "2024-01-01", "2024-01-10"),
            ("Bob", "Fido", "2024-01-05", "2024-01-20"),
        ]),
        &BoardingLayout::default(),
    )
    .expect("boarding parsed");
    let (_, daily) = aggregate_data(boarding, Vec::new());

    let narrow = DateWindow::new(date("2024-01-04"), date("2024-01-08")).expect("window");
    let wide = DateWindow::new(date("2024-01-02"), date("2024-01-15")).expect("window");

    let direct = filter_window(&daily, &narrow);
    let composed = filter_window(&filter_window(&filter_window(&daily, &narrow), &wide), &narrow);
    let widened_first = filter_window(&filter_window(&daily, &wide), &narrow);

    assert_eq!(direct.len(), 5);
    assert_eq!(composed, direct);
    assert_eq!(widened_first, direct);
}

fn visit_strategy() -> impl Strategy<Value = VisitDayRecord> {
    let board_type = prop_oneof![
        Just(None),
        Just(Some(BoardType::Arriving)),
        Just(Some(BoardType::Ongoing)),
        Just(Some(BoardType::Departing)),
    ];
    (0i64..14, 0usize..4, any::<bool>(), board_type).prop_map(
        |(offset, client, boarding, board_type)| {
            let day = date("2024-06-01") + Duration::days(offset);
            let client = format!("client-{client}");
            if boarding {
                VisitDayRecord::boarding(
                    day,
                    client,
                    "pet",
                    board_type.unwrap_or(BoardType::Ongoing),
                )
            } else {
                VisitDayRecord::daycare(day, client, "pet")
            }
        },
    )
}

fn shuffled_pair() -> impl Strategy<Value = (Vec<VisitDayRecord>, Vec<VisitDayRecord>)> {
    prop::collection::vec(visit_strategy(), 0..40)
        .prop_flat_map(|visits| (Just(visits.clone()), Just(visits).prop_shuffle()))
}

proptest! {
    #[test]
    fn aggregates_ignore_input_order(
        (boarding, boarding_shuffled) in shuffled_pair(),
        (daycare, daycare_shuffled) in shuffled_pair(),
    ) {
        let (_, expected) = aggregate_data(boarding, daycare);
        let (_, actual) = aggregate_data(boarding_shuffled, daycare_shuffled);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn headcount_matches_formula(visits in prop::collection::vec(visit_strategy(), 0..60)) {
        let (_, daily) = aggregate_data(visits, Vec::new());
        for day in &daily {
            let expected = f64::from(day.daycare_visits)
                + f64::from(day.arriving_count)
                + f64::from(day.ongoing_count)
                + 0.5 * f64::from(day.departing_count);
            prop_assert_eq!(day.headcount, expected);
            prop_assert_eq!(headcount(day), expected);
        }
    }
}
