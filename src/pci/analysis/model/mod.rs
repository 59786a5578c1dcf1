use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

/// Kind of visit a record belongs to. The variant order is the tie-break used
/// when visits on the same day are sorted: boarding before daycare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    Boarding,
    Daycare,
}

/// Position of a visit-day inside a boarding stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    Arriving,
    Ongoing,
    Departing,
}

/// One (visit, calendar day) pair. Boarding stays expand into one record per
/// day; daycare visits produce a single record without a board type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitDayRecord {
    pub date: NaiveDate,
    pub client: String,
    pub pet: String,
    pub visit_type: VisitType,
    pub board_type: Option<BoardType>,
}

impl VisitDayRecord {
    pub fn boarding(
        date: NaiveDate,
        client: impl Into<String>,
        pet: impl Into<String>,
        board_type: BoardType,
    ) -> Self {
        Self {
            date,
            client: client.into(),
            pet: pet.into(),
            visit_type: VisitType::Boarding,
            board_type: Some(board_type),
        }
    }

    pub fn daycare(date: NaiveDate, client: impl Into<String>, pet: impl Into<String>) -> Self {
        Self {
            date,
            client: client.into(),
            pet: pet.into(),
            visit_type: VisitType::Daycare,
            board_type: None,
        }
    }

    pub fn day_of_week(&self) -> &'static str {
        day_name(self.date)
    }
}

/// Per-day occupancy summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    pub daycare_visits: u32,
    pub boarding_visits: u32,
    pub arriving_count: u32,
    pub ongoing_count: u32,
    pub departing_count: u32,
    /// Same-day occupancy; departing pets weigh half a unit.
    pub headcount: f64,
    #[serde(rename = "Day of Week")]
    pub day_of_week: &'static str,
}

impl DailyAggregate {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            daycare_visits: 0,
            boarding_visits: 0,
            arriving_count: 0,
            ongoing_count: 0,
            departing_count: 0,
            headcount: 0.0,
            day_of_week: day_name(date),
        }
    }
}

/// One vaccination line after ownership details have been filled down.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationRecord {
    pub client: Option<String>,
    pub pet: Option<String>,
    pub phone_number: Option<String>,
    pub vaccination_name: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}

/// Expiring vaccinations of one pet, as listed for the front desk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaccinationSummary {
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Pet")]
    pub pet: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Vaccination Info")]
    pub vaccination_info: String,
    #[serde(rename = "Earliest Expiration")]
    pub earliest_expiration: NaiveDate,
}

/// Visit history of one client around the reference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientBookingSummary {
    #[serde(rename = "Client")]
    pub client: String,
    pub total_visits: u32,
    pub last_visit: NaiveDate,
    pub future_visits: u32,
    #[serde(serialize_with = "yes_no")]
    pub has_future_booking: bool,
}

/// Row shape of the drill-down export of the merged visit list.
#[derive(Debug, Serialize)]
pub struct VisitRow<'a> {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Day of Week")]
    pub day_of_week: &'static str,
    #[serde(rename = "Client")]
    pub client: &'a str,
    #[serde(rename = "Pet")]
    pub pet: &'a str,
    #[serde(rename = "Visit Type")]
    pub visit_type: VisitType,
    pub board_type: Option<BoardType>,
}

impl<'a> From<&'a VisitDayRecord> for VisitRow<'a> {
    fn from(record: &'a VisitDayRecord) -> Self {
        Self {
            date: record.date,
            day_of_week: record.day_of_week(),
            client: &record.client,
            pet: &record.pet,
            visit_type: record.visit_type,
            board_type: record.board_type,
        }
    }
}

fn yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}

/// English weekday name, independent of the host locale.
pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
