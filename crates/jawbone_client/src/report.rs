//! Aggregate "total" report across every activity kind.

use crate::dates::{date_key, parse_date};
use crate::{Endpoint, JawboneApi, JawboneError};
use serde_json::Value;
use std::collections::BTreeMap;

/// Day (`YYYYMMDD`) → record name (`"move"`, `"move_snapshot"`, ...) → detail record.
pub type TotalReport = BTreeMap<u32, BTreeMap<String, Value>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Move,
    Sleep,
    Workout,
    Meal,
    BodyEvent,
    CardiacEvent,
}

impl ActivityKind {
    /// Order in which [`total`] walks the kinds.
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::Move,
        ActivityKind::Sleep,
        ActivityKind::Workout,
        ActivityKind::Meal,
        ActivityKind::BodyEvent,
        ActivityKind::CardiacEvent,
    ];

    /// Name of a single record, also the report key for its detail.
    pub fn singular(self) -> &'static str {
        match self {
            ActivityKind::Move => "move",
            ActivityKind::Sleep => "sleep",
            ActivityKind::Workout => "workout",
            ActivityKind::Meal => "meal",
            ActivityKind::BodyEvent => "body_event",
            ActivityKind::CardiacEvent => "cardiac_event",
        }
    }

    pub fn list_endpoint(self) -> Endpoint {
        match self {
            ActivityKind::Move => Endpoint::MovesList,
            ActivityKind::Sleep => Endpoint::SleepList,
            ActivityKind::Workout => Endpoint::WorkoutsList,
            ActivityKind::Meal => Endpoint::MealsList,
            ActivityKind::BodyEvent => Endpoint::BodyEventsList,
            ActivityKind::CardiacEvent => Endpoint::CardiacEventsList,
        }
    }

    pub fn detail_endpoint(self) -> Endpoint {
        match self {
            ActivityKind::Move => Endpoint::Move,
            ActivityKind::Sleep => Endpoint::Sleep,
            ActivityKind::Workout => Endpoint::Workout,
            ActivityKind::Meal => Endpoint::Meal,
            ActivityKind::BodyEvent => Endpoint::BodyEvent,
            ActivityKind::CardiacEvent => Endpoint::CardiacEvent,
        }
    }

    /// Logical name of the snapshot resource. Not every kind has one in the
    /// endpoint table.
    pub fn snapshot_name(self) -> String {
        format!("{}_snapshot", self.singular())
    }
}

/// Build the report for `[start_date, finish_date]` (both `YYYYMMDD`).
///
/// Every day of the range gets an entry, empty when nothing was recorded.
/// A kind without a snapshot endpoint simply has no `<kind>_snapshot` key;
/// every other failure aborts the report.
pub async fn total<C>(
    client: &C,
    start_date: &str,
    finish_date: &str,
) -> Result<TotalReport, JawboneError>
where
    C: JawboneApi + ?Sized,
{
    // Lexicographic order on YYYYMMDD is chronological order.
    if start_date > finish_date {
        return Err(JawboneError::Precondition(format!(
            "start date {start_date} is after finish date {finish_date}"
        )));
    }
    let start = parse_date(start_date)?;
    let finish = parse_date(finish_date)?;

    let mut report: TotalReport = start
        .iter_days()
        .take_while(|day| *day <= finish)
        .map(|day| (date_key(day), BTreeMap::new()))
        .collect();

    for kind in ActivityKind::ALL {
        let listing = client.activity_list(kind, start_date, finish_date).await?;
        let items = listing
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                JawboneError::Envelope(format!("{} listing has no items", kind.singular()))
            })?;
        tracing::debug!("{} {} record(s) to fetch", items.len(), kind.singular());

        for item in items {
            let day = item_date(item)?;
            let xid = item
                .get("xid")
                .and_then(Value::as_str)
                .ok_or_else(|| JawboneError::Envelope(format!("{} item has no xid", kind.singular())))?;

            let detail = client.resolve(kind.detail_endpoint(), &[xid]).await?;
            let snapshot = match client.resolve_named(&kind.snapshot_name(), &[xid]).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) if e.is_endpoint() => None,
                Err(e) => return Err(e),
            };

            let entry = report.entry(day).or_default();
            entry.insert(kind.singular().to_string(), detail);
            if let Some(snapshot) = snapshot {
                entry.insert(kind.snapshot_name(), snapshot);
            }
        }
    }

    Ok(report)
}

/// An item's `date`, which the service sends as an integer `YYYYMMDD`.
fn item_date(item: &Value) -> Result<u32, JawboneError> {
    let date = item.get("date");
    date.and_then(Value::as_u64)
        .and_then(|d| u32::try_from(d).ok())
        .or_else(|| date.and_then(Value::as_str).and_then(|s| s.parse().ok()))
        .ok_or_else(|| JawboneError::Envelope(format!("item has no usable date: {item}")))
}
