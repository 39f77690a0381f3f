//! Binary search for the first day a user has move data.

use crate::dates::format_date;
use crate::{JawboneApi, JawboneError};
use chrono::{Duration, Local, NaiveDate};
use serde_json::Value;

/// Lower bound of the default search window; the service has no data before 2011.
pub fn search_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub async fn find_registration_date<C>(client: &C) -> Result<Option<NaiveDate>, JawboneError>
where
    C: JawboneApi + ?Sized,
{
    let today = Local::now().date_naive();
    find_registration_date_between(client, search_floor(), today).await
}

/// Search `[low, high]` (inclusive) for the earliest day whose `moves_date`
/// listing has items.
///
/// Assumes data exists on every day from registration onwards, so the day
/// before `low` is treated as empty. Returns `None` when no day in the
/// window has data.
pub async fn find_registration_date_between<C>(
    client: &C,
    low: NaiveDate,
    high: NaiveDate,
) -> Result<Option<NaiveDate>, JawboneError>
where
    C: JawboneApi + ?Sized,
{
    if low > high {
        return Ok(None);
    }
    // `empty` never has data; `high` has data once `best` is set.
    let mut empty = low - Duration::days(1);
    let mut high = high;
    let mut best = None;

    loop {
        tracing::info!("Registration date search in period of {} - {}", empty, high);
        let span = (high - empty).num_days();
        if span <= 1 {
            break;
        }

        let mid = empty + Duration::days(span / 2);
        if has_moves(client, mid).await? {
            best = Some(mid);
            high = mid;
        } else {
            empty = mid;
        }
    }

    // Only the upper bound is left unprobed.
    if best.is_none() && has_moves(client, high).await? {
        best = Some(high);
    }
    Ok(best)
}

async fn has_moves<C>(client: &C, day: NaiveDate) -> Result<bool, JawboneError>
where
    C: JawboneApi + ?Sized,
{
    let resp = client.moves_date(&format_date(day)).await?;
    Ok(resp
        .get("items")
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endpoint;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Has move data on every day on or after `first`.
    struct RegisteredOn {
        first: Option<NaiveDate>,
        probes: AtomicUsize,
    }

    impl RegisteredOn {
        fn new(first: Option<NaiveDate>) -> Self {
            Self {
                first,
                probes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JawboneApi for RegisteredOn {
        async fn resolve(&self, endpoint: Endpoint, args: &[&str]) -> Result<Value, JawboneError> {
            assert_eq!(endpoint, Endpoint::MovesDate);
            self.probes.fetch_add(1, Ordering::SeqCst);
            let day = crate::dates::parse_date(args[0])?;
            let items = match self.first {
                Some(first) if day >= first => json!([{"xid": "m", "date": 0}]),
                _ => json!([]),
            };
            Ok(json!({ "items": items }))
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn finds_exact_boundary() {
        let high = day(2024, 6, 30);
        for first in [day(2013, 11, 21), day(2011, 1, 2), day(2024, 6, 29), day(2019, 2, 28)] {
            let api = RegisteredOn::new(Some(first));
            let found = find_registration_date_between(&api, search_floor(), high)
                .await
                .unwrap();
            assert_eq!(found, Some(first), "registration on {first}");
        }
    }

    #[tokio::test]
    async fn finds_first_day_of_window() {
        let api = RegisteredOn::new(Some(search_floor()));
        let found = find_registration_date_between(&api, search_floor(), day(2024, 6, 30))
            .await
            .unwrap();
        assert_eq!(found, Some(search_floor()));
    }

    #[tokio::test]
    async fn finds_last_day_of_window() {
        let high = day(2024, 6, 30);
        let api = RegisteredOn::new(Some(high));
        let found = find_registration_date_between(&api, search_floor(), high)
            .await
            .unwrap();
        assert_eq!(found, Some(high));
    }

    #[tokio::test]
    async fn absent_when_no_data_anywhere() {
        let api = RegisteredOn::new(None);
        let found = find_registration_date_between(&api, search_floor(), day(2024, 6, 30))
            .await
            .unwrap();
        assert_eq!(found, None);
        // Roughly log2 of the window in days, plus the upper bound.
        assert!(api.probes.load(Ordering::SeqCst) <= 15);
    }

    #[tokio::test]
    async fn single_day_window_probes_once() {
        let api = RegisteredOn::new(Some(day(2015, 1, 1)));
        let found = find_registration_date_between(&api, day(2015, 1, 1), day(2015, 1, 1))
            .await
            .unwrap();
        assert_eq!(found, Some(day(2015, 1, 1)));
        assert_eq!(api.probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reversed_window_issues_no_requests() {
        let api = RegisteredOn::new(Some(day(2015, 1, 1)));
        let found = find_registration_date_between(&api, day(2015, 1, 2), day(2015, 1, 1))
            .await
            .unwrap();
        assert_eq!(found, None);
        assert_eq!(api.probes.load(Ordering::SeqCst), 0);
    }
}
