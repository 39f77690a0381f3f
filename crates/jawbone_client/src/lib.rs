//! Client for the Jawbone UP ("nudge") REST API.
//!
//! [`JawboneApi`] is the seam: implementors only provide [`JawboneApi::resolve`],
//! everything else (named accessors, date-ranged listings, the total report and
//! the registration-date search) is layered on top of it.
//! [`http_client::ReqwestJawboneClient`] is the reqwest-backed implementation
//! and also owns the OAuth2 code/token exchange.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

pub mod config;
pub mod dates;
pub mod endpoints;
pub mod http_client;
pub mod oauth;
pub mod registration;
pub mod report;

pub use endpoints::Endpoint;
pub use oauth::{Credentials, Scope, TokenResponse};
pub use report::{ActivityKind, TotalReport};

#[derive(Debug, Error)]
pub enum JawboneError {
    #[error("unknown endpoint: {0}")]
    Endpoint(String),
    #[error("authorization error: {0}")]
    Authorization(String),
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("endpoint {endpoint} expects {expected} argument(s), got {got}")]
    Format {
        endpoint: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected content type: {0}")]
    UnexpectedContentType(String),
    #[error("malformed response: {0}")]
    Envelope(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl JawboneError {
    /// True when the error means the logical resource name is not in the endpoint table.
    pub fn is_endpoint(&self) -> bool {
        matches!(self, JawboneError::Endpoint(_))
    }
}

#[async_trait]
pub trait JawboneApi: Send + Sync {
    /// Issue a GET for `endpoint` with its placeholders filled from `args` and
    /// return the `data` field of the response envelope.
    async fn resolve(&self, endpoint: Endpoint, args: &[&str]) -> Result<Value, JawboneError>;

    /// Dispatch by logical resource name, e.g. `"sleep_list"` or `"move_snapshot"`.
    async fn resolve_named(&self, name: &str, args: &[&str]) -> Result<Value, JawboneError> {
        let endpoint = Endpoint::from_name(name)?;
        self.resolve(endpoint, args).await
    }

    // === Users ===

    async fn me(&self) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Me, &[]).await
    }

    /// Alias of [`JawboneApi::me`].
    async fn profile(&self) -> Result<Value, JawboneError> {
        self.me().await
    }

    async fn friends(&self) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Friends, &[]).await
    }

    async fn trends(&self) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Trends, &[]).await
    }

    // === Mood ===

    async fn mood_list(&self) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::MoodList, &[]).await
    }

    async fn mood(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Mood, &[xid]).await
    }

    // === Moves ===

    /// Moves recorded on a single `YYYYMMDD` day.
    async fn moves_date(&self, date: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::MovesDate, &[date]).await
    }

    async fn moves_list(&self, start_time: &str, end_time: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::MovesList, &[start_time, end_time])
            .await
    }

    async fn move_detail(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Move, &[xid]).await
    }

    async fn move_image(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::MoveImage, &[xid]).await
    }

    async fn move_snapshot(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::MoveSnapshot, &[xid]).await
    }

    // === Workouts ===

    async fn workouts_list(&self, start_time: &str, end_time: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::WorkoutsList, &[start_time, end_time])
            .await
    }

    async fn workout(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Workout, &[xid]).await
    }

    async fn workout_image(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::WorkoutImage, &[xid]).await
    }

    async fn workout_snapshot(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::WorkoutSnapshot, &[xid]).await
    }

    // === Sleeps ===

    async fn sleep_list(&self, start_time: &str, end_time: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::SleepList, &[start_time, end_time])
            .await
    }

    async fn sleep(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Sleep, &[xid]).await
    }

    async fn sleep_image(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::SleepImage, &[xid]).await
    }

    async fn sleep_snapshot(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::SleepSnapshot, &[xid]).await
    }

    // === Meals, body and cardiac events ===

    async fn meals_list(&self, start_time: &str, end_time: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::MealsList, &[start_time, end_time])
            .await
    }

    async fn meal(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::Meal, &[xid]).await
    }

    async fn body_events_list(
        &self,
        start_time: &str,
        end_time: &str,
    ) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::BodyEventsList, &[start_time, end_time])
            .await
    }

    async fn body_event(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::BodyEvent, &[xid]).await
    }

    async fn cardiac_events_list(
        &self,
        start_time: &str,
        end_time: &str,
    ) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::CardiacEventsList, &[start_time, end_time])
            .await
    }

    async fn cardiac_event(&self, xid: &str) -> Result<Value, JawboneError> {
        self.resolve(Endpoint::CardiacEvent, &[xid]).await
    }

    // === Date-ranged listings (dates in `YYYYMMDD`) ===

    /// List `kind` records between two calendar days, converting both days to
    /// local-midnight Unix timestamps first.
    async fn activity_list(
        &self,
        kind: ActivityKind,
        start_date: &str,
        finish_date: &str,
    ) -> Result<Value, JawboneError> {
        let start_time = dates::prepare_date(start_date)?;
        let end_time = dates::prepare_date(finish_date)?;
        self.resolve(kind.list_endpoint(), &[start_time.as_str(), end_time.as_str()])
            .await
    }

    async fn moves(&self, start_date: &str, finish_date: &str) -> Result<Value, JawboneError> {
        self.activity_list(ActivityKind::Move, start_date, finish_date)
            .await
    }

    async fn sleeps(&self, start_date: &str, finish_date: &str) -> Result<Value, JawboneError> {
        self.activity_list(ActivityKind::Sleep, start_date, finish_date)
            .await
    }

    async fn workouts(&self, start_date: &str, finish_date: &str) -> Result<Value, JawboneError> {
        self.activity_list(ActivityKind::Workout, start_date, finish_date)
            .await
    }

    async fn meals(&self, start_date: &str, finish_date: &str) -> Result<Value, JawboneError> {
        self.activity_list(ActivityKind::Meal, start_date, finish_date)
            .await
    }

    async fn body_events(
        &self,
        start_date: &str,
        finish_date: &str,
    ) -> Result<Value, JawboneError> {
        self.activity_list(ActivityKind::BodyEvent, start_date, finish_date)
            .await
    }

    async fn cardiac_events(
        &self,
        start_date: &str,
        finish_date: &str,
    ) -> Result<Value, JawboneError> {
        self.activity_list(ActivityKind::CardiacEvent, start_date, finish_date)
            .await
    }

    // === Aggregates ===

    /// Every activity record (and snapshot, where one exists) between two
    /// `YYYYMMDD` days, keyed by day.
    async fn total(&self, start_date: &str, finish_date: &str) -> Result<TotalReport, JawboneError> {
        report::total(self, start_date, finish_date).await
    }

    /// Earliest day with move data between 2011-01-01 and today.
    async fn find_registration_date(&self) -> Result<Option<NaiveDate>, JawboneError> {
        registration::find_registration_date(self).await
    }

    async fn find_registration_date_between(
        &self,
        low: NaiveDate,
        high: NaiveDate,
    ) -> Result<Option<NaiveDate>, JawboneError> {
        registration::find_registration_date_between(self, low, high).await
    }
}
