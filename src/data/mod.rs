//! Core data models for the SpaceX launch tracker
//!
//! This module contains the typed records materialized from the upstream API
//! (launches, rockets, launchpads) together with the projection logic that
//! turns raw JSON mappings into them.

pub mod spacex;

pub use spacex::{FetchError, SpaceXClient};

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A field-name-to-value mapping as decoded from JSON, prior to projection
/// into one of the typed records.
pub type RawRecord = Map<String, Value>;

/// The three record kinds served by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Launch,
    Rocket,
    Launchpad,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Launch => write!(f, "launch"),
            RecordKind::Rocket => write!(f, "rocket"),
            RecordKind::Launchpad => write!(f, "launchpad"),
        }
    }
}

/// A raw record could not be projected because a required field is absent
/// or has the wrong type.
#[derive(Debug, Error)]
#[error("malformed {kind} record: {source}")]
pub struct MalformedRecord {
    /// Which record kind failed projection
    pub kind: RecordKind,
    source: serde_json::Error,
}

/// Projects a raw mapping into a typed record.
///
/// Unknown keys are silently dropped; missing optional fields take their
/// documented defaults. A missing or ill-typed required field is an error.
fn project<T: DeserializeOwned>(kind: RecordKind, raw: &RawRecord) -> Result<T, MalformedRecord> {
    serde_json::from_value(Value::Object(raw.clone()))
        .map_err(|source| MalformedRecord { kind, source })
}

/// A rocket as described by the upstream API.
///
/// Immutable once constructed; physical dimensions are kept as unit-keyed
/// mappings (e.g. `{"meters": 70.0, "feet": 229.6}`) as served upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// Opaque upstream identifier
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub rocket_type: String,
    /// Whether the rocket is in active service
    pub active: bool,
    pub stages: u32,
    pub boosters: u32,
    pub cost_per_launch: u64,
    /// Advertised success rate percentage (0-100)
    pub success_rate_pct: u32,
    /// First flight date as `YYYY-MM-DD`
    pub first_flight: String,
    pub country: String,
    pub company: String,
    /// Height by unit, nullable per unit
    pub height: HashMap<String, Option<f64>>,
    /// Diameter by unit, nullable per unit
    pub diameter: HashMap<String, Option<f64>>,
    /// Mass by unit, nullable per unit
    pub mass: HashMap<String, Option<f64>>,
    /// Payload capacity per orbit, kept in raw form
    #[serde(default)]
    pub payload_weights: Vec<RawRecord>,
    #[serde(default)]
    pub first_stage: RawRecord,
    #[serde(default)]
    pub second_stage: RawRecord,
    #[serde(default)]
    pub engines: RawRecord,
    #[serde(default)]
    pub landing_legs: RawRecord,
    #[serde(default)]
    pub flickr_images: Vec<String>,
    #[serde(default)]
    pub wikipedia: String,
    #[serde(default)]
    pub description: String,
}

impl Rocket {
    /// Projects a raw mapping into a `Rocket`.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, MalformedRecord> {
        project(RecordKind::Rocket, raw)
    }
}

/// A launch site as described by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launchpad {
    /// Opaque upstream identifier
    pub id: String,
    pub name: String,
    pub full_name: String,
    /// Operational status, e.g. "active" or "retired"
    pub status: String,
    pub locality: String,
    pub region: String,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub launch_attempts: u32,
    pub launch_successes: u32,
    /// Identifiers of rockets flown from this pad
    #[serde(default)]
    pub rockets: Vec<String>,
    /// Identifiers of launches flown from this pad
    #[serde(default)]
    pub launches: Vec<String>,
    #[serde(default)]
    pub details: String,
}

impl Launchpad {
    /// Projects a raw mapping into a `Launchpad`.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, MalformedRecord> {
        project(RecordKind::Launchpad, raw)
    }
}

/// A single failure during a launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchFailure {
    /// Seconds into flight at which the failure occurred
    pub time: i64,
    /// Altitude in kilometers, when known
    pub altitude: Option<f64>,
    pub reason: String,
}

/// A launch as described by the upstream API.
///
/// The three date representations (`date_utc`, `date_unix`, `date_local`) plus
/// `date_precision` are kept verbatim. `success` is tri-state: `Some(true)`,
/// `Some(false)`, or `None` while the launch is upcoming or data is
/// incomplete. Aggregations must never count an upcoming launch as either
/// successful or failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Opaque upstream identifier
    pub id: String,
    /// Positive, unique across the collection
    pub flight_number: u32,
    pub name: String,
    /// Launch date as an ISO-8601 UTC string
    pub date_utc: String,
    /// Launch date as Unix epoch seconds
    pub date_unix: i64,
    /// Launch date in the pad's local timezone
    pub date_local: String,
    /// Precision of the date fields, e.g. "hour" or "month"
    pub date_precision: String,
    pub static_fire_date_utc: Option<String>,
    pub static_fire_date_unix: Option<i64>,
    #[serde(default)]
    pub tbd: bool,
    #[serde(default)]
    pub net: bool,
    /// Launch window in seconds, when known
    pub window: Option<i64>,
    /// Identifier of the rocket flown
    #[serde(default)]
    pub rocket: String,
    pub success: Option<bool>,
    #[serde(default)]
    pub failures: Vec<LaunchFailure>,
    #[serde(default)]
    pub upcoming: bool,
    pub details: Option<String>,
    pub fairings: Option<RawRecord>,
    #[serde(default)]
    pub crew: Vec<String>,
    #[serde(default)]
    pub ships: Vec<String>,
    #[serde(default)]
    pub capsules: Vec<String>,
    #[serde(default)]
    pub payloads: Vec<String>,
    /// Identifier of the launchpad used
    #[serde(default)]
    pub launchpad: String,
    #[serde(default)]
    pub cores: Vec<RawRecord>,
    #[serde(default)]
    pub links: RawRecord,
    #[serde(default)]
    pub auto_update: bool,
}

impl Launch {
    /// Projects a raw mapping into a `Launch`.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, MalformedRecord> {
        project(RecordKind::Launch, raw)
    }

    /// The calendar day of `date_utc`, or `None` if it is not valid RFC 3339.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.date_utc)
            .ok()
            .map(|dt| dt.date_naive())
    }

    /// Human-readable outcome of the launch.
    pub fn outcome(&self) -> &'static str {
        if self.upcoming {
            "upcoming"
        } else {
            match self.success {
                Some(true) => "success",
                Some(false) => "failure",
                None => "unknown",
            }
        }
    }
}
