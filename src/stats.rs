//! Aggregate statistics over launches
//!
//! Pure aggregations over already-materialized records. Upcoming launches are
//! never counted as successful or failed; launches with an unknown outcome
//! are excluded from success-rate denominators.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::{Launch, Launchpad, Rocket};

/// Overall launch counts and success rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchTotals {
    /// Historical (non-upcoming) launches
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub upcoming: usize,
    /// Percentage of historical launches that succeeded
    pub success_rate: f64,
}

/// Per-rocket launch record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocketRecord {
    pub total: usize,
    pub successful: usize,
    pub success_rate: f64,
}

/// Launch counts per calendar year and per `YYYY-MM` month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchFrequency {
    pub yearly: BTreeMap<i32, usize>,
    pub monthly: BTreeMap<String, usize>,
}

/// Everything the `stats` command reports, in one serializable bundle
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub totals: LaunchTotals,
    pub by_rocket: BTreeMap<String, RocketRecord>,
    pub by_site: BTreeMap<String, usize>,
    pub frequency: LaunchFrequency,
}

/// Overall totals across the collection
pub fn launch_totals(launches: &[Launch]) -> LaunchTotals {
    let total = launches.iter().filter(|l| !l.upcoming).count();
    let successful = launches
        .iter()
        .filter(|l| !l.upcoming && l.success == Some(true))
        .count();
    let failed = launches
        .iter()
        .filter(|l| !l.upcoming && l.success == Some(false))
        .count();
    let upcoming = launches.iter().filter(|l| l.upcoming).count();

    let success_rate = if total > 0 {
        successful as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    LaunchTotals {
        total,
        successful,
        failed,
        upcoming,
        success_rate,
    }
}

/// Success rate per rocket, keyed by rocket name (id when unknown)
///
/// Only historical launches with a known outcome enter the denominator.
pub fn success_rate_by_rocket(
    launches: &[Launch],
    rockets: &[Rocket],
) -> BTreeMap<String, RocketRecord> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for launch in launches {
        if launch.upcoming || launch.success.is_none() {
            continue;
        }
        let entry = counts.entry(launch.rocket.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if launch.success == Some(true) {
            entry.1 += 1;
        }
    }

    let names: BTreeMap<&str, &str> = rockets
        .iter()
        .map(|r| (r.id.as_str(), r.name.as_str()))
        .collect();

    counts
        .into_iter()
        .map(|(rocket_id, (total, successful))| {
            let success_rate = if total > 0 {
                successful as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let name = names.get(rocket_id).copied().unwrap_or(rocket_id);
            (
                name.to_string(),
                RocketRecord {
                    total,
                    successful,
                    success_rate,
                },
            )
        })
        .collect()
}

/// Historical launch count per site, keyed by launchpad name (id when unknown)
pub fn launches_by_site(
    launches: &[Launch],
    launchpads: &[Launchpad],
) -> BTreeMap<String, usize> {
    let names: BTreeMap<&str, &str> = launchpads
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for launch in launches.iter().filter(|l| !l.upcoming) {
        let name = names
            .get(launch.launchpad.as_str())
            .copied()
            .unwrap_or(launch.launchpad.as_str());
        *counts.entry(name.to_string()).or_default() += 1;
    }
    counts
}

/// Historical launch frequency per year and month
///
/// Launches whose `date_utc` does not parse are skipped.
pub fn launch_frequency(launches: &[Launch]) -> LaunchFrequency {
    use chrono::Datelike;

    let mut yearly: BTreeMap<i32, usize> = BTreeMap::new();
    let mut monthly: BTreeMap<String, usize> = BTreeMap::new();

    for launch in launches.iter().filter(|l| !l.upcoming) {
        let Some(day) = launch.date() else {
            continue;
        };
        *yearly.entry(day.year()).or_default() += 1;
        *monthly
            .entry(format!("{}-{:02}", day.year(), day.month()))
            .or_default() += 1;
    }

    LaunchFrequency { yearly, monthly }
}

/// Builds the full report consumed by the `stats` command
pub fn stats_report(
    launches: &[Launch],
    rockets: &[Rocket],
    launchpads: &[Launchpad],
) -> StatsReport {
    StatsReport {
        totals: launch_totals(launches),
        by_rocket: success_rate_by_rocket(launches, rockets),
        by_site: launches_by_site(launches, launchpads),
        frequency: launch_frequency(launches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;
    use serde_json::json;

    fn launch(
        id: &str,
        date_utc: &str,
        rocket: &str,
        launchpad: &str,
        success: Option<bool>,
        upcoming: bool,
    ) -> Launch {
        let raw: RawRecord = json!({
            "id": id,
            "flight_number": 1,
            "name": id,
            "date_utc": date_utc,
            "date_unix": 0,
            "date_local": date_utc,
            "date_precision": "hour",
            "rocket": rocket,
            "launchpad": launchpad,
            "success": success,
            "upcoming": upcoming
        })
        .as_object()
        .expect("object")
        .clone();
        Launch::from_raw(&raw).expect("fixture should project")
    }

    fn rocket(id: &str, name: &str) -> Rocket {
        let raw: RawRecord = json!({
            "id": id,
            "name": name,
            "type": "rocket",
            "active": true,
            "stages": 2,
            "boosters": 0,
            "cost_per_launch": 1,
            "success_rate_pct": 100,
            "first_flight": "2010-06-04",
            "country": "US",
            "company": "SpaceX",
            "height": {},
            "diameter": {},
            "mass": {}
        })
        .as_object()
        .expect("object")
        .clone();
        Rocket::from_raw(&raw).expect("fixture should project")
    }

    fn pad(id: &str, name: &str) -> Launchpad {
        let raw: RawRecord = json!({
            "id": id,
            "name": name,
            "full_name": name,
            "status": "active",
            "locality": "x",
            "region": "y",
            "timezone": "UTC",
            "latitude": 0.0,
            "longitude": 0.0,
            "launch_attempts": 0,
            "launch_successes": 0
        })
        .as_object()
        .expect("object")
        .clone();
        Launchpad::from_raw(&raw).expect("fixture should project")
    }

    #[test]
    fn test_totals_exclude_upcoming_from_outcomes() {
        // Two upcoming, one successful, one failed historical launch.
        let launches = vec![
            launch("u1", "2030-01-01T00:00:00Z", "f9", "p1", None, true),
            launch("u2", "2030-02-01T00:00:00Z", "f9", "p1", None, true),
            launch("ok", "2020-01-01T00:00:00Z", "f9", "p1", Some(true), false),
            launch("ko", "2020-02-01T00:00:00Z", "f9", "p1", Some(false), false),
        ];

        let totals = launch_totals(&launches);

        assert_eq!(totals.total, 2);
        assert_eq!(totals.successful, 1);
        assert_eq!(totals.failed, 1);
        assert_eq!(totals.upcoming, 2);
        assert!((totals.success_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_totals_on_empty_collection() {
        let totals = launch_totals(&[]);
        assert_eq!(totals.total, 0);
        assert!((totals.success_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_upcoming_launch_marked_successful_is_not_counted() {
        // The upcoming flag wins over a success flag set upstream.
        let launches = vec![launch("u", "2030-01-01T00:00:00Z", "f9", "p1", Some(true), true)];
        let totals = launch_totals(&launches);
        assert_eq!(totals.successful, 0);
        assert_eq!(totals.upcoming, 1);
    }

    #[test]
    fn test_success_rate_by_rocket() {
        let launches = vec![
            launch("a", "2020-01-01T00:00:00Z", "f9", "p1", Some(true), false),
            launch("b", "2020-02-01T00:00:00Z", "f9", "p1", Some(true), false),
            launch("c", "2020-03-01T00:00:00Z", "f9", "p1", Some(false), false),
            launch("d", "2020-04-01T00:00:00Z", "f1", "p1", Some(false), false),
            // Excluded: upcoming and unknown-outcome launches.
            launch("e", "2030-01-01T00:00:00Z", "f9", "p1", None, true),
            launch("f", "2020-05-01T00:00:00Z", "f9", "p1", None, false),
        ];
        let rockets = vec![rocket("f9", "Falcon 9"), rocket("f1", "Falcon 1")];

        let by_rocket = success_rate_by_rocket(&launches, &rockets);

        let f9 = &by_rocket["Falcon 9"];
        assert_eq!(f9.total, 3);
        assert_eq!(f9.successful, 2);
        assert!((f9.success_rate - 200.0 / 3.0).abs() < 1e-9);

        let f1 = &by_rocket["Falcon 1"];
        assert_eq!(f1.total, 1);
        assert_eq!(f1.successful, 0);
        assert!((f1.success_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_rocket_id_keys_by_id() {
        let launches = vec![launch("a", "2020-01-01T00:00:00Z", "mystery", "p1", Some(true), false)];
        let by_rocket = success_rate_by_rocket(&launches, &[]);
        assert!(by_rocket.contains_key("mystery"));
    }

    #[test]
    fn test_launches_by_site() {
        let launches = vec![
            launch("a", "2020-01-01T00:00:00Z", "f9", "p1", Some(true), false),
            launch("b", "2020-02-01T00:00:00Z", "f9", "p1", Some(false), false),
            launch("c", "2020-03-01T00:00:00Z", "f9", "p2", Some(true), false),
            launch("d", "2030-01-01T00:00:00Z", "f9", "p1", None, true),
        ];
        let pads = vec![pad("p1", "KSC LC 39A"), pad("p2", "SLC 40")];

        let by_site = launches_by_site(&launches, &pads);

        assert_eq!(by_site["KSC LC 39A"], 2);
        assert_eq!(by_site["SLC 40"], 1);
    }

    #[test]
    fn test_launch_frequency_groups_by_year_and_month() {
        let launches = vec![
            launch("a", "2020-01-10T00:00:00Z", "f9", "p1", Some(true), false),
            launch("b", "2020-01-20T00:00:00Z", "f9", "p1", Some(true), false),
            launch("c", "2020-06-01T00:00:00Z", "f9", "p1", Some(false), false),
            launch("d", "2021-03-01T00:00:00Z", "f9", "p1", Some(true), false),
            launch("e", "2030-01-01T00:00:00Z", "f9", "p1", None, true),
        ];

        let frequency = launch_frequency(&launches);

        assert_eq!(frequency.yearly[&2020], 3);
        assert_eq!(frequency.yearly[&2021], 1);
        assert_eq!(frequency.monthly["2020-01"], 2);
        assert_eq!(frequency.monthly["2020-06"], 1);
        assert_eq!(frequency.monthly["2021-03"], 1);
        assert!(!frequency.yearly.contains_key(&2030), "upcoming launches are excluded");
    }

    #[test]
    fn test_launch_frequency_skips_unparseable_dates() {
        let launches = vec![
            launch("a", "garbage", "f9", "p1", Some(true), false),
            launch("b", "2020-01-01T00:00:00Z", "f9", "p1", Some(true), false),
        ];

        let frequency = launch_frequency(&launches);

        assert_eq!(frequency.yearly.len(), 1);
        assert_eq!(frequency.yearly[&2020], 1);
    }

    #[test]
    fn test_stats_report_serializes() {
        let launches = vec![launch("a", "2020-01-01T00:00:00Z", "f9", "p1", Some(true), false)];
        let report = stats_report(&launches, &[rocket("f9", "Falcon 9")], &[pad("p1", "Pad")]);

        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["totals"]["total"], 1);
        assert_eq!(json["by_rocket"]["Falcon 9"]["successful"], 1);
        assert_eq!(json["by_site"]["Pad"], 1);
    }
}
