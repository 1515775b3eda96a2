//! Table rendering with comfy-table

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use crate::data::{Launch, Launchpad, Rocket};
use crate::stats::StatsReport;

/// Base table with the shared preset and dynamic column sizing
fn base_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Formats launches as a table, one row per launch
pub fn launches_table(launches: &[Launch]) -> Table {
    let mut table = base_table(&["Flight", "Name", "Date (UTC)", "Rocket", "Launchpad", "Outcome"]);
    for launch in launches {
        table.add_row(vec![
            Cell::new(launch.flight_number),
            Cell::new(truncate(&launch.name, 40)),
            Cell::new(&launch.date_utc),
            Cell::new(&launch.rocket),
            Cell::new(&launch.launchpad),
            Cell::new(launch.outcome()),
        ]);
    }
    table
}

/// Formats rockets as a table, one row per rocket
pub fn rockets_table(rockets: &[Rocket]) -> Table {
    let mut table = base_table(&[
        "Name",
        "Type",
        "Active",
        "Stages",
        "Cost/Launch",
        "Success %",
        "Country",
    ]);
    for rocket in rockets {
        table.add_row(vec![
            Cell::new(&rocket.name),
            Cell::new(&rocket.rocket_type),
            Cell::new(if rocket.active { "yes" } else { "no" }),
            Cell::new(rocket.stages),
            Cell::new(format!("${}", rocket.cost_per_launch)),
            Cell::new(rocket.success_rate_pct),
            Cell::new(&rocket.country),
        ]);
    }
    table
}

/// Formats launchpads as a table, one row per pad
pub fn launchpads_table(launchpads: &[Launchpad]) -> Table {
    let mut table = base_table(&[
        "Name",
        "Full name",
        "Status",
        "Locality",
        "Region",
        "Attempts",
        "Successes",
    ]);
    for pad in launchpads {
        table.add_row(vec![
            Cell::new(&pad.name),
            Cell::new(truncate(&pad.full_name, 48)),
            Cell::new(&pad.status),
            Cell::new(&pad.locality),
            Cell::new(&pad.region),
            Cell::new(pad.launch_attempts),
            Cell::new(pad.launch_successes),
        ]);
    }
    table
}

/// Formats a full statistics report as a sequence of rendered tables
pub fn stats_tables(report: &StatsReport) -> String {
    let mut totals = base_table(&["Total", "Successful", "Failed", "Upcoming", "Success rate"]);
    totals.add_row(vec![
        Cell::new(report.totals.total),
        Cell::new(report.totals.successful),
        Cell::new(report.totals.failed),
        Cell::new(report.totals.upcoming),
        Cell::new(format!("{:.1}%", report.totals.success_rate)),
    ]);

    let mut by_rocket = base_table(&["Rocket", "Launches", "Successful", "Success rate"]);
    for (name, record) in &report.by_rocket {
        by_rocket.add_row(vec![
            Cell::new(name),
            Cell::new(record.total),
            Cell::new(record.successful),
            Cell::new(format!("{:.1}%", record.success_rate)),
        ]);
    }

    let mut by_site = base_table(&["Launch site", "Launches"]);
    for (name, count) in &report.by_site {
        by_site.add_row(vec![Cell::new(name), Cell::new(count)]);
    }

    let mut yearly = base_table(&["Year", "Launches"]);
    for (year, count) in &report.frequency.yearly {
        yearly.add_row(vec![Cell::new(year), Cell::new(count)]);
    }

    format!(
        "Launch totals\n{totals}\n\nBy rocket\n{by_rocket}\n\nBy launch site\n{by_site}\n\nBy year\n{yearly}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;
    use crate::stats::stats_report;
    use serde_json::json;

    fn launch(name: &str) -> Launch {
        let raw: RawRecord = json!({
            "id": name,
            "flight_number": 42,
            "name": name,
            "date_utc": "2020-05-30T19:22:00.000Z",
            "date_unix": 1590866520,
            "date_local": "2020-05-30T15:22:00-04:00",
            "date_precision": "hour",
            "rocket": "falcon9",
            "launchpad": "ksc",
            "success": true,
            "upcoming": false
        })
        .as_object()
        .expect("object")
        .clone();
        Launch::from_raw(&raw).expect("fixture should project")
    }

    #[test]
    fn test_launches_table_contains_row_values() {
        let rendered = launches_table(&[launch("Demo-2")]).to_string();
        assert!(rendered.contains("Demo-2"));
        assert!(rendered.contains("42"));
        assert!(rendered.contains("success"));
        assert!(rendered.contains("Flight"));
    }

    #[test]
    fn test_empty_launches_table_still_has_header() {
        let rendered = launches_table(&[]).to_string();
        assert!(rendered.contains("Flight"));
        assert!(rendered.contains("Outcome"));
    }

    #[test]
    fn test_truncate_long_names() {
        let long = "x".repeat(100);
        let short = truncate(&long, 10);
        assert!(short.chars().count() <= 10);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_stats_tables_render_all_sections() {
        let report = stats_report(&[launch("Demo-2")], &[], &[]);
        let rendered = stats_tables(&report);
        assert!(rendered.contains("Launch totals"));
        assert!(rendered.contains("By rocket"));
        assert!(rendered.contains("By launch site"));
        assert!(rendered.contains("By year"));
        assert!(rendered.contains("100.0%"));
    }
}
