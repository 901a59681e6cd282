//! CSV export tests — BOM, header rows, quote escaping, column content.

mod common;

use common::*;
use std::collections::BTreeMap;

use vcadmin::handlers::export_handlers::{checks_csv, meetings_csv};
use vcadmin::models::meeting::{self, TechCheck};

#[test]
fn meetings_csv_starts_with_bom_and_header() {
    let m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    let csv = meetings_csv(&[&m]);

    assert!(csv.starts_with('\u{feff}'), "missing byte-order mark");
    let mut lines = csv.trim_start_matches('\u{feff}').lines();
    assert_eq!(
        lines.next().expect("header row"),
        "title,host_unit,chair_person,start,end,endpoint_count,status,invite_link,description"
    );
    let row = lines.next().expect("data row");
    assert!(row.contains("Weekly sync"));
    assert!(row.contains("Unit A"));
    assert!(row.contains("SCHEDULED"));
    assert!(row.contains(",1,"), "endpoint count column");
}

#[test]
fn fields_with_commas_and_quotes_are_escaped() {
    let mut m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    m.title = "Budget, the \"final\" round".to_string();

    let csv = meetings_csv(&[&m]);
    assert!(csv.contains("\"Budget, the \"\"final\"\" round\""));
}

#[test]
fn empty_meeting_set_is_header_only() {
    let csv = meetings_csv(&[]);
    let lines: Vec<&str> = csv.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(lines.len(), 1);
}

#[test]
fn checks_csv_lists_every_embedded_endpoint() {
    let m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    let mut checks = BTreeMap::new();
    checks.insert(
        "EP-1".to_string(),
        TechCheck {
            checked: true,
            notes: "Camera ok, mic \"fuzzy\"".to_string(),
        },
    );
    let (next, _) = meeting::save_tech_checks(&[m], "M1", checks).expect("checks failed");

    let csv = checks_csv(&next[0]);
    assert!(csv.starts_with('\u{feff}'));
    let mut lines = csv.trim_start_matches('\u{feff}').lines();
    assert_eq!(lines.next().expect("header"), "endpoint,location,checked,notes");
    let row = lines.next().expect("one endpoint row");
    assert!(row.starts_with("Bridge A,"));
    assert!(row.contains(",true,"));
    assert!(row.contains("\"Camera ok, mic \"\"fuzzy\"\"\""));
}

#[test]
fn unchecked_endpoints_default_to_false() {
    let m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    let csv = checks_csv(&m);
    let row = csv
        .trim_start_matches('\u{feff}')
        .lines()
        .nth(1)
        .expect("endpoint row");
    assert!(row.contains(",false,"));
}
