mod support;

use chrono::{TimeZone, Utc};
use pakur_core::dashboard::DashboardState;
use pakur_core::export::{build_export, write_export, ExportError};
use pakur_core::intel::IntelJob;
use pakur_core::test_helpers::{grounded_response, ScriptedModel};

use support::replies::{discovery_reply, route_reply, suggestions_reply};
use support::{apply_reply, next_reply, scripted_worker};

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path).expect("export readable");
    serde_json::from_str(&contents).expect("export is json")
}

#[test]
fn merchant_export_without_route_has_null_logistics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = DashboardState::seeded();
    state.select_merchant("m1");

    let document = build_export(&state, "Pakur", Utc::now()).expect("document");
    let path = write_export(dir.path(), &document).expect("written");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("PakurFast_Partner_Harindanga_Grocery_Hub.json")
    );
    let json = read_json(&path);
    assert_eq!(json["partner"]["name"], "Harindanga Grocery Hub");
    assert_eq!(json["partner"]["zoneId"], "zone-1");
    assert_eq!(json["partner"]["isCollaborated"], true);
    assert!(json["logistics"].is_null());
    assert_eq!(json["city"], "Pakur");
}

#[test]
fn export_includes_route_estimate_when_present() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (mut worker, _model) = scripted_worker(ScriptedModel::with_replies([Ok(route_reply())]));
    let mut state = DashboardState::seeded();
    state.select_merchant("m4");
    worker.submit(IntelJob::Route(state.begin_route().expect("route starts")));
    apply_reply(&mut state, next_reply(&mut worker));

    let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let document = build_export(&state, "Pakur", now).expect("document");
    let path = write_export(dir.path(), &document).expect("written");

    let json = read_json(&path);
    assert_eq!(json["timestamp"], "2025-01-02T03:04:05.000Z");
    assert_eq!(json["logistics"]["distanceKm"], 1.9);
    assert_eq!(json["logistics"]["feasibility"], "High");
    assert!(path.ends_with("PakurFast_Partner_Pakur_Dairy_&_Bakery.json"));
}

#[test]
fn discovered_partner_exports_its_map_link() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (mut worker, _model) = scripted_worker(ScriptedModel::with_replies([
        Ok(discovery_reply()),
        Ok(suggestions_reply()),
    ]));
    let mut state = DashboardState::seeded();
    worker.submit(IntelJob::Scan(state.begin_scan("Kirana").expect("scan starts")));
    apply_reply(&mut state, next_reply(&mut worker));
    state.select_discovered(1);

    let document = build_export(&state, "Pakur", Utc::now()).expect("document");
    let json = read_json(&write_export(dir.path(), &document).expect("written"));

    assert_eq!(json["partner"]["name"], "Sadar Medical Hall");
    assert_eq!(
        json["partner"]["googleMapsUri"],
        "https://maps.example/sadar-medical-hall"
    );
    assert!(json["partner"].get("zoneId").is_none());
}

#[test]
fn discovered_name_with_slash_stays_inside_export_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (mut worker, _model) = scripted_worker(ScriptedModel::with_replies([
        Ok(grounded_response(
            "One pharmacy near the station.",
            &[("Kumar Medical / Pharmacy", "https://maps.example/kumar-medical")],
        )),
        Ok(suggestions_reply()),
    ]));
    let mut state = DashboardState::seeded();
    worker.submit(IntelJob::Scan(state.begin_scan("Pharmacy").expect("scan starts")));
    apply_reply(&mut state, next_reply(&mut worker));
    assert!(state.select_discovered(0));

    let document = build_export(&state, "Pakur", Utc::now()).expect("document");
    let path = write_export(dir.path(), &document).expect("written");

    assert_eq!(path.parent(), Some(dir.path()));
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("PakurFast_Partner_Kumar_Medical___Pharmacy.json")
    );
    assert_eq!(read_json(&path)["partner"]["name"], "Kumar Medical / Pharmacy");
}

#[test]
fn export_without_selection_is_refused() {
    let state = DashboardState::seeded();
    assert!(matches!(
        build_export(&state, "Pakur", Utc::now()),
        Err(ExportError::NothingSelected)
    ));
}

#[test]
fn export_dir_is_created_on_demand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("exports").join("partners");
    let mut state = DashboardState::seeded();
    state.select_merchant("m2");

    let document = build_export(&state, "Pakur", Utc::now()).expect("document");
    let path = write_export(&nested, &document).expect("written");
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}
