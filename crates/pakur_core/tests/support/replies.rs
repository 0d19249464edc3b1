use pakur_core::intel::GenerateContentResponse;
use pakur_core::test_helpers::{grounded_response, text_response};

pub const ROUTE_JSON: &str = r#"{"distanceKm":1.9,"estimatedTimeMins":8,"trafficStatus":"Light","feasibility":"High","notes":"Inside the bazar loop."}"#;

pub fn route_reply() -> GenerateContentResponse {
    text_response(ROUTE_JSON)
}

pub fn discovery_reply() -> GenerateContentResponse {
    grounded_response(
        "Three strong candidates near the station.",
        &[
            ("Rail Colony Kirana", "https://maps.example/rail-colony-kirana"),
            ("Sadar Medical Hall", "https://maps.example/sadar-medical-hall"),
            ("New Market Sweets", "https://maps.example/new-market-sweets"),
        ],
    )
}

pub fn suggestions_reply() -> GenerateContentResponse {
    text_response(
        r#"[{"zoneName":"Station Road","rationale":"Covers the rail colony","radiusKm":1.5},
            {"zoneName":"Harindanga","rationale":"Bazar density","radiusKm":1.0}]"#,
    )
}
