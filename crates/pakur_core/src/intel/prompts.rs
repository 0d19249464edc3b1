use serde::Serialize;

use crate::config::DashboardConfig;
use crate::model::{Merchant, ServiceableZone};

pub(super) fn discovery_prompt(
    config: &DashboardConfig,
    query: &str,
    zones: &[ServiceableZone],
) -> String {
    let mut prompt = format!(
        "Perform a deep scan for real commercial entities in {city}, {region}. Find stores matching: {query}.\n\
         Include pharmacies, general stores, and bakeries.",
        city = config.city,
        region = config.region,
    );
    if !config.focus_areas.is_empty() {
        prompt.push_str(&format!(
            " Focus on {} areas.",
            join_with_and(&config.focus_areas)
        ));
    }
    if !zones.is_empty() {
        let names: Vec<String> = zones.iter().map(|zone| zone.name.clone()).collect();
        prompt.push_str(&format!(
            "\nOnly report places that lie inside these serviceable zones: {}.",
            names.join("; ")
        ));
    }
    prompt.push_str(
        "\nFor each, provide a brief strategic assessment for 15-minute delivery partnership.",
    );
    prompt
}

pub(super) fn logistics_prompt(config: &DashboardConfig, name: &str, address: &str) -> String {
    format!(
        "Calculate delivery feasibility for a quick commerce hub at {name}, {address}, {city}.\n\
         Estimate distance to the nearest residential hub, travel time in local {city} traffic, \
         and provide a 1-sentence logistics feasibility assessment.\n\
         Return JSON only.",
        city = config.city,
    )
}

#[derive(Serialize)]
struct RosterEntry<'a> {
    n: &'a str,
    l: &'a str,
}

pub(super) fn zone_prompt(
    config: &DashboardConfig,
    merchants: &[Merchant],
) -> Result<String, serde_json::Error> {
    let roster: Vec<RosterEntry<'_>> = merchants
        .iter()
        .map(|merchant| RosterEntry {
            n: &merchant.name,
            l: &merchant.address,
        })
        .collect();
    let roster = serde_json::to_string(&roster)?;
    Ok(format!(
        "Analyze the geographic spread of these shops in {city}: {roster}. \
         Suggest the top {count} optimal locations for micro-warehouses (dark stores) \
         to achieve 10-minute delivery coverage across the entire city.",
        city = config.city,
        count = config.max_zone_suggestions,
    ))
}

fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
