use crate::model::{DiscoveredPartner, RouteInfo, ZoneSuggestion};

use super::error::IntelError;
use super::response::GenerateContentResponse;

pub(super) const DISCOVERED_CATEGORY: &str = "Daily Needs";
pub(super) const DISCOVERED_CONTACT_POTENTIAL: &str = "Check Google Business Profile linked below";
pub(super) const DISCOVERED_STRATEGIC_VALUE: &str =
    "Identified as a high-visibility commercial node.";

/// Turns every map-listing grounding chunk into a placeholder partner record.
pub(super) fn partners_from_grounding(
    response: &GenerateContentResponse,
    default_address: &str,
) -> Vec<DiscoveredPartner> {
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.maps.as_ref())
        .map(|maps| DiscoveredPartner {
            name: maps.title.clone().unwrap_or_default(),
            category: DISCOVERED_CATEGORY.to_string(),
            address: default_address.to_string(),
            google_maps_uri: maps.uri.clone().unwrap_or_default(),
            contact_potential: DISCOVERED_CONTACT_POTENTIAL.to_string(),
            strategic_value: DISCOVERED_STRATEGIC_VALUE.to_string(),
            phone: None,
            email: None,
        })
        .collect()
}

pub(super) fn parse_route_info(text: &str) -> Result<RouteInfo, IntelError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(IntelError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}

/// An absent body means "no suggestions", not a failure.
pub(super) fn parse_zone_suggestions(text: &str) -> Result<Vec<ZoneSuggestion>, IntelError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(body)?)
}

/// Schema-constrained replies are bare JSON, but some models still wrap them
/// in a markdown fence.
pub(super) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
