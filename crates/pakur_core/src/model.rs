//! Records shared by the seed store, the intel clients and the dashboard.
//!
//! Field names serialize in camelCase so the same types round-trip through
//! model responses and exported partner files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of merchant categories carried by the seed roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MerchantCategory {
    Grocery,
    Pharmacy,
    Electronics,
    Bakery,
    #[serde(rename = "General Store")]
    GeneralStore,
    Dairy,
}

impl MerchantCategory {
    pub fn label(self) -> &'static str {
        match self {
            MerchantCategory::Grocery => "Grocery",
            MerchantCategory::Pharmacy => "Pharmacy",
            MerchantCategory::Electronics => "Electronics",
            MerchantCategory::Bakery => "Bakery",
            MerchantCategory::GeneralStore => "General Store",
            MerchantCategory::Dairy => "Dairy",
        }
    }
}

impl fmt::Display for MerchantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse demand estimate attached to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for DemandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DemandTier::High => "High",
            DemandTier::Medium => "Medium",
            DemandTier::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Delivery viability tier returned by the logistics client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feasibility {
    High,
    Medium,
    Low,
}

impl Feasibility {
    pub const ALL: [Feasibility; 3] = [Feasibility::High, Feasibility::Medium, Feasibility::Low];

    pub fn label(self) -> &'static str {
        match self {
            Feasibility::High => "High",
            Feasibility::Medium => "Medium",
            Feasibility::Low => "Low",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A known, already-listed commercial partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: String,
    pub name: String,
    pub category: MerchantCategory,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub zone_id: String,
    pub is_collaborated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

impl Merchant {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_collaborated {
            "Collaborated"
        } else {
            "Target Partner"
        }
    }
}

/// Named delivery-coverage polygon. The ring is closed implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceableZone {
    pub id: String,
    pub name: String,
    pub description: String,
    pub estimated_demand: DemandTier,
    /// Minutes.
    pub avg_delivery_time: u32,
    pub coordinates: Vec<[f64; 2]>,
}

impl ServiceableZone {
    pub fn ring(&self) -> Vec<GeoPoint> {
        self.coordinates
            .iter()
            .map(|[lat, lng]| GeoPoint::new(*lat, *lng))
            .collect()
    }
}

/// Candidate partner surfaced by a discovery scan. Not vetted or onboarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredPartner {
    pub name: String,
    pub category: String,
    pub address: String,
    pub google_maps_uri: String,
    pub contact_potential: String,
    pub strategic_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Structured feasibility estimate for one partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub distance_km: f64,
    pub estimated_time_mins: f64,
    pub traffic_status: String,
    pub feasibility: Feasibility,
    pub notes: String,
}

impl RouteInfo {
    pub const FALLBACK_NOTES: &'static str = "Default logistics fallback due to API limit.";

    /// Record substituted whenever the logistics call fails.
    pub fn fallback() -> Self {
        Self {
            distance_km: 2.5,
            estimated_time_mins: 12.0,
            traffic_status: "Normal".to_string(),
            feasibility: Feasibility::Medium,
            notes: Self::FALLBACK_NOTES.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.notes == Self::FALLBACK_NOTES
    }
}

/// Micro-warehouse siting suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSuggestion {
    pub zone_name: String,
    pub rationale: String,
    pub radius_km: f64,
}

/// Borrowed view of whichever entity is currently selected.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum PartnerRef<'a> {
    Merchant(&'a Merchant),
    Discovered(&'a DiscoveredPartner),
}

impl<'a> PartnerRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            PartnerRef::Merchant(merchant) => &merchant.name,
            PartnerRef::Discovered(partner) => &partner.name,
        }
    }

    pub fn address(&self) -> &'a str {
        match self {
            PartnerRef::Merchant(merchant) => &merchant.address,
            PartnerRef::Discovered(partner) => &partner.address,
        }
    }

    /// External map link, if the entity carries a non-empty one.
    pub fn map_link(&self) -> Option<&'a str> {
        let link = match self {
            PartnerRef::Merchant(merchant) => merchant.map_url.as_deref(),
            PartnerRef::Discovered(partner) => Some(partner.google_maps_uri.as_str()),
        };
        link.filter(|value| !value.trim().is_empty())
    }
}
