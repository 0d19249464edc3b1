//! Static roster the dashboard starts from. Nothing here is mutated at runtime.

use std::collections::HashSet;

use h3o::LatLng;

use crate::model::{DemandTier, GeoPoint, Merchant, MerchantCategory, ServiceableZone};

/// Pakur town center, used as the initial map viewport.
pub const PAKUR_CENTER: GeoPoint = GeoPoint::new(24.6394, 87.8465);

pub fn initial_zones() -> Vec<ServiceableZone> {
    vec![
        zone(
            "zone-1",
            "Pakur Main Market (Sadar)",
            "Core commercial zone including Harindanga Bazar and Main Road.",
            DemandTier::High,
            12,
            &[
                [24.6410, 87.8440],
                [24.6430, 87.8480],
                [24.6390, 87.8500],
                [24.6370, 87.8460],
            ],
        ),
        zone(
            "zone-2",
            "Railway Station Zone",
            "Area surrounding Pakur Railway Station and nearby colonies.",
            DemandTier::Medium,
            15,
            &[
                [24.6480, 87.8420],
                [24.6520, 87.8460],
                [24.6490, 87.8510],
                [24.6450, 87.8470],
            ],
        ),
        zone(
            "zone-3",
            "DC Office & Civil Lines",
            "Administrative area near Collectorate and Officers Colony.",
            DemandTier::Low,
            20,
            &[
                [24.6320, 87.8380],
                [24.6360, 87.8420],
                [24.6340, 87.8460],
                [24.6300, 87.8420],
            ],
        ),
    ]
}

pub fn initial_merchants() -> Vec<Merchant> {
    vec![
        merchant(
            "m1",
            "Harindanga Grocery Hub",
            MerchantCategory::Grocery,
            "Main Market, Harindanga Bazar",
            (24.6400, 87.8470),
            Some(4.5),
            Some("+91 98765 43210"),
            "zone-1",
            true,
        ),
        merchant(
            "m2",
            "LifeCare Medicos",
            MerchantCategory::Pharmacy,
            "Sadar Hospital Road",
            (24.6420, 87.8460),
            Some(4.8),
            Some("+91 98765 43211"),
            "zone-1",
            false,
        ),
        merchant(
            "m3",
            "Station Daily Store",
            MerchantCategory::GeneralStore,
            "Near Pakur Railway Station Exit",
            (24.6490, 87.8450),
            Some(4.2),
            Some("+91 98765 43212"),
            "zone-2",
            true,
        ),
        merchant(
            "m4",
            "Pakur Dairy & Bakery",
            MerchantCategory::Bakery,
            "Old DC Office Road",
            (24.6330, 87.8400),
            Some(4.4),
            None,
            "zone-3",
            true,
        ),
    ]
}

/// Reports roster problems that the renderer tolerates but an operator should
/// see: degenerate polygons, dangling zone references and invalid coordinates.
pub fn validate_seed(zones: &[ServiceableZone], merchants: &[Merchant]) -> Vec<String> {
    let mut warnings = Vec::new();
    let zone_ids: HashSet<&str> = zones.iter().map(|zone| zone.id.as_str()).collect();

    for zone in zones {
        if zone.coordinates.len() < 3 {
            warnings.push(format!(
                "Zone {}: polygon has {} point(s), at least 3 are needed to render",
                zone.id,
                zone.coordinates.len()
            ));
        }
        for [lat, lng] in &zone.coordinates {
            if !is_valid_coordinate(*lat, *lng) {
                warnings.push(format!(
                    "Zone {}: invalid vertex ({}, {})",
                    zone.id, lat, lng
                ));
            }
        }
    }

    for merchant in merchants {
        if !zone_ids.contains(merchant.zone_id.as_str()) {
            warnings.push(format!(
                "Merchant {}: references unknown zone {}",
                merchant.id, merchant.zone_id
            ));
        }
        if !is_valid_coordinate(merchant.lat, merchant.lng) {
            warnings.push(format!(
                "Merchant {}: invalid position ({}, {})",
                merchant.id, merchant.lat, merchant.lng
            ));
        }
    }

    warnings
}

fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    LatLng::new(lat, lng).is_ok() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

fn zone(
    id: &str,
    name: &str,
    description: &str,
    estimated_demand: DemandTier,
    avg_delivery_time: u32,
    coordinates: &[[f64; 2]],
) -> ServiceableZone {
    ServiceableZone {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        estimated_demand,
        avg_delivery_time,
        coordinates: coordinates.to_vec(),
    }
}

#[allow(clippy::too_many_arguments)]
fn merchant(
    id: &str,
    name: &str,
    category: MerchantCategory,
    address: &str,
    (lat, lng): (f64, f64),
    rating: Option<f64>,
    contact: Option<&str>,
    zone_id: &str,
    is_collaborated: bool,
) -> Merchant {
    Merchant {
        id: id.to_string(),
        name: name.to_string(),
        category,
        address: address.to_string(),
        lat,
        lng,
        rating,
        contact: contact.map(str::to_string),
        zone_id: zone_id.to_string(),
        is_collaborated,
        map_url: None,
    }
}
