//! Retained shape list behind the map view.
//!
//! The view does not diff individual shapes: whenever the zones, merchants or
//! highlighted zone change, every tracked shape is dropped and the layer is
//! rebuilt from scratch. The renderer only walks [`MapLayers::shapes`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::geo::point_in_polygon;
use crate::model::{GeoPoint, Merchant, ServiceableZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const EMERALD: Rgb = Rgb::new(0x10, 0xb9, 0x81);
pub const BLUE: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
pub const AMBER: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

pub const MARKER_RADIUS_PX: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub color: Rgb,
    pub fill_opacity: f32,
    pub weight: f32,
}

impl PolygonStyle {
    pub fn zone(selected: bool) -> Self {
        if selected {
            Self {
                color: EMERALD,
                fill_opacity: 0.3,
                weight: 3.0,
            }
        } else {
            Self {
                color: BLUE,
                fill_opacity: 0.1,
                weight: 1.0,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub fill: Rgb,
    pub fill_opacity: f32,
    pub stroke: Rgb,
    pub weight: f32,
}

impl MarkerStyle {
    pub fn merchant(is_collaborated: bool) -> Self {
        Self {
            radius: MARKER_RADIUS_PX,
            fill: if is_collaborated { EMERALD } else { AMBER },
            fill_opacity: 0.8,
            stroke: WHITE,
            weight: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneShape {
    pub id: String,
    pub zone_id: String,
    pub ring: Vec<GeoPoint>,
    pub style: PolygonStyle,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub title: String,
    pub category: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MerchantMarker {
    pub id: String,
    pub merchant_id: String,
    pub position: GeoPoint,
    pub style: MarkerStyle,
    pub popup: MarkerPopup,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapShape {
    Zone(ZoneShape),
    Marker(MerchantMarker),
}

impl MapShape {
    pub fn id(&self) -> &str {
        match self {
            MapShape::Zone(zone) => &zone.id,
            MapShape::Marker(marker) => &marker.id,
        }
    }
}

/// Interaction the map reports back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    MerchantSelected(String),
}

/// Zones first, then markers, so markers paint on top.
#[derive(Debug, Default)]
pub struct MapLayers {
    shapes: Vec<MapShape>,
    signature: Option<u64>,
    redraws: usize,
}

impl MapLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the layer if any input changed since the last draw. Returns
    /// whether a redraw happened.
    pub fn sync(
        &mut self,
        zones: &[ServiceableZone],
        merchants: &[Merchant],
        selected_zone_id: Option<&str>,
    ) -> bool {
        let signature = input_signature(zones, merchants, selected_zone_id);
        if self.signature == Some(signature) {
            return false;
        }

        self.clear();
        self.shapes.extend(zones.iter().map(|zone| {
            let selected = selected_zone_id == Some(zone.id.as_str());
            MapShape::Zone(ZoneShape {
                id: format!("zone-{}", zone.id),
                zone_id: zone.id.clone(),
                ring: zone.ring(),
                style: PolygonStyle::zone(selected),
                tooltip: zone.name.clone(),
            })
        }));
        self.shapes.extend(merchants.iter().map(|merchant| {
            MapShape::Marker(MerchantMarker {
                id: format!("merchant-{}", merchant.id),
                merchant_id: merchant.id.clone(),
                position: merchant.position(),
                style: MarkerStyle::merchant(merchant.is_collaborated),
                popup: MarkerPopup {
                    title: merchant.name.clone(),
                    category: merchant.category.to_string(),
                    status: merchant.status_label().to_string(),
                },
            })
        }));
        self.signature = Some(signature);
        self.redraws += 1;
        debug!(shapes = self.shapes.len(), "map layer redrawn");
        true
    }

    /// Drops every tracked shape and forgets the last signature.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.signature = None;
    }

    pub fn shapes(&self) -> &[MapShape] {
        &self.shapes
    }

    pub fn shape_ids(&self) -> Vec<&str> {
        self.shapes.iter().map(MapShape::id).collect()
    }

    pub fn zones(&self) -> impl Iterator<Item = &ZoneShape> {
        self.shapes.iter().filter_map(|shape| match shape {
            MapShape::Zone(zone) => Some(zone),
            MapShape::Marker(_) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &MerchantMarker> {
        self.shapes.iter().filter_map(|shape| match shape {
            MapShape::Marker(marker) => Some(marker),
            MapShape::Zone(_) => None,
        })
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Topmost marker whose circle contains `click`. `project` maps a
    /// coordinate into the same pixel space as `click`.
    pub fn hit_test<F>(&self, click: (f32, f32), project: F) -> Option<MapEvent>
    where
        F: Fn(GeoPoint) -> (f32, f32),
    {
        self.markers()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .find(|marker| {
                let (x, y) = project(marker.position);
                let (dx, dy) = (click.0 - x, click.1 - y);
                dx * dx + dy * dy <= marker.style.radius * marker.style.radius
            })
            .map(|marker| MapEvent::MerchantSelected(marker.merchant_id.clone()))
    }

    /// Topmost zone containing `point`, for hover tooltips.
    pub fn zone_at(&self, point: GeoPoint) -> Option<&ZoneShape> {
        self.zones()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .find(|zone| point_in_polygon(point, &zone.ring))
    }
}

fn input_signature(
    zones: &[ServiceableZone],
    merchants: &[Merchant],
    selected_zone_id: Option<&str>,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    selected_zone_id.hash(&mut hasher);
    zones.len().hash(&mut hasher);
    for zone in zones {
        zone.id.hash(&mut hasher);
        zone.name.hash(&mut hasher);
        for [lat, lng] in &zone.coordinates {
            lat.to_bits().hash(&mut hasher);
            lng.to_bits().hash(&mut hasher);
        }
    }
    merchants.len().hash(&mut hasher);
    for merchant in merchants {
        merchant.id.hash(&mut hasher);
        merchant.name.hash(&mut hasher);
        merchant.category.hash(&mut hasher);
        merchant.is_collaborated.hash(&mut hasher);
        merchant.lat.to_bits().hash(&mut hasher);
        merchant.lng.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{initial_merchants, initial_zones};

    fn synced(selected: Option<&str>) -> MapLayers {
        let mut layers = MapLayers::new();
        layers.sync(&initial_zones(), &initial_merchants(), selected);
        layers
    }

    #[test]
    fn shapes_are_keyed_by_kind_and_id() {
        let layers = synced(None);
        assert_eq!(
            layers.shape_ids(),
            vec![
                "zone-zone-1",
                "zone-zone-2",
                "zone-zone-3",
                "merchant-m1",
                "merchant-m2",
                "merchant-m3",
                "merchant-m4",
            ]
        );
    }

    #[test]
    fn identical_inputs_do_not_redraw() {
        let zones = initial_zones();
        let merchants = initial_merchants();
        let mut layers = MapLayers::new();
        assert!(layers.sync(&zones, &merchants, Some("zone-1")));
        let first: Vec<String> = layers.shape_ids().into_iter().map(String::from).collect();

        assert!(!layers.sync(&zones, &merchants, Some("zone-1")));
        assert_eq!(layers.redraw_count(), 1);
        assert_eq!(layers.shape_ids(), first);
    }

    #[test]
    fn selection_change_redraws_without_duplicates() {
        let zones = initial_zones();
        let merchants = initial_merchants();
        let mut layers = MapLayers::new();
        layers.sync(&zones, &merchants, None);
        assert!(layers.sync(&zones, &merchants, Some("zone-2")));
        assert_eq!(layers.shapes().len(), zones.len() + merchants.len());
        assert_eq!(layers.redraw_count(), 2);
    }

    #[test]
    fn selected_zone_is_highlighted() {
        let layers = synced(Some("zone-2"));
        let styles: Vec<_> = layers.zones().map(|zone| (zone.zone_id.as_str(), zone.style)).collect();
        let (_, selected) = styles.iter().find(|(id, _)| *id == "zone-2").unwrap();
        let (_, other) = styles.iter().find(|(id, _)| *id == "zone-1").unwrap();
        assert_eq!(selected.color, EMERALD);
        assert_eq!(selected.weight, 3.0);
        assert_eq!(other.color, BLUE);
        assert_eq!(other.weight, 1.0);
        assert_ne!(selected, other);
    }

    #[test]
    fn marker_colour_follows_collaboration() {
        let layers = synced(None);
        for marker in layers.markers() {
            let merchant = initial_merchants()
                .into_iter()
                .find(|m| m.id == marker.merchant_id)
                .unwrap();
            let expected = if merchant.is_collaborated { EMERALD } else { AMBER };
            assert_eq!(marker.style.fill, expected);
            assert_eq!(marker.style.stroke, WHITE);
            assert_eq!(marker.popup.status, merchant.status_label());
        }
    }

    #[test]
    fn hit_test_selects_marker_under_click() {
        let layers = synced(None);
        let project = |point: GeoPoint| {
            (
                ((point.lng - 87.84) * 10_000.0) as f32,
                ((point.lat - 24.63) * 10_000.0) as f32,
            )
        };
        let m2 = initial_merchants().into_iter().find(|m| m.id == "m2").unwrap();
        let (x, y) = project(m2.position());

        assert_eq!(
            layers.hit_test((x + 3.0, y - 3.0), project),
            Some(MapEvent::MerchantSelected("m2".to_string()))
        );
        assert_eq!(layers.hit_test((x + 50.0, y + 50.0), project), None);
    }

    #[test]
    fn clear_forces_next_sync_to_redraw() {
        let zones = initial_zones();
        let merchants = initial_merchants();
        let mut layers = MapLayers::new();
        layers.sync(&zones, &merchants, None);
        layers.clear();
        assert!(layers.shapes().is_empty());
        assert!(layers.sync(&zones, &merchants, None));
    }
}
