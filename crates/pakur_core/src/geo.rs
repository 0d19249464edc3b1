//! Small planar/spherical helpers over [`GeoPoint`].

use h3o::LatLng;

use crate::model::GeoPoint;

/// Great-circle distance in kilometres. Returns `None` for non-finite input.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> Option<f64> {
    let a = LatLng::new(a.lat, a.lng).ok()?;
    let b = LatLng::new(b.lat, b.lng).ok()?;
    Some(a.distance_km(b))
}

/// Even-odd ray cast. The ring is treated as implicitly closed; rings with
/// fewer than three vertices contain nothing.
pub fn point_in_polygon(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let cross_lng = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if point.lng < cross_lng {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Vertex average, good enough for label placement on small convex zones.
pub fn centroid(ring: &[GeoPoint]) -> Option<GeoPoint> {
    if ring.is_empty() {
        return None;
    }
    let count = ring.len() as f64;
    let (lat, lng) = ring
        .iter()
        .fold((0.0, 0.0), |(lat, lng), point| (lat + point.lat, lng + point.lng));
    Some(GeoPoint::new(lat / count, lng / count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ]
    }

    #[test]
    fn point_in_polygon_detects_inside_and_outside() {
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &square()));
        assert!(!point_in_polygon(GeoPoint::new(1.5, 0.5), &square()));
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        let ring = &square()[..2];
        assert!(!point_in_polygon(GeoPoint::new(0.0, 0.5), ring));
    }

    #[test]
    fn distance_between_nearby_points_is_small() {
        let km = distance_km(GeoPoint::new(24.6394, 87.8465), GeoPoint::new(24.6400, 87.8470))
            .expect("finite coordinates");
        assert!(km > 0.0 && km < 0.2, "unexpected distance {km}");
    }

    #[test]
    fn centroid_of_square_is_its_middle() {
        assert_eq!(centroid(&square()), Some(GeoPoint::new(0.5, 0.5)));
        assert_eq!(centroid(&[]), None);
    }
}
