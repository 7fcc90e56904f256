//! Infill point generation along a path segment.
//!
//! Callers asking for a dense elevation profile supply segment endpoints;
//! this module synthesises the evenly spaced intermediate coordinates
//! between them.

use crate::location::Location;

/// Distance between consecutive infill points in metres, matching the
/// sample spacing of the index.
pub const INFILL_SPACING_METRES: f64 = 50.0;

/// Generate the points of one segment at 50 m spacing.
///
/// Emits `start` first iff `include_start` is true, then the intermediate
/// points in order, then `end`. A segment no longer than the spacing
/// produces no intermediates.
///
/// When chaining the segments of a polyline, pass `include_start = true`
/// only for the first segment: every later segment starts where the
/// previous one ended, so concatenating the results stays duplicate-free.
///
/// Intermediates are positioned from the fixed start point
/// (`start + k * step`) rather than from the previous intermediate, so
/// floating-point error stays bounded on long segments. Coordinates are
/// rounded to the nearest metre; elevations are left unset.
pub fn infill_points(start: &Location, end: &Location, include_start: bool) -> Vec<Location> {
    let mut points = Vec::new();
    if include_start {
        points.push(Location::new(start.easting, start.northing));
    }

    let delta_e = f64::from(end.easting) - f64::from(start.easting);
    let delta_n = f64::from(end.northing) - f64::from(start.northing);
    let dist = (delta_e * delta_e + delta_n * delta_n).sqrt();

    if dist > INFILL_SPACING_METRES {
        let steps = dist / INFILL_SPACING_METRES;
        let intermediates = steps.ceil() as u32 - 1;
        let step_e = delta_e / steps;
        let step_n = delta_n / steps;

        for k in 1..=intermediates {
            let e = f64::from(start.easting) + step_e * f64::from(k);
            let n = f64::from(start.northing) + step_n * f64::from(k);
            points.push(Location::new(e.round() as u32, n.round() as u32));
        }
    }

    points.push(Location::new(end.easting, end.northing));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: &[Location]) -> Vec<(u32, u32)> {
        points.iter().map(|p| (p.easting, p.northing)).collect()
    }

    #[test]
    fn test_straight_segment_with_start() {
        let points = infill_points(&Location::new(0, 0), &Location::new(0, 200), true);
        assert_eq!(
            coords(&points),
            vec![(0, 0), (0, 50), (0, 100), (0, 150), (0, 200)]
        );
    }

    #[test]
    fn test_straight_segment_without_start() {
        let points = infill_points(&Location::new(0, 0), &Location::new(0, 200), false);
        assert_eq!(coords(&points), vec![(0, 50), (0, 100), (0, 150), (0, 200)]);
    }

    #[test]
    fn test_short_segment_has_no_intermediates() {
        let points = infill_points(&Location::new(0, 0), &Location::new(0, 30), true);
        assert_eq!(coords(&points), vec![(0, 0), (0, 30)]);

        let points = infill_points(&Location::new(0, 0), &Location::new(0, 30), false);
        assert_eq!(coords(&points), vec![(0, 30)]);
    }

    #[test]
    fn test_segment_of_exactly_one_spacing() {
        let points = infill_points(&Location::new(0, 0), &Location::new(50, 0), true);
        assert_eq!(coords(&points), vec![(0, 0), (50, 0)]);
    }

    #[test]
    fn test_diagonal_segment() {
        // 3-4-5 triangle: 500 m long, so 9 intermediates 50 m apart
        let points = infill_points(&Location::new(0, 0), &Location::new(300, 400), true);
        assert_eq!(points.len(), 11);
        assert_eq!(coords(&points)[1], (30, 40));
        assert_eq!(coords(&points)[10], (300, 400));

        for pair in points.windows(2) {
            let de = f64::from(pair[1].easting) - f64::from(pair[0].easting);
            let dn = f64::from(pair[1].northing) - f64::from(pair[0].northing);
            let d = (de * de + dn * dn).sqrt();
            assert!((d - 50.0).abs() < 1.5, "spacing {} out of tolerance", d);
        }
    }

    #[test]
    fn test_fractional_step_count() {
        // 120 m: ceil(2.4) - 1 = 2 intermediates, still 50 m apart
        let points = infill_points(&Location::new(0, 0), &Location::new(0, 120), true);
        assert_eq!(coords(&points), vec![(0, 0), (0, 50), (0, 100), (0, 120)]);
    }

    #[test]
    fn test_descending_coordinates() {
        let points = infill_points(&Location::new(0, 200), &Location::new(0, 0), true);
        assert_eq!(
            coords(&points),
            vec![(0, 200), (0, 150), (0, 100), (0, 50), (0, 0)]
        );
    }

    #[test]
    fn test_chaining_produces_no_duplicates() {
        let p1 = Location::new(0, 0);
        let p2 = Location::new(0, 150);
        let p3 = Location::new(150, 150);

        let mut polyline = infill_points(&p1, &p2, true);
        polyline.extend(infill_points(&p2, &p3, false));

        let coords = coords(&polyline);
        for pair in coords.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(
            coords
                .iter()
                .filter(|&&c| c == (p2.easting, p2.northing))
                .count(),
            1
        );
    }

    #[test]
    fn test_long_segment_does_not_drift() {
        // 1000 km due north: every intermediate must land exactly on the
        // 50 m lattice despite 20,000 accumulation steps
        let points = infill_points(&Location::new(0, 0), &Location::new(0, 1_000_000), true);
        assert_eq!(points.len(), 20_001);
        assert_eq!(points[1].northing, 50);
        assert_eq!(points[10_000].northing, 500_000);
        assert_eq!(points[19_999].northing, 999_950);
        assert_eq!(points[20_000].northing, 1_000_000);
    }

    #[test]
    fn test_elevation_left_unset() {
        let points = infill_points(&Location::new(0, 0), &Location::new(0, 200), true);
        assert!(points.iter().all(|p| p.elevation.is_none()));
    }
}
