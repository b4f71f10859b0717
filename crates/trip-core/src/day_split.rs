//! Partition a route into contiguous day segments by cumulative distance.

use crate::models::{Coordinate, Path};
use crate::spatial::{distance_km, path_distance_km};

/// Split `path` into `num_days` contiguous segments of roughly equal length.
///
/// Consecutive segments share their boundary point. A segment is closed as soon
/// as its running distance reaches `total / num_days`; once `num_days - 1`
/// boundaries are cut, every remaining point goes to the final segment.
///
/// `num_days <= 1` or a zero-length path returns the path unchanged. When the
/// path runs out before every day gets its own stretch, the missing days are
/// the final two points of the path; callers check per-day distances afterwards.
pub fn split_by_days(path: &[Coordinate], num_days: usize) -> Vec<Path> {
    let total = path_distance_km(path);
    if num_days <= 1 || total == 0.0 {
        return vec![path.to_vec()];
    }

    let target_per_day = total / num_days as f64;
    let mut days: Vec<Path> = Vec::with_capacity(num_days);
    let mut day_start = 0usize;
    let mut acc = 0.0;

    for i in 1..path.len() {
        if days.len() >= num_days - 1 {
            break;
        }
        acc += distance_km(path[i - 1], path[i]);
        if acc >= target_per_day {
            days.push(path[day_start..=i].to_vec());
            day_start = i;
            acc = 0.0;
        }
    }

    let last = path.len() - 1;
    if day_start < last {
        days.push(path[day_start..].to_vec());
    }
    while days.len() < num_days {
        days.push(path[last - 1..].to_vec());
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::destination_point;

    /// Straight northbound path with `steps` legs of `step_km` each.
    fn meridian_path(steps: usize, step_km: f64) -> Path {
        let origin = Coordinate::new(35.0, 31.0);
        (0..=steps)
            .map(|i| destination_point(origin, step_km * i as f64, 0.0))
            .collect()
    }

    fn reconstruct(days: &[Path]) -> Path {
        let mut out: Path = Vec::new();
        for day in days {
            for point in day {
                if out.last() != Some(point) {
                    out.push(*point);
                }
            }
        }
        out
    }

    #[test]
    fn zero_or_one_day_returns_path_unchanged() {
        let path = meridian_path(10, 1.0);
        assert_eq!(split_by_days(&path, 0), vec![path.clone()]);
        assert_eq!(split_by_days(&path, 1), vec![path.clone()]);
    }

    #[test]
    fn zero_length_path_returns_path_unchanged() {
        let point = Coordinate::new(1.0, 1.0);
        let path = vec![point, point, point];
        assert_eq!(split_by_days(&path, 3), vec![path.clone()]);
    }

    #[test]
    fn split_produces_requested_segments_that_reconstruct_path() {
        let path = meridian_path(100, 1.3);
        for n in 2..=4 {
            let days = split_by_days(&path, n);
            assert_eq!(days.len(), n, "n = {n}");
            assert_eq!(reconstruct(&days), path, "n = {n}");
            for pair in days.windows(2) {
                assert_eq!(pair[0].last(), pair[1].first());
            }
        }
    }

    #[test]
    fn segments_are_balanced_by_distance() {
        let path = meridian_path(130, 1.0);
        let days = split_by_days(&path, 2);
        let d0 = path_distance_km(&days[0]);
        let d1 = path_distance_km(&days[1]);
        assert!((d0 - 65.0).abs() <= 1.01, "day 1 = {d0}");
        assert!((d1 - 65.0).abs() <= 1.01, "day 2 = {d1}");
    }

    #[test]
    fn short_path_degenerates_to_final_two_points() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.1);
        let days = split_by_days(&[a, b], 3);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0], vec![a, b]);
        assert_eq!(days[1], vec![a, b]);
        assert_eq!(days[2], vec![a, b]);
    }
}
