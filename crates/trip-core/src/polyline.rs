//! Encoded polyline codec (precision 5) used by the routing service.
//!
//! The wire format stores `[lat, lon]` pairs; everything returned here is
//! already swapped to longitude-first [`Coordinate`]s.

use crate::error::TripError;
use crate::models::{Coordinate, Path};

const PRECISION: f64 = 1e5;
/// Upper bound on points handed to the persistence collaborator per path.
pub const MAX_ENCODED_POINTS: usize = 300;

/// Decode an encoded polyline into longitude-first coordinates.
pub fn decode(encoded: &str) -> Result<Path, TripError> {
    let bytes = encoded.as_bytes();
    let mut index = 0usize;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut path = Vec::new();

    while index < bytes.len() {
        lat = accumulate(lat, next_value(bytes, &mut index)?)?;
        lon = accumulate(lon, next_value(bytes, &mut index)?)?;
        path.push(Coordinate::new(lon as f64 / PRECISION, lat as f64 / PRECISION));
    }

    Ok(path)
}

fn accumulate(total: i64, delta: i64) -> Result<i64, TripError> {
    total
        .checked_add(delta)
        .ok_or_else(|| TripError::upstream("malformed polyline geometry"))
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, TripError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| TripError::upstream("truncated polyline geometry"))?;
        *index += 1;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(TripError::upstream("malformed polyline geometry"));
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

/// Encode longitude-first coordinates as a polyline string.
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;
    for coord in path {
        let lat = (coord.lat * PRECISION).round() as i64;
        let lon = (coord.lon * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }
    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut num = if value < 0 { !(value << 1) } else { value << 1 };
    while num >= 0x20 {
        out.push((((num & 0x1f) | 0x20) as u8 + 63) as char);
        num >>= 5;
    }
    out.push((num as u8 + 63) as char);
}

/// Keep at most `max_points`, always retaining the first and last point.
pub fn thin(path: &[Coordinate], max_points: usize) -> Path {
    if max_points < 2 || path.len() <= max_points {
        return path.to_vec();
    }
    let step = (path.len() - 1) as f64 / (max_points - 1) as f64;
    (0..max_points)
        .map(|i| {
            let index = if i == max_points - 1 {
                path.len() - 1
            } else {
                (i as f64 * step).floor() as usize
            };
            path[index]
        })
        .collect()
}

/// Thin and encode a path for storage.
pub fn encode_path(path: &[Coordinate]) -> String {
    encode(&thin(path, MAX_ENCODED_POINTS))
}

pub fn encode_path_days(path_days: &[Path]) -> Vec<String> {
    path_days.iter().map(|day| encode_path(day)).collect()
}
