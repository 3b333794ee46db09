//! Series post-processing: timestamp joins and unit conversion.
//!
//! Pure functions, no failure modes.

use std::collections::HashMap;

use crate::metric::{PairedSample, Sample};
use crate::types::Timestamp;

/// Bytes in one megabyte (binary).
pub const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Value used for a primary point that has no secondary point with the same
/// timestamp. Indistinguishable from a genuine zero reading.
pub const MISSING_SECONDARY: f64 = 0.0;

/// Join `secondary` onto `primary` by exact timestamp equality.
///
/// Left-outer on `primary`: the output has one entry per primary sample, in
/// primary order. Unmatched entries get [`MISSING_SECONDARY`]. If
/// `secondary` repeats a timestamp, the first occurrence wins.
pub fn combine(primary: &[Sample], secondary: &[Sample]) -> Vec<PairedSample> {
    let mut by_time: HashMap<Timestamp, f64> = HashMap::with_capacity(secondary.len());
    for s in secondary {
        by_time.entry(s.time).or_insert(s.value);
    }

    primary
        .iter()
        .map(|p| PairedSample {
            time: p.time,
            primary: p.value,
            secondary: by_time.get(&p.time).copied().unwrap_or(MISSING_SECONDARY),
        })
        .collect()
}

/// Convert a byte count to megabytes, rounded to two decimals, as text.
///
/// Ties round away from zero (`0.125` becomes `"0.13"`); `{:.2}` alone would
/// round them to even.
pub fn bytes_to_megabytes(bytes: f64) -> String {
    let hundredths = (bytes / BYTES_PER_MEGABYTE * 100.0).round();
    format!("{:.2}", hundredths / 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> Timestamp {
        chrono::DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn series(points: &[(i64, f64)]) -> Vec<Sample> {
        points.iter().map(|&(t, v)| Sample::new(at(t), v)).collect()
    }

    #[test]
    fn unmatched_primary_gets_zero_secondary() {
        let read = series(&[(1, 5.0)]);
        let out = combine(&read, &[]);
        assert_eq!(
            out,
            vec![PairedSample {
                time: at(1),
                primary: 5.0,
                secondary: 0.0
            }]
        );
    }

    #[test]
    fn joins_on_exact_timestamp_regardless_of_order() {
        let read = series(&[(60, 1.0), (120, 2.0), (180, 3.0)]);
        let write = series(&[(180, 30.0), (60, 10.0)]);
        let out = combine(&read, &write);

        let secondaries: Vec<f64> = out.iter().map(|p| p.secondary).collect();
        assert_eq!(secondaries, [10.0, 0.0, 30.0]);
        let times: Vec<Timestamp> = out.iter().map(|p| p.time).collect();
        assert_eq!(times, [at(60), at(120), at(180)]);
    }

    #[test]
    fn output_length_follows_primary() {
        let read = series(&[(1, 1.0)]);
        let write = series(&[(1, 2.0), (2, 3.0), (3, 4.0)]);
        assert_eq!(combine(&read, &write).len(), 1);
        assert!(combine(&[], &write).is_empty());
    }

    #[test]
    fn no_tolerance_window() {
        let read = series(&[(60, 1.0)]);
        let write = series(&[(61, 9.0)]);
        assert_eq!(combine(&read, &write)[0].secondary, 0.0);
    }

    #[test]
    fn duplicate_secondary_timestamp_keeps_first() {
        let read = series(&[(5, 1.0)]);
        let write = series(&[(5, 7.0), (5, 8.0)]);
        assert_eq!(combine(&read, &write)[0].secondary, 7.0);
    }

    #[test]
    fn megabytes_rounded_to_two_decimals() {
        assert_eq!(bytes_to_megabytes(1_572_864.0), "1.50");
        assert_eq!(bytes_to_megabytes(0.0), "0.00");
        assert_eq!(bytes_to_megabytes(10_000.0), "0.01");
        assert_eq!(bytes_to_megabytes(123_456_789.0), "117.74");
    }

    #[test]
    fn megabyte_ties_round_up() {
        assert_eq!(bytes_to_megabytes(131_072.0), "0.13");
        assert_eq!(bytes_to_megabytes(393_216.0), "0.38");
        assert_eq!(bytes_to_megabytes(655_360.0), "0.63");
    }
}
