//! Aggregation engine
//!
//! Reduces a record collection to summary statistics and a chart series of
//! bounded size. Small collections plot one point per rated record; larger
//! ones are cut into contiguous, order-preserving buckets of
//! [`BUCKET_THRESHOLD`] records each, so the same input always yields the
//! same series.

use crate::feedback::Feedback;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Rated-record count above which the series is bucketed
pub const BUCKET_THRESHOLD: usize = 100;

/// Average rating, or an explicit "no data" when nothing is rated
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AverageRating {
    NoData,
    Value(f64),
}

impl AverageRating {
    pub fn value(self) -> Option<f64> {
        match self {
            AverageRating::NoData => None,
            AverageRating::Value(v) => Some(v),
        }
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageRating::NoData => f.write_str("—"),
            AverageRating::Value(v) => write!(f, "{:.1}", v),
        }
    }
}

/// Summary over the rated records (never over bucket values)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub count: usize,
    pub average_rating: AverageRating,
}

/// One plotted unit: a single record or a bucket of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMode {
    Raw,
    Bucketed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub stats: Stats,
    pub series: Vec<SeriesPoint>,
    pub mode: SeriesMode,
}

/// Compute stats and the chart series for a record collection
pub fn aggregate(records: &[Feedback]) -> Aggregation {
    // Keep the original position: unnamed users are labelled by it
    let rated: Vec<(usize, &Feedback, u8)> = records
        .iter()
        .enumerate()
        .filter_map(|(pos, r)| r.rating.map(|rating| (pos, r, rating.value())))
        .collect();

    let stats = summarize(rated.iter().map(|(_, _, rating)| *rating));

    let (series, mode) = if rated.len() <= BUCKET_THRESHOLD {
        let points: Vec<SeriesPoint> = rated
            .iter()
            .map(|(pos, record, rating)| SeriesPoint {
                label: record.display_name(*pos),
                value: f64::from(*rating),
                detail: record.display_message().to_string(),
            })
            .collect();
        (points, SeriesMode::Raw)
    } else {
        let points: Vec<SeriesPoint> = rated
            .chunks(BUCKET_THRESHOLD)
            .enumerate()
            .map(|(chunk_idx, chunk)| {
                let sum: u64 = chunk.iter().map(|(_, _, rating)| u64::from(*rating)).sum();
                let mean = sum as f64 / chunk.len() as f64;
                SeriesPoint {
                    label: format!("Group {}", chunk_idx + 1),
                    value: round2(mean),
                    detail: format!("Average of {} ratings", chunk.len()),
                }
            })
            .collect();
        (points, SeriesMode::Bucketed)
    };

    debug!(
        "Aggregated {} records: {} rated, {} series points ({:?})",
        records.len(),
        stats.count,
        series.len(),
        mode
    );

    Aggregation {
        stats,
        series,
        mode,
    }
}

/// Count and exact average of a rating stream
pub fn summarize(ratings: impl Iterator<Item = u8>) -> Stats {
    let (count, sum) = ratings.fold((0usize, 0u64), |(count, sum), rating| {
        (count + 1, sum + u64::from(rating))
    });

    let average_rating = if count == 0 {
        AverageRating::NoData
    } else {
        AverageRating::Value(sum as f64 / count as f64)
    };

    Stats {
        count,
        average_rating,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Rating;

    fn rated(value: u8) -> Feedback {
        Feedback::default().with_rating(Rating::new(value).unwrap())
    }

    fn unrated() -> Feedback {
        Feedback::default()
    }

    #[test]
    fn mixed_scenario_skips_unrated() {
        let records = vec![rated(5), rated(3), unrated()];
        let agg = aggregate(&records);

        assert_eq!(agg.stats.count, 2);
        assert_eq!(agg.stats.average_rating, AverageRating::Value(4.0));
        assert_eq!(agg.stats.average_rating.to_string(), "4.0");
        assert_eq!(agg.series.len(), 2);
        assert_eq!(agg.mode, SeriesMode::Raw);
    }

    #[test]
    fn raw_points_use_placeholders_and_original_positions() {
        let records = vec![
            unrated(),
            rated(4).with_name("Ada").with_message("Love it"),
            rated(2),
        ];
        let agg = aggregate(&records);

        assert_eq!(agg.series[0].label, "Ada");
        assert_eq!(agg.series[0].detail, "Love it");
        assert_eq!(agg.series[1].label, "User 3");
        assert_eq!(agg.series[1].detail, "No message provided");
        assert_eq!(agg.series[1].value, 2.0);
    }

    #[test]
    fn empty_input_has_no_average() {
        let agg = aggregate(&[]);
        assert_eq!(agg.stats.count, 0);
        assert_eq!(agg.stats.average_rating, AverageRating::NoData);
        assert_eq!(agg.stats.average_rating.to_string(), "—");
        assert!(agg.series.is_empty());

        let agg = aggregate(&[unrated(), unrated()]);
        assert_eq!(agg.stats.count, 0);
        assert!(agg.stats.average_rating.value().is_none());
    }

    #[test]
    fn exactly_threshold_stays_raw() {
        let records: Vec<_> = (0..BUCKET_THRESHOLD).map(|i| rated((i % 6) as u8)).collect();
        let agg = aggregate(&records);
        assert_eq!(agg.mode, SeriesMode::Raw);
        assert_eq!(agg.series.len(), BUCKET_THRESHOLD);
    }

    #[test]
    fn uniform_bucketing_scenario() {
        let records: Vec<_> = (0..250).map(|_| rated(3)).collect();
        let agg = aggregate(&records);

        assert_eq!(agg.mode, SeriesMode::Bucketed);
        assert_eq!(agg.series.len(), 3);
        for point in &agg.series {
            assert_eq!(point.value, 3.00);
        }
        assert_eq!(agg.series[0].label, "Group 1");
        assert_eq!(agg.series[0].detail, "Average of 100 ratings");
        assert_eq!(agg.series[2].label, "Group 3");
        assert_eq!(agg.series[2].detail, "Average of 50 ratings");
    }

    #[test]
    fn bucket_count_is_ceiling_of_rated_count() {
        for n in [101usize, 199, 200, 201, 999, 1000, 1001] {
            let records: Vec<_> = (0..n).map(|i| rated((i % 6) as u8)).collect();
            let agg = aggregate(&records);
            assert_eq!(agg.series.len(), n.div_ceil(BUCKET_THRESHOLD), "n = {}", n);
            assert_eq!(agg.stats.count, n);
        }
    }

    #[test]
    fn unrated_records_do_not_count_towards_bucketing() {
        let mut records: Vec<_> = (0..100).map(|_| rated(4)).collect();
        records.extend((0..50).map(|_| unrated()));
        let agg = aggregate(&records);
        assert_eq!(agg.mode, SeriesMode::Raw);
        assert_eq!(agg.series.len(), 100);
    }

    #[test]
    fn bucket_sums_approximate_total() {
        let records: Vec<_> = (0..537).map(|i| rated(((i * 7) % 6) as u8)).collect();
        let total: f64 = records
            .iter()
            .filter_map(|r| r.rating)
            .map(|r| f64::from(r.value()))
            .sum();

        let agg = aggregate(&records);
        let reconstructed: f64 = agg
            .series
            .iter()
            .map(|p| {
                let size: f64 = p
                    .detail
                    .trim_start_matches("Average of ")
                    .trim_end_matches(" ratings")
                    .parse()
                    .unwrap();
                p.value * size
            })
            .sum();

        // Each bucket mean is rounded to 0.005 at most
        let tolerance = 0.005 * BUCKET_THRESHOLD as f64 * agg.series.len() as f64;
        assert!((reconstructed - total).abs() <= tolerance);
    }

    #[test]
    fn stats_are_exact_despite_bucketing() {
        // 101 fives and 100 zeros: bucket rounding must not leak into the average
        let mut records: Vec<_> = (0..101).map(|_| rated(5)).collect();
        records.extend((0..100).map(|_| rated(0)));
        let agg = aggregate(&records);
        let expected = 505.0 / 201.0;
        assert_eq!(agg.stats.average_rating, AverageRating::Value(expected));
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records: Vec<_> = (0..345)
            .map(|i| rated(((i * 13) % 6) as u8).with_name(format!("u{}", i)))
            .collect();
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn bucket_values_round_to_two_places() {
        // First bucket: 99 fives + one four = 4.99; second: one five
        let mut records: Vec<_> = (0..99).map(|_| rated(5)).collect();
        records.push(rated(4));
        records.push(rated(5));
        records.insert(0, rated(4));
        // Now bucket 1 is [4, 5 x 99] = 499/100, bucket 2 is [4, 5]
        let agg = aggregate(&records);
        assert_eq!(agg.series[0].value, 4.99);
        assert_eq!(agg.series[1].value, 4.5);
    }
}
