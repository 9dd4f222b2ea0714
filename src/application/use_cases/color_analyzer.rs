// ============================================================
// COLOR ANALYZER
// ============================================================
// Central tendency and dispersion over color frequencies.
// All statistics are computed over the per-color counts, not over
// the raw token sequence.

use crate::domain::color::{ColorAnalysis, FrequencyTable};
use crate::domain::error::{AppError, Result};

/// Color whose empirical probability is reported.
pub const PROBABILITY_COLOR: &str = "red";

/// Build the frequency table for `tokens` and derive its statistics.
///
/// Ties for mean color and most common color go to the color seen first.
pub fn analyze_colors<S: AsRef<str>>(tokens: &[S]) -> Result<ColorAnalysis> {
    if tokens.is_empty() {
        return Err(AppError::ValidationError(
            "Cannot analyze an empty color sequence".to_string(),
        ));
    }

    let frequencies = FrequencyTable::from_tokens(tokens);
    let distinct = frequencies.len() as f64;

    let mean_frequency = frequencies.total() as f64 / distinct;
    let mean_color = closest_to(&frequencies, mean_frequency);
    let most_common = most_common(&frequencies);

    let median_frequency = median(&frequencies);
    let median_colors = frequencies
        .iter()
        .filter(|(_, count)| *count as f64 == median_frequency)
        .map(|(color, _)| color.to_string())
        .collect();

    let variance = frequencies
        .counts()
        .map(|count| (count as f64 - mean_frequency).powi(2))
        .sum::<f64>()
        / distinct;

    let prob_red = frequencies
        .get(PROBABILITY_COLOR)
        .map(|count| count as f64 / tokens.len() as f64)
        .unwrap_or(0.0);

    Ok(ColorAnalysis {
        mean_color,
        most_common,
        median_colors,
        mean_frequency,
        median_frequency,
        variance,
        prob_red,
        frequencies,
    })
}

fn closest_to(frequencies: &FrequencyTable, target: f64) -> String {
    let mut best: Option<(&str, f64)> = None;
    for (color, count) in frequencies.iter() {
        let distance = (count as f64 - target).abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((color, distance));
        }
    }
    best.map(|(color, _)| color.to_string()).unwrap_or_default()
}

fn most_common(frequencies: &FrequencyTable) -> (String, u64) {
    let mut best: Option<(&str, u64)> = None;
    for (color, count) in frequencies.iter() {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((color, count));
        }
    }
    best.map(|(color, count)| (color.to_string(), count))
        .unwrap_or_default()
}

/// Median of the counts; the mean of the two middle counts when even.
fn median(frequencies: &FrequencyTable) -> f64 {
    let mut counts: Vec<u64> = frequencies.counts().collect();
    counts.sort_unstable();

    let n = counts.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        counts[n / 2] as f64
    } else {
        (counts[n / 2 - 1] + counts[n / 2]) as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::color_extractor::extract_colors;
    use std::path::PathBuf;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_red_red_blue() {
        let analysis = analyze_colors(&["red", "red", "blue"]).unwrap();

        assert_eq!(analysis.frequencies.get("red"), Some(2));
        assert_eq!(analysis.frequencies.get("blue"), Some(1));
        assert!((analysis.mean_frequency - 1.5).abs() < EPSILON);
        assert_eq!(analysis.most_common, ("red".to_string(), 2));
        assert!((analysis.median_frequency - 1.5).abs() < EPSILON);
        assert!(analysis.median_colors.is_empty());
        assert!((analysis.variance - 0.25).abs() < EPSILON);
        assert!((analysis.prob_red - 2.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_mean_color_tie_goes_to_first_seen() {
        // Mean is 2.0; "green" (1) and "blue" (3) are equally far from it.
        let analysis = analyze_colors(&["green", "blue", "blue", "blue"]).unwrap();
        assert_eq!(analysis.mean_color, "green");

        let analysis = analyze_colors(&["blue", "blue", "blue", "green"]).unwrap();
        assert_eq!(analysis.mean_color, "blue");
    }

    #[test]
    fn test_most_common_tie_goes_to_first_seen() {
        let analysis = analyze_colors(&["pink", "white", "white", "pink"]).unwrap();
        assert_eq!(analysis.most_common, ("pink".to_string(), 2));
    }

    #[test]
    fn test_odd_median_matches_all_tied_colors() {
        // Counts: a=1, b=2, c=2 -> median 2
        let analysis = analyze_colors(&["a", "b", "b", "c", "c"]).unwrap();
        assert_eq!(analysis.median_frequency, 2.0);
        assert_eq!(analysis.median_colors, vec!["b", "c"]);
    }

    #[test]
    fn test_prob_red_is_zero_when_absent() {
        let analysis = analyze_colors(&["blue", "green"]).unwrap();
        assert_eq!(analysis.prob_red, 0.0);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let tokens: Vec<String> = Vec::new();
        let err = analyze_colors(&tokens).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_table_total_matches_token_count() {
        let tokens = ["x", "y", "x", "", "z", "x", ""];
        let analysis = analyze_colors(&tokens).unwrap();
        assert_eq!(analysis.frequencies.total(), tokens.len() as u64);
    }

    #[test]
    fn test_fixture_statistics() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join("python_class_question.html");
        let tokens = extract_colors(&path).unwrap();
        let analysis = analyze_colors(&tokens).unwrap();

        assert_eq!(tokens.len(), 95);
        assert_eq!(analysis.frequencies.len(), 12);
        assert_eq!(analysis.mean_color, "orange");
        assert_eq!(analysis.most_common, ("blue".to_string(), 30));
        assert_eq!(analysis.median_frequency, 5.5);
        assert!(analysis.median_colors.is_empty());
        assert!((analysis.variance - 63.243_055_555_555_55).abs() < 1e-6);
        assert!((analysis.prob_red - 9.0 / 95.0).abs() < EPSILON);
    }
}
