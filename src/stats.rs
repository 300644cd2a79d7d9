/// Summary statistics over a set of samples. `std_dev` is the population
/// form (divisor N), matching `STDDEV_POP` on the datastore side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: i64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Computes count, mean, extremes, and population standard deviation in one
/// pass plus a deviation pass. Returns `None` for an empty slice; a summary
/// full of zeros would be indistinguishable from real data.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in values {
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    let avg = sum / count as f64;

    let squared_deviation: f64 = values
        .iter()
        .map(|value| {
            let delta = value - avg;
            delta * delta
        })
        .sum();
    let std_dev = (squared_deviation / count as f64).sqrt();

    Some(Summary {
        count: count as i64,
        avg,
        min,
        max,
        std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let summary = summarize(&[42.5]).expect("summary");
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg, 42.5);
        assert_eq!(summary.min, 42.5);
        assert_eq!(summary.max, 42.5);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn population_std_dev_uses_divisor_n() {
        let summary = summarize(&[10.0, 20.0, 30.0]).expect("summary");
        assert_eq!(summary.count, 3);
        assert_eq!(summary.avg, 20.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 30.0);
        // sqrt(200/3), the population value; the sample form would be 10.0.
        assert!((summary.std_dev - 8.164965809277260).abs() < 1e-12);
        assert!((summary.std_dev - 10.0).abs() > 1.0);
    }

    #[test]
    fn extremes_track_unordered_input() {
        let summary = summarize(&[3.5, -7.25, 12.0, 0.0]).expect("summary");
        assert_eq!(summary.min, -7.25);
        assert_eq!(summary.max, 12.0);
        assert_eq!(summary.count, 4);
        assert!((summary.avg - 2.0625).abs() < 1e-12);
    }

    #[test]
    fn identical_samples_have_zero_std_dev() {
        let summary = summarize(&[5.0; 16]).expect("summary");
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.avg, 5.0);
    }
}
