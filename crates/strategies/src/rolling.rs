use crate::error::StrategyError;

/// A trailing moving average aligned with its source series.
///
/// Index `i` is `None` until `window` observations are available, i.e. for every
/// `i < window - 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingSeries {
    window: usize,
    values: Vec<Option<f64>>,
}

impl RollingSeries {
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, or `None` if it is out of range or still warming up.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of leading undefined entries.
    pub fn warmup_len(&self) -> usize {
        self.values.iter().take_while(|v| v.is_none()).count()
    }
}

/// Computes the trailing simple moving average of `series` over `window` observations.
///
/// Every defined value is the mean of its own window, summed afresh, so a flat stretch
/// averages to exactly its own price.
///
/// A window longer than the series is legal and yields an all-undefined result.
pub fn rolling_mean(series: &[f64], window: usize) -> Result<RollingSeries, StrategyError> {
    if window == 0 {
        return Err(StrategyError::InvalidParameters(
            "Rolling window must be at least 1".to_string(),
        ));
    }

    let values = (0..series.len())
        .map(|i| {
            (i + 1 >= window).then(|| {
                let slice = &series[i + 1 - window..=i];
                slice.iter().sum::<f64>() / window as f64
            })
        })
        .collect();

    Ok(RollingSeries { window, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a defined value");
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn last_values_match_hand_computed_means() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_approx(rolling_mean(&closes, 2).unwrap().last(), 5.5);
        assert_approx(rolling_mean(&closes, 3).unwrap().last(), 5.0);
    }

    #[test]
    fn every_defined_value_is_the_window_mean() {
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        let sma = rolling_mean(&closes, 5).unwrap();
        assert_eq!(sma.len(), 7);
        assert_eq!(sma.window(), 5);
        for i in 0..4 {
            assert_eq!(sma.get(i), None, "expected undefined at index {i}");
        }
        assert_approx(sma.get(4), 12.0);
        assert_approx(sma.get(5), 13.0);
        assert_approx(sma.get(6), 14.0);
    }

    #[test]
    fn warmup_is_window_minus_one() {
        let closes: Vec<f64> = (1..=30).map(f64::from).collect();
        for window in 1..=30 {
            let sma = rolling_mean(&closes, window).unwrap();
            assert_eq!(sma.warmup_len(), window - 1, "window {window}");
        }
    }

    #[test]
    fn window_of_one_is_the_series() {
        let sma = rolling_mean(&[100.0, 200.0, 300.0], 1).unwrap();
        assert_eq!(sma.values(), &[Some(100.0), Some(200.0), Some(300.0)]);
    }

    #[test]
    fn window_longer_than_series_is_all_undefined() {
        let sma = rolling_mean(&[10.0, 11.0], 5).unwrap();
        assert_eq!(sma.len(), 2);
        assert!(sma.values().iter().all(Option::is_none));
        assert_eq!(sma.last(), None);
    }

    #[test]
    fn empty_series() {
        let sma = rolling_mean(&[], 3).unwrap();
        assert!(sma.is_empty());
    }

    #[test]
    fn plateau_after_decimal_prices_averages_exactly() {
        // Two-decimal prices leave rounding error in a running sum; each window mean must
        // start from scratch so the plateau averages to exactly 100.
        let mut closes = vec![91.97, 100.41, 103.17, 97.73, 108.09, 94.56, 98.32];
        closes.extend([100.0; 6]);
        let sma = rolling_mean(&closes, 5).unwrap();
        assert_eq!(sma.last(), Some(100.0));
        assert_eq!(sma.get(closes.len() - 2), Some(100.0));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            rolling_mean(&[1.0], 0),
            Err(StrategyError::InvalidParameters(_))
        ));
    }
}
