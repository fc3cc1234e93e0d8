use crate::error::StrategyError;
use crate::rolling::RollingSeries;
use core_types::{Position, SignalSeries};
use std::cmp::Ordering;

/// Derives a position per period from a short and a long moving average.
///
/// - Either average undefined: `Flat`.
/// - Short above long: `Long`.
/// - Short below long: `Short`.
/// - Exactly equal: `Flat`. The previous position is not carried over.
pub fn crossover_signal(
    short_ma: &RollingSeries,
    long_ma: &RollingSeries,
) -> Result<SignalSeries, StrategyError> {
    if short_ma.len() != long_ma.len() {
        return Err(StrategyError::LengthMismatch {
            short: short_ma.len(),
            long: long_ma.len(),
        });
    }

    let positions = short_ma
        .values()
        .iter()
        .zip(long_ma.values())
        .map(|(short, long)| match (short, long) {
            (Some(short), Some(long)) => match short.partial_cmp(long) {
                Some(Ordering::Greater) => Position::Long,
                Some(Ordering::Less) => Position::Short,
                _ => Position::Flat,
            },
            _ => Position::Flat,
        })
        .collect::<Vec<_>>();

    tracing::trace!(
        periods = positions.len(),
        short_window = short_ma.window(),
        long_window = long_ma.window(),
        "Derived crossover signal"
    );

    Ok(SignalSeries::new(positions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolling::rolling_mean;

    #[test]
    fn undefined_averages_are_flat() {
        let closes = [1.0, 2.0, 3.0, 4.0];
        let short = rolling_mean(&closes, 1).unwrap();
        let long = rolling_mean(&closes, 3).unwrap();
        let signal = crossover_signal(&short, &long).unwrap();
        assert_eq!(signal.get(0), Some(Position::Flat));
        assert_eq!(signal.get(1), Some(Position::Flat));
        // Rising prices: the one-bar average leads the three-bar one.
        assert_eq!(signal.get(2), Some(Position::Long));
        assert_eq!(signal.get(3), Some(Position::Long));
    }

    #[test]
    fn falling_prices_go_short() {
        let closes = [10.0, 9.0, 8.0, 7.0, 6.0];
        let short = rolling_mean(&closes, 2).unwrap();
        let long = rolling_mean(&closes, 4).unwrap();
        let signal = crossover_signal(&short, &long).unwrap();
        assert_eq!(
            signal.as_slice(),
            &[Position::Flat, Position::Flat, Position::Flat, Position::Short, Position::Short]
        );
    }

    #[test]
    fn equal_averages_are_flat_not_held() {
        // Long positions first, then a flat stretch where both averages coincide.
        let closes = [1.0, 2.0, 3.0, 3.0, 3.0, 3.0];
        let short = rolling_mean(&closes, 1).unwrap();
        let long = rolling_mean(&closes, 3).unwrap();
        let signal = crossover_signal(&short, &long).unwrap();
        assert_eq!(signal.get(2), Some(Position::Long));
        assert_eq!(signal.get(3), Some(Position::Long));
        assert_eq!(signal.get(4), Some(Position::Flat));
        assert_eq!(signal.get(5), Some(Position::Flat));
    }

    #[test]
    fn plateau_after_decimal_prices_ends_flat() {
        let mut closes = vec![91.97, 100.41, 103.17, 97.73, 108.09, 94.56, 98.32];
        closes.extend([100.0; 6]);
        let short = rolling_mean(&closes, 1).unwrap();
        let long = rolling_mean(&closes, 5).unwrap();
        let signal = crossover_signal(&short, &long).unwrap();
        assert_eq!(signal.get(closes.len() - 2), Some(Position::Flat));
        assert_eq!(signal.last(), Position::Flat);
    }

    #[test]
    fn identical_windows_never_take_a_position() {
        let closes = [5.0, 7.0, 6.0, 9.0, 4.0];
        let a = rolling_mean(&closes, 2).unwrap();
        let b = rolling_mean(&closes, 2).unwrap();
        let signal = crossover_signal(&a, &b).unwrap();
        assert!(signal.iter().all(|p| p == Position::Flat));
    }

    #[test]
    fn swapped_windows_mirror_the_signal() {
        let closes = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let short = rolling_mean(&closes, 2).unwrap();
        let long = rolling_mean(&closes, 4).unwrap();
        let forward = crossover_signal(&short, &long).unwrap();
        let mirrored = crossover_signal(&long, &short).unwrap();
        for (f, m) in forward.iter().zip(mirrored.iter()) {
            assert_eq!(f.opposite(), m);
        }
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        let short = rolling_mean(&[1.0, 2.0, 3.0], 1).unwrap();
        let long = rolling_mean(&[1.0, 2.0], 1).unwrap();
        assert_eq!(
            crossover_signal(&short, &long),
            Err(StrategyError::LengthMismatch { short: 3, long: 2 })
        );
    }
}
