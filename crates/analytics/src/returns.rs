use crate::error::AnalyticsError;
use core_types::SignalSeries;

/// Percentage change of each close over the previous one.
///
/// Index 0 has no prior period and is `None`. Every close that serves as a denominator
/// must be strictly positive.
pub fn period_returns(close: &[f64]) -> Result<Vec<Option<f64>>, AnalyticsError> {
    let mut returns = Vec::with_capacity(close.len());
    if close.is_empty() {
        return Ok(returns);
    }

    returns.push(None);
    for (i, pair) in close.windows(2).enumerate() {
        let (prev, curr) = (pair[0], pair[1]);
        // Also rejects NaN.
        if !(prev > 0.0) {
            return Err(AnalyticsError::InvalidPrice { index: i, price: prev });
        }
        returns.push(Some((curr - prev) / prev));
    }

    Ok(returns)
}

/// The return earned in each period by holding the previous period's signal.
///
/// Periods where either the position or the price change is undefined earn exactly 0.
pub fn strategy_returns(close: &[f64], signal: &SignalSeries) -> Result<Vec<f64>, AnalyticsError> {
    if close.len() != signal.len() {
        return Err(AnalyticsError::LengthMismatch {
            prices: close.len(),
            signals: signal.len(),
        });
    }

    let returns = period_returns(close)?;
    let strategy = returns
        .iter()
        .enumerate()
        .map(|(i, period_return)| {
            let position = i.checked_sub(1).and_then(|prev| signal.get(prev));
            match (position, period_return) {
                (Some(position), Some(r)) => f64::from(position.value()) * r,
                _ => 0.0,
            }
        })
        .collect();

    Ok(strategy)
}

/// Total fractional return of following `signal` over the whole `close` series.
///
/// Compounds `(1 + r)` over every period and subtracts one, so `0.0532` means +5.32%.
pub fn compound_return(close: &[f64], signal: &SignalSeries) -> Result<f64, AnalyticsError> {
    let strategy = strategy_returns(close, signal)?;
    let growth: f64 = strategy.iter().map(|r| 1.0 + r).product();
    tracing::trace!(periods = strategy.len(), growth, "Compounded strategy returns");
    Ok(growth - 1.0)
}
