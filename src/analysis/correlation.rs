//! Correlation between methods' intensity columns.
//!
//! Pearson measures linear correlation of the raw intensities, Spearman the
//! correlation of their ranks, and Kendall (tau-b) the balance of concordant
//! and discordant pairs with a tie correction. Undefined results (fewer than
//! two sentences, a constant column, a non-finite value) report `N/A`.

use crate::types::{CorrelationEntry, CorrelationKind, MetricValue, PairwiseMetric, ResultTable};

/// Decimal places of reported coefficients.
pub const CORRELATION_DECIMALS: u32 = 3;

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn usable(x: &[f64], y: &[f64]) -> bool {
    x.len() == y.len()
        && x.len() >= 2
        && x.iter().chain(y).all(|v| v.is_finite())
        && !is_constant(x)
        && !is_constant(y)
}

/// Pearson product-moment correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if !usable(x, y) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Spearman rank correlation (Pearson on average ranks).
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if !usable(x, y) {
        return None;
    }
    pearson(&ranks(x), &ranks(y))
}

/// Kendall tau-b.
pub fn kendall(x: &[f64], y: &[f64]) -> Option<f64> {
    if !usable(x, y) {
        return None;
    }

    let n = x.len();
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0u64;
    let mut ties_y = 0u64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[j] - x[i];
            let dy = y[j] - y[i];
            if dx == 0.0 {
                ties_x += 1;
            }
            if dy == 0.0 {
                ties_y += 1;
            }
            let product = dx * dy;
            if product > 0.0 {
                concordant += 1;
            } else if product < 0.0 {
                discordant += 1;
            }
        }
    }

    let denom = tau_b_denominator(n, ties_x, ties_y);
    if denom == 0.0 {
        return None;
    }
    Some(((concordant - discordant) as f64 / denom).clamp(-1.0, 1.0))
}

/// `sqrt((n0 - n1) * (n0 - n2))`, multiplied in floating point so large
/// inputs cannot overflow.
fn tau_b_denominator(n: usize, ties_x: u64, ties_y: u64) -> f64 {
    let pairs = n as u64 * (n as u64).saturating_sub(1) / 2;
    ((pairs - ties_x) as f64 * (pairs - ties_y) as f64).sqrt()
}

/// 1-based ranks, ties sharing their average rank.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }
        // positions i..j hold ranks i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for (idx, _) in &indexed[i..j] {
            ranks[*idx] = avg_rank;
        }
        i = j;
    }
    ranks
}

/// One coefficient, rounded, with `N/A` for undefined input.
pub fn correlate(kind: CorrelationKind, x: &[f64], y: &[f64]) -> MetricValue {
    let value = match kind {
        CorrelationKind::Pearson => pearson(x, y),
        CorrelationKind::Spearman => spearman(x, y),
        CorrelationKind::Kendall => kendall(x, y),
    };
    MetricValue::from_option(value).rounded(CORRELATION_DECIMALS)
}

/// Every kind for every method pair, grouped by kind then pair.
pub fn analyze_correlations(table: &ResultTable) -> Vec<CorrelationEntry> {
    let pairs = table.method_pairs();
    let mut entries = Vec::with_capacity(pairs.len() * CorrelationKind::ALL.len());
    for kind in CorrelationKind::ALL {
        for (a, b) in &pairs {
            let x = table.intensities(*a);
            let y = table.intensities(*b);
            entries.push(CorrelationEntry {
                kind,
                metric: PairwiseMetric::new(*a, *b, correlate(kind, &x, &y)),
            });
        }
    }
    entries
}
