use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use crate::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
    pub n: usize,
}

/// Pearson product-moment correlation with a two-tailed p-value.
pub fn pearson(x: &[f64], y: &[f64]) -> Outcome<Correlation> {
    if x.len() != y.len() {
        return Outcome::InsufficientData(format!("input lengths differ ({} vs {})", x.len(), y.len()));
    }
    let n = x.len();
    if n < 2 {
        return Outcome::InsufficientData(format!("need at least 2 pairs, got {}", n));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Outcome::InsufficientData("input contains non-finite values".to_string());
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Outcome::InsufficientData("one of the inputs is constant".to_string());
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    match correlation_p_value(r, n) {
        Some(p_value) => Outcome::Computed(Correlation {
            coefficient: r,
            p_value,
            n,
        }),
        None => Outcome::InsufficientData("t distribution is undefined for this sample".to_string()),
    }
}

/// Spearman rank correlation: Pearson on tie-averaged ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Outcome<Correlation> {
    if x.len() != y.len() {
        return Outcome::InsufficientData(format!("input lengths differ ({} vs {})", x.len(), y.len()));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Outcome::InsufficientData("input contains non-finite values".to_string());
    }
    pearson(&rank(x), &rank(y))
}

/// 1-based ranks, ties get the average of the ranks they span.
pub fn rank(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let average = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = average;
        }
        start = end;
    }
    ranks
}

// Two points always lie on a line, so they carry no evidence: p = 1.
fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
    if n <= 2 {
        return Some(1.0);
    }
    if r.abs() >= 1.0 {
        return Some(0.0);
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_pearson_known_values() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let c = pearson(&x, &y).computed().copied().unwrap();
        assert!(close(c.coefficient, 0.7745966692));
        // scipy.stats.pearsonr gives p = 0.1240
        assert!((c.p_value - 0.1240).abs() < 1e-3);
        assert_eq!(c.n, 5);
    }

    #[test]
    fn test_pearson_is_symmetric_and_bounded() {
        let x = [0.91, 0.55, 0.73, 0.99, 0.62, 0.80];
        let y = [12.0, 40.0, 22.0, 9.0, 31.0, 18.0];
        let xy = pearson(&x, &y).computed().copied().unwrap();
        let yx = pearson(&y, &x).computed().copied().unwrap();
        assert_eq!(xy.coefficient, yx.coefficient);
        assert_eq!(xy.p_value, yx.p_value);
        assert!(xy.coefficient.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&xy.p_value));
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        assert!(pearson(&[1.0], &[2.0]).is_insufficient());
        assert!(pearson(&[], &[]).is_insufficient());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_insufficient());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_insufficient());
        assert!(pearson(&[1.0, f64::NAN], &[1.0, 2.0]).is_insufficient());
    }

    #[test]
    fn test_two_points_are_defined() {
        let c = pearson(&[0.99, 0.75], &[10.0, 4.0]).computed().copied().unwrap();
        assert!(close(c.coefficient, 1.0));
        assert_eq!(c.p_value, 1.0);
    }

    #[test]
    fn test_perfect_correlation_has_zero_p() {
        let c = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).computed().copied().unwrap();
        assert_eq!(c.coefficient, -1.0);
        assert_eq!(c.p_value, 0.0);
    }

    #[test]
    fn test_rank_averages_ties() {
        assert_eq!(rank(&[10.0, 20.0, 10.0, 30.0]), vec![1.5, 3.0, 1.5, 4.0]);
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_spearman_monotonic() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 4.0, 9.0, 16.0, 25.0];
        let c = spearman(&x, &y).computed().copied().unwrap();
        assert!(close(c.coefficient, 1.0));

        let y = [5.0, 6.0, 7.0, 8.0, 7.0];
        let s = spearman(&x, &y).computed().copied().unwrap();
        // scipy.stats.spearmanr gives rho = 0.8207826816681233
        assert!(close(s.coefficient, 0.8207826816681233));
        let s_rev = spearman(&y, &x).computed().copied().unwrap();
        assert_eq!(s.coefficient, s_rev.coefficient);
    }
}
