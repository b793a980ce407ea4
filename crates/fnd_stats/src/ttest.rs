use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use crate::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub n_a: usize,
    pub n_b: usize,
}

/// Student's two-sample t-test assuming equal variances, two-tailed.
pub fn student_ttest(a: &[f64], b: &[f64]) -> Outcome<TTest> {
    let (n_a, n_b) = (a.len(), b.len());
    if n_a < 2 || n_b < 2 {
        return Outcome::InsufficientData(format!("need at least 2 values per group, got {} and {}", n_a, n_b));
    }
    let (mean_a, var_a) = mean_and_variance(a);
    let (mean_b, var_b) = mean_and_variance(b);

    let dof = (n_a + n_b - 2) as f64;
    let pooled = ((n_a - 1) as f64 * var_a + (n_b - 1) as f64 * var_b) / dof;
    if !pooled.is_finite() || pooled == 0.0 {
        return Outcome::InsufficientData("both groups have zero variance".to_string());
    }

    let statistic = (mean_a - mean_b) / (pooled * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
    let p_value = match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0),
        Err(e) => return Outcome::InsufficientData(format!("t distribution undefined: {}", e)),
    };

    Outcome::Computed(TTest {
        statistic,
        p_value,
        dof,
        mean_a,
        mean_b,
        n_a,
        n_b,
    })
}

// Sample variance (n - 1 denominator).
fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let a = [20.0, 22.0, 19.0, 24.0, 25.0];
        let b = [30.0, 28.0, 27.0, 31.0, 29.0];
        let t = student_ttest(&a, &b).computed().copied().unwrap();
        assert_eq!(t.dof, 8.0);
        assert_eq!(t.mean_a, 22.0);
        assert_eq!(t.mean_b, 29.0);
        // pooled variance 4.5, standard error sqrt(1.8)
        assert!((t.statistic + 7.0 / 1.8f64.sqrt()).abs() < 1e-9);
        assert!(t.p_value > 0.0 && t.p_value < 0.01);

        let swapped = student_ttest(&b, &a).computed().copied().unwrap();
        assert!((swapped.statistic + t.statistic).abs() < 1e-12);
        assert!((swapped.p_value - t.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_groups() {
        assert!(student_ttest(&[1.0], &[2.0, 3.0]).is_insufficient());
        assert!(student_ttest(&[5.0, 5.0], &[5.0, 5.0]).is_insufficient());
    }
}
