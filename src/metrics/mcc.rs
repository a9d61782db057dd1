use std::collections::HashMap;

use crate::error::{Error, Result};

use super::{Metric, Scores};

/// The registry key for the Matthews correlation coefficient
pub static KEY: &str = "mcc";

/// The name the metric reports its value under
pub static NAME: &str = "matthews_correlation";

/// The Matthews correlation coefficient over any number of classes
#[derive(Debug, Clone, Copy, Default)]
pub struct MatthewsCorrelation;

impl Metric for MatthewsCorrelation {
    fn name(&self) -> &str {
        NAME
    }

    fn compute(&self, predictions: &[usize], references: &[usize]) -> Result<Scores> {
        let value = matthews_corrcoef(references, predictions)?;

        Ok(Scores::from([(NAME.to_string(), value)]))
    }
}

/// Compute the Matthews correlation coefficient between true and predicted class ids.
///
/// Uses the multiclass generalisation
/// `(c·s − Σ t_k·p_k) / √((s² − Σ p_k²)(s² − Σ t_k²))`, where `s` is the number of
/// samples, `c` the number of correct predictions, and `t_k`/`p_k` the number of times
/// class `k` occurs in the truth and in the predictions. A zero denominator yields 0.0.
pub fn matthews_corrcoef(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(Error::Metric(format!(
            "found {} references but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }

    // Per-class (true count, predicted count)
    let mut counts: HashMap<usize, (f64, f64)> = HashMap::new();
    let mut correct = 0.0;

    for (&t, &p) in y_true.iter().zip(y_pred) {
        counts.entry(t).or_default().0 += 1.0;
        counts.entry(p).or_default().1 += 1.0;

        if t == p {
            correct += 1.0;
        }
    }

    let samples = y_true.len() as f64;

    let (t_dot_p, p_dot_p, t_dot_t) = counts.values().fold(
        (0.0, 0.0, 0.0),
        |(tp, pp, tt), &(t, p)| (tp + t * p, pp + p * p, tt + t * t),
    );

    let cov_ytyp = correct * samples - t_dot_p;
    let cov_ypyp = samples * samples - p_dot_p;
    let cov_ytyt = samples * samples - t_dot_t;

    if cov_ypyp * cov_ytyt == 0.0 {
        return Ok(0.0);
    }

    Ok((cov_ytyp / (cov_ytyt * cov_ypyp).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_one_mismatch() {
        let mcc = matthews_corrcoef(&[1, 0, 0], &[1, 0, 1]).unwrap();

        assert!(approx_eq(mcc, 0.5), "got {}", mcc);
    }

    #[test]
    fn test_perfect_and_inverted() {
        assert!(approx_eq(
            matthews_corrcoef(&[0, 1, 1, 0], &[0, 1, 1, 0]).unwrap(),
            1.0
        ));
        assert!(approx_eq(
            matthews_corrcoef(&[0, 1, 1, 0], &[1, 0, 0, 1]).unwrap(),
            -1.0
        ));
    }

    #[test]
    fn test_binary_matches_confusion_matrix_formula() {
        let y_true = [1, 1, 1, 0, 0, 0, 1, 0];
        let y_pred = [1, 0, 1, 0, 1, 0, 1, 0];

        // tp = 3, tn = 3, fp = 1, fn = 1
        let expected = (3.0 * 3.0 - 1.0 * 1.0) / (4.0f64 * 4.0 * 4.0 * 4.0).sqrt();

        assert!(approx_eq(
            matthews_corrcoef(&y_true, &y_pred).unwrap(),
            expected
        ));
    }

    #[test]
    fn test_multiclass() {
        // c = 1, s = 6, every class occurs twice in both: (6 - 12) / 24
        let mcc = matthews_corrcoef(&[0, 1, 2, 0, 1, 2], &[0, 2, 1, 1, 2, 0]).unwrap();

        assert!((-1.0..=1.0).contains(&mcc));
        assert!(approx_eq(mcc, -0.25), "got {}", mcc);
    }

    #[test]
    fn test_constant_predictions_score_zero() {
        assert_eq!(matthews_corrcoef(&[0, 1, 0, 1], &[1, 1, 1, 1]).unwrap(), 0.0);
        assert_eq!(matthews_corrcoef(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            matthews_corrcoef(&[0, 1], &[0]),
            Err(Error::Metric(_))
        ));
    }

    #[test]
    fn test_metric_reports_under_name() {
        let scores = MatthewsCorrelation.compute(&[1, 0, 1], &[1, 0, 0]).unwrap();

        assert_eq!(scores.keys().collect::<Vec<_>>(), vec!["matthews_correlation"]);
    }
}
