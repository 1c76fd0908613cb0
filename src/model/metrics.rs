//! Classifier evaluation metrics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Held-out evaluation results for a trained classifier
///
/// `roc_auc` and the cross-validation fields are NaN when undefined (a
/// partition or fold with a single class); callers treat NaN as "not
/// computable", never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Fraction of correct test labels
    pub accuracy: f64,
    /// True positives over predicted positives
    pub precision: f64,
    /// True positives over actual positives
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Probability-ranked ROC-AUC on the test partition
    pub roc_auc: f64,
    /// Mean 5-fold cross-validated ROC-AUC on the training partition
    pub cv_auc_mean: f64,
    /// Standard deviation of the cross-validated ROC-AUC
    pub cv_auc_std: f64,
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation Metrics:")?;
        writeln!(f, "  Accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "  Precision: {:.4}", self.precision)?;
        writeln!(f, "  Recall: {:.4}", self.recall)?;
        writeln!(f, "  F1: {:.4}", self.f1)?;
        writeln!(f, "  ROC-AUC: {:.4}", self.roc_auc)?;
        writeln!(
            f,
            "  CV ROC-AUC: {:.4} (+/- {:.4})",
            self.cv_auc_mean, self.cv_auc_std
        )?;
        Ok(())
    }
}

/// Fraction of matching labels
#[must_use]
pub fn accuracy(y_true: &[bool], y_pred: &[bool]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

fn confusion(y_true: &[bool], y_pred: &[bool]) -> (usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t, p) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }
    (tp, fp, fn_)
}

/// True positives over predicted positives; 0 when nothing was predicted positive
#[must_use]
pub fn precision(y_true: &[bool], y_pred: &[bool]) -> f64 {
    let (tp, fp, _) = confusion(y_true, y_pred);
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// True positives over actual positives; 0 when there are no positives
#[must_use]
pub fn recall(y_true: &[bool], y_pred: &[bool]) -> f64 {
    let (tp, _, fn_) = confusion(y_true, y_pred);
    if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    }
}

/// Harmonic mean of precision and recall
#[must_use]
pub fn f1_score(y_true: &[bool], y_pred: &[bool]) -> f64 {
    let p = precision(y_true, y_pred);
    let r = recall(y_true, y_pred);
    if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
}

/// ROC-AUC from predicted probabilities using midranks for ties
///
/// Returns `None` when either class is absent, in which case the area is
/// undefined.
#[must_use]
pub fn roc_auc(y_true: &[bool], scores: &[f64]) -> Option<f64> {
    let n_pos = y_true.iter().filter(|&&t| t).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // Midranks: tied scores share the average of their 1-based rank span
    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let midrank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = midrank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|&(&t, _)| t)
        .map(|(_, &r)| r)
        .sum();

    let u = positive_rank_sum - (n_pos * (n_pos + 1)) as f64 / 2.0;
    Some(u / (n_pos * n_neg) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_ranking_gives_unit_auc() {
        let y = [false, false, true, true];
        let scores = [0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_auc(&y, &scores), Some(1.0));
    }

    #[test]
    fn uninformative_scores_give_half_auc() {
        let y = [false, true, false, true];
        let scores = [0.5, 0.5, 0.5, 0.5];
        assert_eq!(roc_auc(&y, &scores), Some(0.5));
    }

    #[test]
    fn auc_undefined_for_single_class() {
        assert_eq!(roc_auc(&[true, true], &[0.3, 0.7]), None);
    }

    #[test]
    fn confusion_derived_metrics() {
        let y_true = [true, true, false, false, true];
        let y_pred = [true, false, true, false, true];

        assert_eq!(accuracy(&y_true, &y_pred), 0.6);
        assert!((precision(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
        assert!((recall(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
        assert!((f1_score(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_predictions_do_not_divide_by_zero() {
        let y_true = [true, false];
        let all_negative = [false, false];
        assert_eq!(precision(&y_true, &all_negative), 0.0);
        assert_eq!(f1_score(&y_true, &all_negative), 0.0);
    }
}
