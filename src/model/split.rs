//! Stratified data splitting
//!
//! Seeded, class-proportion-preserving train/test splits and k-fold index
//! construction. Single-member classes stay in the training partition.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::error::ModelError;

fn indices_by_class(labels: &[bool]) -> (Vec<usize>, Vec<usize>) {
    let mut positives = Vec::new();
    let mut negatives = Vec::new();
    for (i, &label) in labels.iter().enumerate() {
        if label {
            positives.push(i);
        } else {
            negatives.push(i);
        }
    }
    (positives, negatives)
}

/// Stratified train/test split over label indices
///
/// Per class, `round(n_class * test_size)` members go to the test
/// partition, clamped so neither partition loses the class entirely when
/// it has at least two members.
///
/// # Errors
/// Returns an error when the split would leave either partition empty.
pub fn stratified_split(
    labels: &[bool],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), ModelError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (positives, negatives) = indices_by_class(labels);

    let mut train = Vec::new();
    let mut test = Vec::new();

    for mut class_indices in [negatives, positives] {
        class_indices.shuffle(&mut rng);
        let n = class_indices.len();
        let n_test = if n < 2 {
            0
        } else {
            (((n as f64) * test_size).round() as usize).clamp(1, n - 1)
        };
        test.extend_from_slice(&class_indices[..n_test]);
        train.extend_from_slice(&class_indices[n_test..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(ModelError::TooFewSamples(labels.len()));
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

/// Stratified k-fold test-index sets
///
/// Members of each class are shuffled and dealt round-robin across folds,
/// so every fold keeps the class proportions as closely as integer counts
/// allow. Folds are returned as sorted test-index sets; folds that end up
/// empty (more folds than samples) are omitted.
#[must_use]
pub fn stratified_k_fold(labels: &[bool], k: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut positives, mut negatives) = indices_by_class(labels);
    positives.shuffle(&mut rng);
    negatives.shuffle(&mut rng);

    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k.max(1)];
    for (i, idx) in negatives.into_iter().chain(positives).enumerate() {
        folds[i % k.max(1)].push(idx);
    }

    folds.retain(|fold| !fold.is_empty());
    for fold in &mut folds {
        fold.sort_unstable();
    }
    folds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_preserves_class_proportions() {
        // 40 negatives, 10 positives
        let labels: Vec<bool> = (0..50).map(|i| i >= 40).collect();
        let (train, test) = stratified_split(&labels, 0.2, 42).unwrap();

        assert_eq!(train.len() + test.len(), 50);
        let test_positives = test.iter().filter(|&&i| labels[i]).count();
        let train_positives = train.iter().filter(|&&i| labels[i]).count();
        assert_eq!(test_positives, 2);
        assert_eq!(train_positives, 8);
    }

    #[test]
    fn split_is_seed_deterministic() {
        let labels: Vec<bool> = (0..30).map(|i| i % 3 == 0).collect();
        assert_eq!(
            stratified_split(&labels, 0.2, 7).unwrap(),
            stratified_split(&labels, 0.2, 7).unwrap()
        );
    }

    #[test]
    fn k_fold_covers_every_index_once() {
        let labels: Vec<bool> = (0..23).map(|i| i % 4 == 0).collect();
        let folds = stratified_k_fold(&labels, 5, 1);

        let mut seen: Vec<usize> = folds.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..23).collect::<Vec<_>>());
    }
}
