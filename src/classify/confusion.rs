// src/classify/confusion.rs
use crate::adjacency::Label;
use serde::{Deserialize, Serialize};

/// Prediction counts indexed by `[predicted][actual]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: [[usize; Label::COUNT]; Label::COUNT],
}

impl ConfusionMatrix {
    /// Tallies `(predicted, actual)` class-index pairs. Out-of-range indices
    /// are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut m = Self::default();
        for (pred, actual) in pairs {
            if let Some(cell) = m.counts.get_mut(pred).and_then(|row| row.get_mut(actual)) {
                *cell += 1;
            }
        }
        m
    }

    #[must_use]
    pub fn count(&self, predicted: Label, actual: Label) -> usize {
        self.counts[predicted.index()][actual.index()]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..Label::COUNT).map(|i| self.counts[i][i]).sum();
        correct as f64 / total as f64
    }
}
