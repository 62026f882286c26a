// src/nn/mod.rs
//! Fully connected sigmoid network trained with mini-batch gradient descent.
//!
//! Layer `l` maps activations `a` to `σ(W·a + b)`. The cost is the quadratic
//! cost `½‖a − y‖²`, averaged over samples, and gradients come from plain
//! backpropagation.

use crate::error::{CoverlabError, Result};
use ndarray::{aview1, Array1, Array2, ArrayView1, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

#[must_use]
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[must_use]
pub fn sigmoid_prime(z: f64) -> f64 {
    let s = sigmoid(z);
    s * (1.0 - s)
}

/// One-hot target vector for class `j`.
///
/// # Errors
/// `InvalidLabel` if `j >= classes`.
pub fn vectorize_result(j: usize, classes: usize) -> Result<Vec<f64>> {
    if j >= classes {
        return Err(CoverlabError::InvalidLabel { label: j, classes });
    }
    let mut e = vec![0.0; classes];
    e[j] = 1.0;
    Ok(e)
}

/// Derivative of the quadratic cost with respect to the output activations.
#[must_use]
pub fn cost_derivative(output: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
    &output - &y
}

/// Input with its desired output activations.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// Input with the index of its correct class.
#[derive(Debug, Clone, PartialEq)]
pub struct TestExample {
    pub input: Vec<f64>,
    pub label: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SgdParams {
    pub epochs: usize,
    pub mini_batch_size: usize,
    pub eta: f64,
}

/// Metrics recorded after one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    pub epoch: usize,
    pub cost: f64,
    pub accuracy: Option<f64>,
}

/// Per-epoch cost on the training data and, when test data was given,
/// accuracy on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub cost: Vec<f64>,
    pub accuracy: Vec<f64>,
}

impl TrainingHistory {
    #[must_use]
    pub fn final_accuracy(&self) -> Option<f64> {
        self.accuracy.last().copied()
    }
}

/// Bias and weight gradients, shaped like the network.
struct Gradient {
    biases: Vec<Array1<f64>>,
    weights: Vec<Array2<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    sizes: Vec<usize>,
    /// One vector per non-input layer.
    biases: Vec<Array1<f64>>,
    /// `weights[l]` has shape `(sizes[l + 1], sizes[l])`.
    weights: Vec<Array2<f64>>,
}

impl Network {
    /// Creates a network with `sizes[0]` inputs and `sizes.last()` outputs.
    /// Weights and biases are drawn from a standard normal distribution; the
    /// input layer has no biases.
    ///
    /// # Errors
    /// `InvalidNetwork` for fewer than two layers or an empty layer.
    pub fn new<R: Rng + ?Sized>(sizes: &[usize], rng: &mut R) -> Result<Self> {
        if sizes.len() < 2 {
            return Err(CoverlabError::InvalidNetwork(format!(
                "need at least an input and an output layer, got {sizes:?}"
            )));
        }
        if sizes.contains(&0) {
            return Err(CoverlabError::InvalidNetwork(format!(
                "every layer needs at least one neuron, got {sizes:?}"
            )));
        }

        let biases = sizes[1..]
            .iter()
            .map(|&y| Array1::from_shape_simple_fn(y, || rng.sample(StandardNormal)))
            .collect();
        let weights = sizes
            .windows(2)
            .map(|w| Array2::from_shape_simple_fn((w[1], w[0]), || rng.sample(StandardNormal)))
            .collect();

        Ok(Self {
            sizes: sizes.to_vec(),
            biases,
            weights,
        })
    }

    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    #[must_use]
    pub fn num_layers(&self) -> usize {
        self.sizes.len()
    }

    /// Output activations for `input`.
    ///
    /// # Errors
    /// `InvalidParameter` if `input` does not match the input layer.
    pub fn feedforward(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        Ok(self.forward(input).to_vec())
    }

    /// Index of the strongest output (first one on ties).
    ///
    /// # Errors
    /// Same as [`Network::feedforward`].
    pub fn predict(&self, input: &[f64]) -> Result<usize> {
        self.check_input(input)?;
        Ok(argmax(self.forward(input).view()))
    }

    /// Mini-batch stochastic gradient descent.
    ///
    /// Each epoch shuffles `training`, splits it into consecutive batches of
    /// `mini_batch_size` (the last may be shorter) and takes one gradient
    /// step per batch. `on_epoch` receives the epoch's metrics.
    ///
    /// # Errors
    /// `InvalidParameter` for an empty training set, a zero batch size, or
    /// examples whose shape does not fit the network.
    pub fn sgd<R, F>(
        &mut self,
        training: &mut [TrainingExample],
        params: &SgdParams,
        test: Option<&[TestExample]>,
        rng: &mut R,
        mut on_epoch: F,
    ) -> Result<TrainingHistory>
    where
        R: Rng + ?Sized,
        F: FnMut(&EpochReport),
    {
        if training.is_empty() {
            return Err(CoverlabError::invalid("training set is empty"));
        }
        if params.mini_batch_size == 0 {
            return Err(CoverlabError::invalid("mini-batch size must be positive"));
        }
        self.check_training(training)?;
        if let Some(test) = test {
            self.check_test(test)?;
        }

        let mut history = TrainingHistory::default();
        for epoch in 0..params.epochs {
            training.shuffle(rng);
            for batch in training.chunks(params.mini_batch_size) {
                self.step(batch, params.eta);
            }

            let cost = self.mean_cost(training);
            history.cost.push(cost);

            #[allow(clippy::cast_precision_loss)]
            let accuracy = test
                .filter(|t| !t.is_empty())
                .map(|t| self.count_correct(t) as f64 / t.len() as f64);
            if let Some(acc) = accuracy {
                history.accuracy.push(acc);
            }

            on_epoch(&EpochReport {
                epoch,
                cost,
                accuracy,
            });
        }
        Ok(history)
    }

    /// One gradient-descent step using the mean gradient of `batch`.
    ///
    /// # Errors
    /// `InvalidParameter` if an example does not fit the network.
    pub fn update_mini_batch(&mut self, batch: &[TrainingExample], eta: f64) -> Result<()> {
        self.check_training(batch)?;
        self.step(batch, eta);
        Ok(())
    }

    /// Number of test inputs whose predicted class equals the label.
    ///
    /// # Errors
    /// `InvalidParameter` if an input does not fit the network.
    pub fn evaluate(&self, test: &[TestExample]) -> Result<usize> {
        self.check_test(test)?;
        Ok(self.count_correct(test))
    }

    /// Mean quadratic cost `½‖a − y‖²` over `data`; zero for no data.
    ///
    /// # Errors
    /// `InvalidParameter` if an example does not fit the network.
    pub fn total_cost(&self, data: &[TrainingExample]) -> Result<f64> {
        self.check_training(data)?;
        Ok(self.mean_cost(data))
    }

    fn step(&mut self, batch: &[TrainingExample], eta: f64) {
        if batch.is_empty() {
            return;
        }
        let mut total = self.zero_gradient();
        for ex in batch {
            let delta = self.backprop(aview1(&ex.input), aview1(&ex.target));
            for (acc, d) in total.biases.iter_mut().zip(&delta.biases) {
                *acc += d;
            }
            for (acc, d) in total.weights.iter_mut().zip(&delta.weights) {
                *acc += d;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let step = eta / batch.len() as f64;
        for (w, nw) in self.weights.iter_mut().zip(&total.weights) {
            w.scaled_add(-step, nw);
        }
        for (b, nb) in self.biases.iter_mut().zip(&total.biases) {
            b.scaled_add(-step, nb);
        }
    }

    /// Gradient of the quadratic cost for a single example.
    fn backprop(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> Gradient {
        let mut grad = self.zero_gradient();

        // Forward pass, keeping every weighted input and activation.
        let mut activations: Vec<Array1<f64>> = vec![x.to_owned()];
        let mut zs: Vec<Array1<f64>> = Vec::with_capacity(self.weights.len());
        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = w.dot(&activations[activations.len() - 1]) + b;
            activations.push(z.mapv(sigmoid));
            zs.push(z);
        }

        // Backward pass.
        let last = self.weights.len() - 1;
        let mut delta =
            cost_derivative(activations[last + 1].view(), y) * zs[last].mapv(sigmoid_prime);
        grad.weights[last] = outer(&delta, &activations[last]);
        grad.biases[last].assign(&delta);

        for l in (0..last).rev() {
            delta = self.weights[l + 1].t().dot(&delta) * zs[l].mapv(sigmoid_prime);
            grad.weights[l] = outer(&delta, &activations[l]);
            grad.biases[l].assign(&delta);
        }
        grad
    }

    fn count_correct(&self, test: &[TestExample]) -> usize {
        test.iter()
            .filter(|ex| argmax(self.forward(&ex.input).view()) == ex.label)
            .count()
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_cost(&self, data: &[TrainingExample]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let sum: f64 = data
            .iter()
            .map(|ex| {
                let diff = self.forward(&ex.input) - &aview1(&ex.target);
                0.5 * diff.dot(&diff)
            })
            .sum();
        sum / data.len() as f64
    }

    fn forward(&self, input: &[f64]) -> Array1<f64> {
        let mut a = aview1(input).to_owned();
        for (w, b) in self.weights.iter().zip(&self.biases) {
            a = (w.dot(&a) + b).mapv(sigmoid);
        }
        a
    }

    fn zero_gradient(&self) -> Gradient {
        Gradient {
            biases: self.biases.iter().map(|b| Array1::zeros(b.len())).collect(),
            weights: self.weights.iter().map(|w| Array2::zeros(w.raw_dim())).collect(),
        }
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.sizes[0] {
            return Err(CoverlabError::invalid(format!(
                "input has {} values, network expects {}",
                input.len(),
                self.sizes[0]
            )));
        }
        Ok(())
    }

    fn check_training(&self, data: &[TrainingExample]) -> Result<()> {
        let outputs = self.sizes[self.sizes.len() - 1];
        for ex in data {
            self.check_input(&ex.input)?;
            if ex.target.len() != outputs {
                return Err(CoverlabError::invalid(format!(
                    "target has {} values, network outputs {outputs}",
                    ex.target.len()
                )));
            }
        }
        Ok(())
    }

    fn check_test(&self, data: &[TestExample]) -> Result<()> {
        data.iter().try_for_each(|ex| self.check_input(&ex.input))
    }
}

/// `a · bᵀ` as a `(a.len(), b.len())` matrix.
fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    a.view()
        .insert_axis(Axis(1))
        .dot(&b.view().insert_axis(Axis(0)))
}

fn argmax(values: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sigmoid_basics() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid_prime(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(array![0.2, 0.7, 0.7].view()), 1);
        assert_eq!(argmax(array![0.5].view()), 0);
    }

    #[test]
    fn outer_product_shape() {
        let m = outer(&array![1.0, 2.0], &array![3.0, 4.0, 5.0]);
        assert_eq!(m, array![[3.0, 4.0, 5.0], [6.0, 8.0, 10.0]]);
    }

    #[test]
    fn backprop_matches_numeric_gradient() {
        let mut rng = StdRng::seed_from_u64(3);
        let net = Network::new(&[3, 4, 2], &mut rng).unwrap();
        let x = [0.3, -0.7, 1.0];
        let y = [1.0, 0.0];
        let grad = net.backprop(aview1(&x), aview1(&y));
        let ex = [TrainingExample {
            input: x.to_vec(),
            target: y.to_vec(),
        }];

        let eps = 1e-6;
        for l in 0..net.weights.len() {
            let (rows, cols) = net.weights[l].dim();
            for r in 0..rows {
                for c in 0..cols {
                    let mut plus = net.clone();
                    plus.weights[l][[r, c]] += eps;
                    let mut minus = net.clone();
                    minus.weights[l][[r, c]] -= eps;
                    let numeric = (plus.mean_cost(&ex) - minus.mean_cost(&ex)) / (2.0 * eps);
                    assert!((numeric - grad.weights[l][[r, c]]).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn public_steps_validate_shapes() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut net = Network::new(&[3, 2], &mut rng).unwrap();
        let short = [TrainingExample {
            input: vec![1.0, 0.0],
            target: vec![1.0, 0.0],
        }];
        let before = net.clone();
        assert!(net.update_mini_batch(&short, 1.0).is_err());
        assert_eq!(net, before);
        assert!(net.total_cost(&short).is_err());
        let test = [TestExample {
            input: vec![1.0; 4],
            label: 0,
        }];
        assert!(net.evaluate(&test).is_err());
    }
}
