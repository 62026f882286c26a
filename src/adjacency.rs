// src/adjacency.rs
//! Synthetic adjacency matrices for the directed/undirected classifier.

use crate::error::{CoverlabError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Probability that a directed edge is mirrored in a noisy directed matrix.
const MIRROR_PROBABILITY: f64 = 0.4;
/// Random cells flipped in a noisy undirected matrix.
const NOISE_FLIPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Directed = 0,
    Undirected = 1,
}

impl Label {
    pub const COUNT: usize = 2;

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Directed => "Directed",
            Self::Undirected => "Undirected",
        }
    }
}

/// Square 0/1 matrix, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    nodes: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    #[must_use]
    pub fn zeros(nodes: usize) -> Self {
        Self {
            nodes,
            cells: vec![0; nodes * nodes],
        }
    }

    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.nodes + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.nodes + col] = value;
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.nodes).all(|i| ((i + 1)..self.nodes).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Row-major cells as network input.
    #[must_use]
    pub fn flatten(&self) -> Vec<f64> {
        self.cells.iter().map(|&c| f64::from(c)).collect()
    }

    /// One random matrix of the requested kind.
    ///
    /// Directed matrices fill every off-diagonal cell with a fair coin and are
    /// redrawn until they are not symmetric. Undirected matrices mirror one
    /// coin per unordered pair.
    ///
    /// # Errors
    /// `InvalidParameter` for a directed matrix on fewer than two nodes,
    /// which can never be asymmetric.
    pub fn generate<R: Rng + ?Sized>(nodes: usize, directed: bool, rng: &mut R) -> Result<Self> {
        let mut m = Self::zeros(nodes);
        if !directed {
            for i in 0..nodes {
                for j in (i + 1)..nodes {
                    let v = u8::from(rng.gen_bool(0.5));
                    m.set(i, j, v);
                    m.set(j, i, v);
                }
            }
            return Ok(m);
        }

        if nodes < 2 {
            return Err(CoverlabError::invalid(format!(
                "a directed matrix needs at least 2 nodes, got {nodes}"
            )));
        }
        loop {
            for i in 0..nodes {
                for j in 0..nodes {
                    if i != j {
                        m.set(i, j, u8::from(rng.gen_bool(0.5)));
                    }
                }
            }
            if !m.is_symmetric() {
                return Ok(m);
            }
        }
    }

    /// A deliberately imperfect matrix.
    ///
    /// Directed: each present edge is mirrored with probability 0.4, which
    /// may leave the matrix symmetric. Undirected: two random cells are
    /// flipped (diagonal picks are skipped), which may break symmetry.
    ///
    /// # Errors
    /// Same as [`AdjacencyMatrix::generate`].
    pub fn generate_noisy<R: Rng + ?Sized>(
        nodes: usize,
        directed: bool,
        rng: &mut R,
    ) -> Result<Self> {
        let mut m = Self::generate(nodes, directed, rng)?;
        if directed {
            for i in 0..nodes {
                for j in 0..nodes {
                    if m.get(i, j) == 1 && rng.gen::<f64>() < MIRROR_PROBABILITY {
                        m.set(j, i, 1);
                    }
                }
            }
        } else if nodes > 0 {
            for _ in 0..NOISE_FLIPS {
                let r = rng.gen_range(0..nodes);
                let c = rng.gen_range(0..nodes);
                if r != c {
                    m.set(r, c, 1 - m.get(r, c));
                }
            }
        }
        Ok(m)
    }
}

/// A flattened matrix and its class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub label: Label,
}

/// `per_class` directed and `per_class` undirected samples, shuffled.
///
/// # Errors
/// Propagates matrix generation errors.
pub fn create_dataset<R: Rng + ?Sized>(
    nodes: usize,
    per_class: usize,
    noisy: bool,
    rng: &mut R,
) -> Result<Vec<Sample>> {
    let generate = |directed: bool, rng: &mut R| {
        if noisy {
            AdjacencyMatrix::generate_noisy(nodes, directed, rng)
        } else {
            AdjacencyMatrix::generate(nodes, directed, rng)
        }
    };

    let mut data = Vec::with_capacity(2 * per_class);
    for _ in 0..per_class {
        data.push(Sample {
            input: generate(true, rng)?.flatten(),
            label: Label::Directed,
        });
        data.push(Sample {
            input: generate(false, rng)?.flatten(),
            label: Label::Undirected,
        });
    }
    data.shuffle(rng);
    Ok(data)
}

/// Element-wise mean of flattened `nodes × nodes` matrices, as rows.
/// Each cell is the fraction of inputs with that connection.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average<'a, I>(inputs: I, nodes: usize) -> Option<Vec<Vec<f64>>>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut sum = vec![0.0; nodes * nodes];
    let mut count = 0usize;
    for input in inputs {
        for (s, v) in sum.iter_mut().zip(input) {
            *s += v;
        }
        count += 1;
    }
    if count == 0 || nodes == 0 {
        return None;
    }
    let n = count as f64;
    Some(sum.chunks(nodes).map(|row| row.iter().map(|v| v / n).collect()).collect())
}
