// src/walk/trace.rs
//! Step-by-step record of a walk, for animation.

use serde::{Deserialize, Serialize};

/// Walker position after a step, plus how many nodes had been discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub node: usize,
    pub visited: usize,
}

/// Frames of a walk, starting with the initial position.
///
/// Visited sets are not copied per frame: nodes are stored once in discovery
/// order and each frame records a prefix length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkTrace {
    frames: Vec<Frame>,
    discovery: Vec<usize>,
}

impl WalkTrace {
    pub(crate) fn start(&mut self, node: usize) {
        self.discovery.push(node);
        self.frames.push(Frame { node, visited: 1 });
    }

    pub(crate) fn record(&mut self, node: usize, discovered: bool) {
        if discovered {
            self.discovery.push(node);
        }
        self.frames.push(Frame {
            node,
            visited: self.discovery.len(),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of moves (one less than the number of frames).
    #[must_use]
    pub fn steps(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn discovery_order(&self) -> &[usize] {
        &self.discovery
    }

    /// Frame `i`, or the final frame once the walk has finished.
    #[must_use]
    pub fn frame_or_last(&self, i: usize) -> Option<&Frame> {
        self.frames.get(i).or_else(|| self.frames.last())
    }

    /// Nodes visited as of frame `i` (clamped to the final frame).
    #[must_use]
    pub fn visited_at(&self, i: usize) -> &[usize] {
        let count = self.frame_or_last(i).map_or(0, |f| f.visited);
        &self.discovery[..count]
    }
}
