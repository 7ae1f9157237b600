//! Weighted random index backed by a Fenwick (binary indexed) tree.
//!
//! Spawn tables assign a non-negative weight to every map cell. Picking a
//! spawn position means drawing a uniform value in `[0, total)` and finding
//! the cell whose cumulative weight range contains it. The tree keeps point
//! updates, prefix sums and that inverse-CDF lookup at O(log n).
//!
//! # Layout
//!
//! Node 0 holds a running base sum that is included in [`WeightedIndex::prefix_sum`]
//! but never in [`WeightedIndex::total`]. Weight `i` lives at node `i + 1`.
//! The node array is padded with zeros to `1 + 2^k` entries so the rank query
//! can descend by powers of two.

use crate::rng::Randomizer;

/// Cumulative-frequency structure over `u32` weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedIndex {
    nodes: Vec<u64>,
    len: usize,
}

impl WeightedIndex {
    /// Builds the tree from raw weights in O(n).
    pub fn new(weights: &[u32]) -> Self {
        let len = weights.len();
        let mut nodes = vec![0u64; Self::node_count(len)];
        for (slot, weight) in nodes[1..].iter_mut().zip(weights) {
            *slot = u64::from(*weight);
        }

        let mut index = Self { nodes, len };
        index.init();
        index
    }

    /// `1 + next_power_of_two(len)`, or 1 for an empty table.
    fn node_count(len: usize) -> usize {
        if len == 0 {
            1
        } else {
            1 + len.next_power_of_two()
        }
    }

    #[inline]
    fn parent(node: usize) -> usize {
        node - (node & node.wrapping_neg())
    }

    #[inline]
    fn next(node: usize) -> usize {
        node + (node & node.wrapping_neg())
    }

    /// Pushes every node's partial sum into its next power-of-two aligned ancestor.
    fn init(&mut self) {
        let size = self.nodes.len();
        for node in 1..size {
            let ancestor = Self::next(node);
            if ancestor < size {
                self.nodes[ancestor] = self.nodes[ancestor].wrapping_add(self.nodes[node]);
            }
        }
    }

    /// Number of weights (padding excluded).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Running base sum stored in node 0.
    pub fn base(&self) -> u64 {
        self.nodes[0]
    }

    /// Sum of all weights, base excluded.
    pub fn total(&self) -> u64 {
        self.range_sum(0, self.len)
    }

    /// Sum of node values from the root path of `node`, without the base.
    fn node_prefix(&self, mut node: usize) -> u64 {
        let mut sum = 0u64;
        while node != 0 {
            sum = sum.wrapping_add(self.nodes[node]);
            node = Self::parent(node);
        }
        sum
    }

    /// Base plus the sum of weights `0..end`.
    pub fn prefix_sum(&self, end: usize) -> u64 {
        self.base().wrapping_add(self.node_prefix(end))
    }

    /// Sum of weights `start..end`.
    ///
    /// Walks both root paths only until they meet, so short ranges stay cheap.
    pub fn range_sum(&self, start: usize, end: usize) -> u64 {
        let mut sum = 0u64;
        let (mut i, mut j) = (start, end);
        while j > i {
            sum = sum.wrapping_add(self.nodes[j]);
            j = Self::parent(j);
        }
        while i > j {
            sum = sum.wrapping_sub(self.nodes[i]);
            i = Self::parent(i);
        }
        sum
    }

    /// Original weight at `index`, independent of earlier updates.
    pub fn get(&self, index: usize) -> u64 {
        self.range_sum(index, index + 1)
    }

    /// Adds `delta` to the weight at `index`.
    pub fn update(&mut self, index: usize, delta: i64) {
        let size = self.nodes.len();
        let mut node = index + 1;
        while node < size {
            self.nodes[node] = self.nodes[node].wrapping_add_signed(delta);
            node = Self::next(node);
        }
    }

    /// Adds `delta` to the base sum; no other node changes.
    pub fn add_to_base(&mut self, delta: i64) {
        self.nodes[0] = self.nodes[0].wrapping_add_signed(delta);
    }

    /// Assigns `value` to the weight at `index`.
    pub fn set(&mut self, index: usize, value: u64) {
        let delta = value.wrapping_sub(self.get(index)) as i64;
        self.update(index, delta);
    }

    /// Finds the weight index whose cumulative range contains `value`.
    ///
    /// Returns the `i` with `Σ w[0..i] <= value < Σ w[0..=i]`, or `None`
    /// when `value` is not below [`WeightedIndex::total`].
    pub fn rank_query(&self, value: u64) -> Option<usize> {
        if value >= self.total() {
            return None;
        }

        let size = self.nodes.len();
        let mut remaining = value;
        let mut position = 0usize;
        // size - 1 is a power of two
        let mut step = size - 1;
        while step > 0 {
            let candidate = position + step;
            if candidate < size && self.nodes[candidate] <= remaining {
                remaining -= self.nodes[candidate];
                position = candidate;
            }
            step >>= 1;
        }
        Some(position)
    }

    /// Draws a uniform value in `[0, total)` and returns its weight index.
    ///
    /// Returns `None` without drawing when every weight is zero.
    pub fn pick(&self, randomizer: &mut dyn Randomizer) -> Option<usize> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.rank_query(randomizer.get(0, total - 1))
    }

    /// Recovers the current weights by undoing the tree transform.
    pub fn to_weights(&self) -> Vec<u64> {
        let mut nodes = self.nodes.clone();
        let size = nodes.len();
        for node in (1..size).rev() {
            let ancestor = Self::next(node);
            if ancestor < size {
                nodes[ancestor] = nodes[ancestor].wrapping_sub(nodes[node]);
            }
        }
        nodes.into_iter().skip(1).take(self.len).collect()
    }
}

impl Default for WeightedIndex {
    fn default() -> Self {
        Self::new(&[])
    }
}
