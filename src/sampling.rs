use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::model::node::NodeTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleMode {
	/// Uniform draw without replacement; output order carries no meaning.
	Random,
	/// Evenly strided picks that keep the input sequence order.
	Ordered,
}

pub struct Sampler {
	pub max_nodes: usize,
	pub mode: SampleMode,
	pub seed: u64,
}

impl Sampler {
	pub const DEFAULT_SEED: u64 = 0;

	pub fn new(max_nodes: usize, mode: SampleMode) -> Sampler {
		Sampler {
			max_nodes,
			mode,
			seed: Sampler::DEFAULT_SEED,
		}
	}

	/// Row indices to keep from a table of `len` rows.
	pub fn select_indices(&self, len: usize) -> Vec<usize> {
		if len <= self.max_nodes {
			return (0..len).collect();
		}
		match self.mode {
			SampleMode::Random => {
				let mut rng = StdRng::seed_from_u64(self.seed);
				rand::seq::index::sample(&mut rng, len, self.max_nodes).into_vec()
			}
			SampleMode::Ordered => evenly_spaced(len, self.max_nodes),
		}
	}

	pub fn sample(&self, table: NodeTable) -> NodeTable {
		if table.len() <= self.max_nodes {
			return table;
		}
		let indices = self.select_indices(table.len());
		debug!(
			"{:?} sampling kept {} of {} nodes",
			self.mode,
			indices.len(),
			table.len()
		);
		table.select(&indices)
	}
}

/// `count` indices spread over `0..=len - 1`, rounded, strictly ascending.
/// Collisions are dropped so fewer than `count` may come back.
fn evenly_spaced(len: usize, count: usize) -> Vec<usize> {
	if len == 0 || count == 0 {
		return Vec::new();
	}
	if count == 1 {
		return vec![0];
	}
	let last = len - 1;
	let step = last as f64 / (count - 1) as f64;
	let mut indices: Vec<usize> = (0..count)
		.map(|i| ((i as f64 * step).round() as usize).min(last))
		.collect();
	indices.dedup();
	indices
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::model::node::{NodeRecord, Schema};
	use crate::model::vector3::Vector3;

	fn table_of(len: usize) -> NodeTable {
		let records = (0..len)
			.map(|i| {
				NodeRecord::new(
					(i % 11) as u32,
					i % 2 == 0,
					Vector3::new(i as f64, 0.0, 0.0),
					Vector3::new(0.5, 0.5, 0.5),
				)
			})
			.collect();
		NodeTable::new(Schema::default(), records)
	}

	#[test]
	fn below_cap_is_identity() {
		for mode in [SampleMode::Random, SampleMode::Ordered] {
			let table = table_of(50);
			assert_eq!(Sampler::new(50, mode).sample(table.clone()), table);
			assert_eq!(Sampler::new(1000, mode).sample(table.clone()), table);
		}
	}

	#[test]
	fn random_draw_is_reproducible() {
		let sampler = Sampler::new(100, SampleMode::Random);
		let first = sampler.select_indices(10_000);
		let second = sampler.select_indices(10_000);

		assert_eq!(first, second);
		assert_eq!(first.len(), 100);
		let distinct: HashSet<usize> = first.iter().copied().collect();
		assert_eq!(distinct.len(), 100);
		assert!(first.iter().all(|&i| i < 10_000));
	}

	#[test]
	fn random_sample_has_exactly_cap_rows() {
		let sampled = Sampler::new(64, SampleMode::Random).sample(table_of(1000));
		assert_eq!(sampled.len(), 64);
	}

	#[test]
	fn ordered_indices_are_strictly_increasing() {
		for (len, cap) in [(10, 3), (1000, 7), (101, 100), (5, 4), (12345, 999)] {
			let indices = Sampler::new(cap, SampleMode::Ordered).select_indices(len);
			assert!(indices.len() <= cap);
			assert!(indices.windows(2).all(|w| w[0] < w[1]));
			assert_eq!(indices.first(), Some(&0));
			assert_eq!(indices.last(), Some(&(len - 1)));
		}
	}

	#[test]
	fn ordered_indices_round_to_nearest() {
		assert_eq!(evenly_spaced(10, 4), vec![0, 3, 6, 9]);
		assert_eq!(evenly_spaced(11, 4), vec![0, 3, 7, 10]);
		assert_eq!(evenly_spaced(10, 1), vec![0]);
	}

	#[test]
	fn ordered_sample_is_a_subsequence() {
		let table = table_of(1000);
		let sampled = Sampler::new(30, SampleMode::Ordered).sample(table.clone());
		let xs: Vec<f64> = sampled.records().iter().map(|r| r.center.x).collect();
		assert!(xs.windows(2).all(|w| w[0] < w[1]));
		assert!(sampled
			.records()
			.iter()
			.all(|r| table.records().contains(r)));
	}
}
