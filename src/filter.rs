use log::debug;

use crate::error::PlotError;
use crate::model::node::{NodeRecord, NodeTable};
use crate::model::vector3::Axis;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
	pub axis: Axis,
	pub pos: f64,
}

impl Slice {
	/// Axis and position only make sense together.
	pub fn from_parts(axis: Option<Axis>, pos: Option<f64>) -> Result<Option<Slice>, PlotError> {
		match (axis, pos) {
			(None, None) => Ok(None),
			(Some(axis), Some(pos)) if pos.is_finite() => Ok(Some(Slice { axis, pos })),
			(Some(_), Some(pos)) => Err(PlotError::config(format!(
				"--slice-pos must be a finite number, got {}",
				pos
			))),
			_ => Err(PlotError::config(
				"--slice-axis and --slice-pos must be provided together",
			)),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
	pub level: Option<u32>,
	pub leaves_only: bool,
	pub slice: Option<Slice>,
}

impl Filter {
	pub fn matches(&self, record: &NodeRecord) -> bool {
		if let Some(level) = self.level {
			if record.level != level {
				return false;
			}
		}
		if self.leaves_only && !record.is_leaf {
			return false;
		}
		match self.slice {
			Some(Slice { axis, pos }) => record.spans(axis, pos),
			None => true,
		}
	}
}

/// Keeps the records matching every predicate in `filter`, in their original order.
/// An empty result is not an error here.
pub fn filter_rows(table: &NodeTable, filter: &Filter) -> NodeTable {
	let filtered = table.filtered(|record| filter.matches(record));
	debug!("filter {:?} kept {} of {} nodes", filter, filtered.len(), table.len());
	filtered
}
