use log::debug;

use crate::error::PlotError;
use crate::model::node::{NodeTable, OrderField, Schema};

/// Candidates for the leaf curve order, most authoritative first. The first one present wins.
const PRIORITY: [OrderField; 3] = [
	OrderField::InternalToLeaf,
	OrderField::StartKey,
	OrderField::Prefixes,
];

pub fn resolve_order_field(schema: &Schema) -> Result<OrderField, PlotError> {
	PRIORITY
		.iter()
		.copied()
		.find(|field| schema.has(*field))
		.ok_or(PlotError::OrderingUnavailable)
}

/// Permutation of `table`'s indices sorting its leaves along the space-filling curve.
/// Ties keep their input order.
pub fn leaf_order(table: &NodeTable) -> Result<Vec<usize>, PlotError> {
	let field = resolve_order_field(table.schema())?;
	let records = table.records();
	let mut order: Vec<usize> = (0..records.len()).collect();

	match field {
		OrderField::InternalToLeaf => order.sort_by_key(|&i| records[i].keys.internal_to_leaf),
		OrderField::StartKey => order.sort_by_key(|&i| records[i].keys.start_key),
		OrderField::Prefixes => order.sort_by_key(|&i| records[i].keys.prefixes),
	}
	debug!("ordered {} leaves by {}", order.len(), field.name());

	Ok(order)
}
