use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::Deserialize;

use crate::error::PlotError;
use crate::model::node::{NodeRecord, NodeTable, OrderField, OrderKeys, Schema};
use crate::model::vector3::Vector3;

const REQUIRED_COLUMNS: [&str; 8] = ["level", "is_leaf", "cx", "cy", "cz", "sx", "sy", "sz"];

#[derive(Debug, Deserialize)]
struct Row {
	level: u32,
	is_leaf: u8,
	cx: f64,
	cy: f64,
	cz: f64,
	sx: f64,
	sy: f64,
	sz: f64,
	start_key: Option<u64>,
	// simulator CSV exports name this column `prefix`
	#[serde(alias = "prefix")]
	prefixes: Option<u64>,
	internal_to_leaf: Option<i32>,
}

fn header_schema(headers: &StringRecord) -> Result<Schema, PlotError> {
	let has = |name: &str| headers.iter().any(|h| h == name);

	for column in REQUIRED_COLUMNS {
		if !has(column) {
			return Err(PlotError::load(format!("missing required column '{}'", column)));
		}
	}

	let mut fields = Vec::new();
	if has("start_key") {
		fields.push(OrderField::StartKey);
	}
	if has("prefixes") || has("prefix") {
		fields.push(OrderField::Prefixes);
	}
	if has("internal_to_leaf") {
		fields.push(OrderField::InternalToLeaf);
	}
	Ok(Schema::with_order_fields(&fields))
}

fn check_keys(keys: &OrderKeys, schema: &Schema, line: usize) -> Result<(), PlotError> {
	for field in schema.order_fields() {
		if !keys.has(*field) {
			return Err(PlotError::load(format!(
				"row {}: missing value for '{}'",
				line,
				field.name()
			)));
		}
	}
	Ok(())
}

pub fn from_csv(buf: &[u8]) -> Result<NodeTable, PlotError> {
	let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(buf);
	let headers = rdr
		.headers()
		.map_err(|e| PlotError::load(format!("unreadable header: {}", e)))?
		.clone();
	let schema = header_schema(&headers)?;

	let mut records: Vec<NodeRecord> = Vec::new();
	for (i, result) in rdr.deserialize().enumerate() {
		// header is line 1
		let line = i + 2;
		let row: Row = result.map_err(|e| PlotError::load(format!("row {}: {}", line, e)))?;

		let Row {
			level,
			is_leaf,
			cx,
			cy,
			cz,
			sx,
			sy,
			sz,
			start_key,
			prefixes,
			internal_to_leaf,
		} = row;
		let keys = OrderKeys {
			start_key,
			prefixes,
			internal_to_leaf,
		};
		check_keys(&keys, &schema, line)?;

		records.push(NodeRecord {
			level,
			is_leaf: is_leaf != 0,
			center: Vector3::new(cx, cy, cz),
			half_size: Vector3::new(sx, sy, sz),
			keys,
		});
	}

	if records.is_empty() {
		return Err(PlotError::load("no rows found"));
	}
	debug!(
		"parsed {} csv rows with order fields {:?}",
		records.len(),
		schema.order_fields()
	);

	Ok(NodeTable::new(schema, records))
}
