use crate::model::vector3::{Axis, Vector3};

/// Optional order-key columns, listed in the fixed order a loaded schema uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderField {
	StartKey,
	Prefixes,
	InternalToLeaf,
}

impl OrderField {
	pub const ALL: [OrderField; 3] = [
		OrderField::StartKey,
		OrderField::Prefixes,
		OrderField::InternalToLeaf,
	];

	pub fn name(&self) -> &'static str {
		match self {
			OrderField::StartKey => "start_key",
			OrderField::Prefixes => "prefixes",
			OrderField::InternalToLeaf => "internal_to_leaf",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderKeys {
	pub start_key: Option<u64>,
	pub prefixes: Option<u64>,
	pub internal_to_leaf: Option<i32>,
}

impl OrderKeys {
	pub fn has(&self, field: OrderField) -> bool {
		match field {
			OrderField::StartKey => self.start_key.is_some(),
			OrderField::Prefixes => self.prefixes.is_some(),
			OrderField::InternalToLeaf => self.internal_to_leaf.is_some(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
	pub level: u32,
	pub is_leaf: bool,
	pub center: Vector3,
	pub half_size: Vector3,
	pub keys: OrderKeys,
}

impl NodeRecord {
	pub fn new(level: u32, is_leaf: bool, center: Vector3, half_size: Vector3) -> NodeRecord {
		NodeRecord {
			level,
			is_leaf,
			center,
			half_size,
			keys: OrderKeys::default(),
		}
	}

	pub fn lower(&self) -> Vector3 {
		&self.center - &self.half_size
	}

	pub fn upper(&self) -> Vector3 {
		&self.center + &self.half_size
	}

	/// Closed-interval test: a node whose face lies exactly on `pos` contains it.
	pub fn spans(&self, axis: Axis, pos: f64) -> bool {
		self.lower().get(axis) <= pos && pos <= self.upper().get(axis)
	}
}

/// Which optional order-key columns a table carries. Every record agrees with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
	order_fields: Vec<OrderField>,
}

impl Schema {
	pub fn with_order_fields(fields: &[OrderField]) -> Schema {
		let order_fields = OrderField::ALL
			.iter()
			.copied()
			.filter(|field| fields.contains(field))
			.collect();
		Schema { order_fields }
	}

	pub fn has(&self, field: OrderField) -> bool {
		self.order_fields.contains(&field)
	}

	pub fn order_fields(&self) -> &[OrderField] {
		&self.order_fields
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeTable {
	schema: Schema,
	records: Vec<NodeRecord>,
}

impl NodeTable {
	pub fn new(schema: Schema, records: Vec<NodeRecord>) -> NodeTable {
		debug_assert!(records
			.iter()
			.all(|r| OrderField::ALL.iter().all(|f| r.keys.has(*f) == schema.has(*f))));
		NodeTable { schema, records }
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn records(&self) -> &[NodeRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// New table holding the records at `indices`, in that order.
	pub fn select(&self, indices: &[usize]) -> NodeTable {
		NodeTable {
			schema: self.schema.clone(),
			records: indices.iter().map(|&i| self.records[i].clone()).collect(),
		}
	}

	pub fn filtered<F>(&self, mut keep: F) -> NodeTable
	where
		F: FnMut(&NodeRecord) -> bool,
	{
		NodeTable {
			schema: self.schema.clone(),
			records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
		}
	}
}
