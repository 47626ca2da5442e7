use std::path::Path;

use crate::error::PlotError;
use crate::model::node::NodeTable;
use crate::model::options::TreeSelector;

#[cfg(feature = "hdf5")]
pub fn from_hdf5(path: &Path, tree: TreeSelector) -> Result<NodeTable, PlotError> {
	use hdf5::{File, Group, H5Type};
	use log::debug;

	use crate::model::node::{NodeRecord, OrderField, OrderKeys, Schema};
	use crate::model::vector3::Vector3;

	fn column<T: H5Type>(group: &Group, name: &str, len: Option<usize>) -> Result<Vec<T>, PlotError> {
		let values = group
			.dataset(name)
			.and_then(|dataset| dataset.read_raw::<T>())
			.map_err(|e| PlotError::load(format!("dataset '{}': {}", name, e)))?;
		match len {
			Some(len) if values.len() != len => Err(PlotError::load(format!(
				"dataset '{}' has {} entries, expected {}",
				name,
				values.len(),
				len
			))),
			_ => Ok(values),
		}
	}

	fn optional<T: H5Type>(group: &Group, name: &str, len: usize) -> Result<Option<Vec<T>>, PlotError> {
		if group.link_exists(name) {
			column(group, name, Some(len)).map(Some)
		} else {
			Ok(None)
		}
	}

	let file = File::open(path).map_err(|e| PlotError::load(e.to_string()))?;
	let group_name = tree.group_name();
	if !file.link_exists(group_name) {
		return Err(PlotError::load(format!("Group '{}' not found", group_name)));
	}
	let group = file
		.group(group_name)
		.map_err(|e| PlotError::load(format!("group '{}': {}", group_name, e)))?;

	let level: Vec<u32> = column(&group, "level", None)?;
	let n = level.len();
	if n == 0 {
		return Err(PlotError::load(format!("group '{}' holds no nodes", group_name)));
	}
	let is_leaf: Vec<u32> = column(&group, "is_leaf", Some(n))?;
	let cx: Vec<f64> = column(&group, "cx", Some(n))?;
	let cy: Vec<f64> = column(&group, "cy", Some(n))?;
	let cz: Vec<f64> = column(&group, "cz", Some(n))?;
	let sx: Vec<f64> = column(&group, "sx", Some(n))?;
	let sy: Vec<f64> = column(&group, "sy", Some(n))?;
	let sz: Vec<f64> = column(&group, "sz", Some(n))?;

	let start_key: Option<Vec<u64>> = optional(&group, "start_key", n)?;
	let prefixes: Option<Vec<u64>> = optional(&group, "prefixes", n)?;
	let internal_to_leaf: Option<Vec<i32>> = optional(&group, "internal_to_leaf", n)?;

	let mut fields = Vec::new();
	if start_key.is_some() {
		fields.push(OrderField::StartKey);
	}
	if prefixes.is_some() {
		fields.push(OrderField::Prefixes);
	}
	if internal_to_leaf.is_some() {
		fields.push(OrderField::InternalToLeaf);
	}
	let schema = Schema::with_order_fields(&fields);

	let records = (0..n)
		.map(|i| NodeRecord {
			level: level[i],
			is_leaf: is_leaf[i] != 0,
			center: Vector3::new(cx[i], cy[i], cz[i]),
			half_size: Vector3::new(sx[i], sy[i], sz[i]),
			keys: OrderKeys {
				start_key: start_key.as_ref().map(|keys| keys[i]),
				prefixes: prefixes.as_ref().map(|keys| keys[i]),
				internal_to_leaf: internal_to_leaf.as_ref().map(|keys| keys[i]),
			},
		})
		.collect();
	debug!(
		"read {} nodes from group '{}' with order fields {:?}",
		n,
		group_name,
		schema.order_fields()
	);

	Ok(NodeTable::new(schema, records))
}

#[cfg(not(feature = "hdf5"))]
pub fn from_hdf5(_path: &Path, _tree: TreeSelector) -> Result<NodeTable, PlotError> {
	Err(PlotError::load(
		"HDF5 input requires building with the `hdf5` feature",
	))
}

#[cfg(all(test, feature = "hdf5"))]
mod tests {
	use std::fs;

	use hdf5::File;

	use crate::csv_reader;
	use crate::error::PlotError;
	use crate::hdf5_reader::from_hdf5;
	use crate::model::node::{NodeTable, OrderField};
	use crate::model::options::TreeSelector;

	fn write_group(file: &File, name: &str, table: &NodeTable, internal_to_leaf: bool) -> hdf5::Result<()> {
		let group = file.create_group(name)?;
		let records = table.records();
		let level: Vec<u32> = records.iter().map(|r| r.level).collect();
		let is_leaf: Vec<u32> = records.iter().map(|r| r.is_leaf as u32).collect();
		group.new_dataset_builder().with_data(&level).create("level")?;
		group.new_dataset_builder().with_data(&is_leaf).create("is_leaf")?;
		for (field, values) in [
			("cx", records.iter().map(|r| r.center.x).collect::<Vec<f64>>()),
			("cy", records.iter().map(|r| r.center.y).collect()),
			("cz", records.iter().map(|r| r.center.z).collect()),
			("sx", records.iter().map(|r| r.half_size.x).collect()),
			("sy", records.iter().map(|r| r.half_size.y).collect()),
			("sz", records.iter().map(|r| r.half_size.z).collect()),
		] {
			group.new_dataset_builder().with_data(&values).create(field)?;
		}
		if internal_to_leaf {
			let ranks: Vec<i32> = (0..records.len() as i32).rev().collect();
			group.new_dataset_builder().with_data(&ranks).create("internal_to_leaf")?;
		}
		Ok(())
	}

	#[test]
	fn both_encodings_load_the_same_nodes() -> Result<(), Box<dyn std::error::Error>> {
		let csv_table = csv_reader::from_csv(&fs::read("resources/nodes_basic.csv")?)?;
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("tree.h5");
		{
			let file = File::create(&path)?;
			write_group(&file, "focus_octree", &csv_table, true)?;
			write_group(&file, "global_octree", &csv_table, false)?;
		}

		let focus = from_hdf5(&path, TreeSelector::Focus)?;
		let global = from_hdf5(&path, TreeSelector::Global)?;

		assert_eq!(global, csv_table);
		assert_eq!(focus.len(), csv_table.len());
		for (a, b) in focus.records().iter().zip(csv_table.records()) {
			assert_eq!((a.level, a.is_leaf, a.center, a.half_size), (b.level, b.is_leaf, b.center, b.half_size));
		}
		assert_eq!(focus.schema().order_fields(), &[OrderField::InternalToLeaf]);
		Ok(())
	}

	#[test]
	fn missing_group_is_a_load_error() -> Result<(), Box<dyn std::error::Error>> {
		let csv_table = csv_reader::from_csv(&fs::read("resources/nodes_basic.csv")?)?;
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("focus_only.h5");
		{
			let file = File::create(&path)?;
			write_group(&file, "focus_octree", &csv_table, false)?;
		}

		let result = from_hdf5(&path, TreeSelector::Global);
		assert!(matches!(result, Err(PlotError::Load(_))));
		Ok(())
	}
}
