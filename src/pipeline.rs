use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::csv_reader;
use crate::error::PlotError;
use crate::filter::filter_rows;
use crate::hdf5_reader;
use crate::model::node::NodeTable;
use crate::model::options::{PlotOptions, TreeSelector};
use crate::ordering::leaf_order;
use crate::projection::{project, ColorBy, Plane};
use crate::sampling::{SampleMode, Sampler};
use crate::writer::{write_png, RenderOptions};

pub struct Summary {
	pub output: PathBuf,
	pub plotted: usize,
}

pub fn is_hdf5(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| ext.eq_ignore_ascii_case("h5") || ext.eq_ignore_ascii_case("hdf5"))
		.unwrap_or(false)
}

/// Loads `path`, picking the encoding from its extension. `tree` only applies to HDF5.
pub fn load_table(path: &Path, tree: TreeSelector) -> Result<NodeTable, PlotError> {
	let with_path = |e: PlotError| match e {
		PlotError::Load(message) => PlotError::load(format!("{}: {}", path.display(), message)),
		other => other,
	};

	let table = if is_hdf5(path) {
		hdf5_reader::from_hdf5(path, tree).map_err(with_path)?
	} else {
		let buffer = fs::read(path).map_err(|e| PlotError::load(format!("{}: {}", path.display(), e)))?;
		csv_reader::from_csv(&buffer).map_err(with_path)?
	};
	info!("loaded {} nodes from {}", table.len(), path.display());
	Ok(table)
}

pub fn run(options: &PlotOptions) -> Result<Summary, PlotError> {
	let table = load_table(&options.input, options.tree)?;

	let mut filter = options.filter.clone();
	filter.leaves_only |= options.curve_order;
	let table = filter_rows(&table, &filter);

	let plane = Plane::for_slice(filter.slice.map(|slice| slice.axis));
	let (table, mode, color_by) = if options.curve_order {
		let order = leaf_order(&table)?;
		(table.select(&order), SampleMode::Ordered, ColorBy::CurveRank)
	} else {
		(table, SampleMode::Random, ColorBy::Level)
	};
	let table = Sampler::new(options.max_nodes, mode).sample(table);
	debug!("{} nodes left after sampling", table.len());

	let projection = project(&table, plane, color_by)?;
	let title = options.title.clone().unwrap_or_else(|| {
		options
			.input
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default()
	});
	write_png(&projection, &RenderOptions { title }, &options.output)?;

	Ok(Summary {
		output: options.output.clone(),
		plotted: projection.rects.len(),
	})
}
