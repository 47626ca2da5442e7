//! Renders 2D projections of octree node tables exported by the simulation.
//!
//! Input is a CSV table (one row per node) or an HDF5 file holding `focus_octree` and
//! `global_octree` groups. Nodes are filtered, optionally put in space-filling-curve
//! order, sampled down to a bounded count and drawn as rectangles into a PNG.

mod csv_reader;
mod error;
mod filter;
mod hdf5_reader;
mod model;
mod ordering;
mod pipeline;
mod projection;
mod sampling;
mod writer;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::warn;

use error::PlotError;
use filter::{Filter, Slice};
use model::options::{PlotOptions, TreeSelector};
use model::vector3::Axis;

/// Plot a domain octree (HDF5 or CSV) exported by the simulation runner.
#[derive(Parser, Debug)]
#[command(name = "octree-plot")]
struct Args {
	/// Path to octree .h5 or .csv file.
	input: PathBuf,

	#[arg(short, long, default_value = PlotOptions::DEFAULT_OUTPUT)]
	output: PathBuf,

	/// Title for the plot.
	#[arg(long)]
	title: Option<String>,

	/// Octree group to plot for HDF5 input [default: focus].
	#[arg(long, value_enum)]
	tree: Option<TreeSelector>,

	/// Only plot nodes at this level.
	#[arg(long)]
	level: Option<u32>,

	/// Only plot leaf nodes.
	#[arg(long)]
	leaves_only: bool,

	/// Plot leaves in SFC order (implies --leaves-only).
	#[arg(long)]
	leaf_sfc_order: bool,

	#[arg(long, value_enum)]
	slice_axis: Option<Axis>,

	/// Slice position on the selected axis.
	#[arg(long, allow_negative_numbers = true)]
	slice_pos: Option<f64>,

	/// Maximum nodes to draw.
	#[arg(long, default_value_t = PlotOptions::DEFAULT_MAX_NODES)]
	max_nodes: usize,
}

impl Args {
	fn into_options(self) -> Result<PlotOptions, PlotError> {
		let slice = Slice::from_parts(self.slice_axis, self.slice_pos)?;
		if self.max_nodes == 0 {
			return Err(PlotError::config("--max-nodes must be at least 1"));
		}
		if self.tree.is_some() && !pipeline::is_hdf5(&self.input) {
			warn!("--tree only applies to HDF5 input; ignoring it for {}", self.input.display());
		}

		Ok(PlotOptions {
			input: self.input,
			output: self.output,
			title: self.title,
			tree: self.tree.unwrap_or(TreeSelector::Focus),
			filter: Filter {
				level: self.level,
				leaves_only: self.leaves_only || self.leaf_sfc_order,
				slice,
			},
			curve_order: self.leaf_sfc_order,
			max_nodes: self.max_nodes,
		})
	}
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

	let options = Args::parse().into_options()?;
	let summary = pipeline::run(&options)?;

	println!("Saved plot: {}", summary.output.display());
	println!("Plotted nodes: {}", summary.plotted);
	Ok(())
}
