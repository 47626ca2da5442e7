use std::path::PathBuf;

use clap::ValueEnum;

use crate::filter::Filter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TreeSelector {
	Focus,
	Global,
}

impl TreeSelector {
	pub fn group_name(&self) -> &'static str {
		match self {
			TreeSelector::Focus => "focus_octree",
			TreeSelector::Global => "global_octree",
		}
	}
}

#[derive(Clone, Debug)]
pub struct PlotOptions {
	pub input: PathBuf,
	pub output: PathBuf,
	pub title: Option<String>,
	pub tree: TreeSelector,
	pub filter: Filter,
	/// Plot leaves in space-filling-curve order instead of by level.
	pub curve_order: bool,
	pub max_nodes: usize,
}

impl PlotOptions {
	pub const DEFAULT_MAX_NODES: usize = 25000;
	pub const DEFAULT_OUTPUT: &'static str = "octree_plot.png";
}
