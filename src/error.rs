use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
	/// Flags that depend on each other were supplied inconsistently.
	#[error("configuration error: {0}")]
	Configuration(String),

	#[error("{0}")]
	Load(String),

	#[error(
		"Cannot determine leaf SFC order: expected one of 'internal_to_leaf', 'start_key', or 'prefixes' in input data"
	)]
	OrderingUnavailable,

	#[error("No nodes remain after filtering; nothing to plot")]
	EmptyResult,

	#[error("failed to write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("png encoding failed: {0}")]
	Encode(#[from] png::EncodingError),
}

impl PlotError {
	pub fn load(message: impl Into<String>) -> PlotError {
		PlotError::Load(message.into())
	}

	pub fn config(message: impl Into<String>) -> PlotError {
		PlotError::Configuration(message.into())
	}
}
