mod canvas;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;
use ord_subset::OrdSubsetIterExt;
use tempfile::NamedTempFile;

use crate::error::PlotError;
use crate::projection::{ColorBy, Projection};
use canvas::Canvas;

const RECT_ALPHA_LEVEL: f64 = 0.30;
const RECT_ALPHA_CURVE: f64 = 0.38;
const PATH_COLOR: [u8; 3] = [255, 0, 0];
const PATH_ALPHA: f64 = 0.8;

pub struct RenderOptions {
	pub title: String,
}

fn render(projection: &Projection) -> image::RgbaImage {
	let values = projection.rects.iter().map(|r| r.value);
	let min = values.clone().ord_subset_min().unwrap_or(0.0);
	let max = values.ord_subset_max().unwrap_or(0.0);
	let alpha = match projection.color_by {
		ColorBy::Level => RECT_ALPHA_LEVEL,
		ColorBy::CurveRank => RECT_ALPHA_CURVE,
	};

	let mut canvas = Canvas::new(projection.bounds);
	canvas.draw_rects(&projection.rects, (min, max), alpha);
	if let Some(path) = &projection.path {
		canvas.draw_path(path, PATH_COLOR, PATH_ALPHA);
	}
	canvas.draw_frame();
	canvas.draw_colorbar();
	canvas.into_image()
}

fn encode<W: Write>(
	out: W,
	image: &image::RgbaImage,
	projection: &Projection,
	options: &RenderOptions,
) -> Result<(), PlotError> {
	let mut encoder = png::Encoder::new(out, image.width(), image.height());
	encoder.set_color(png::ColorType::Rgba);
	encoder.set_depth(png::BitDepth::Eight);
	encoder.add_text_chunk("Title".to_string(), options.title.clone())?;
	encoder.add_text_chunk(
		"Axes".to_string(),
		format!("{},{}", projection.plane.u, projection.plane.v),
	)?;
	encoder.add_text_chunk("Colorbar".to_string(), projection.color_by.label().to_string())?;

	let mut writer = encoder.write_header()?;
	writer.write_image_data(image.as_raw())?;
	writer.finish()?;
	Ok(())
}

/// Renders `projection` and writes it as a PNG at `path`, creating parent directories.
/// The file only appears once it is completely written.
pub fn write_png(projection: &Projection, options: &RenderOptions, path: &Path) -> Result<(), PlotError> {
	let write_error = |source: io::Error| PlotError::Write {
		path: path.to_path_buf(),
		source,
	};
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	fs::create_dir_all(dir).map_err(write_error)?;

	let image = render(projection);
	let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
	{
		let mut out = BufWriter::new(tmp.as_file_mut());
		encode(&mut out, &image, projection, options)?;
		out.flush().map_err(write_error)?;
	}
	tmp.persist(path).map_err(|e| write_error(e.error))?;

	info!(
		"wrote {}x{} image with {} rects to {}",
		image.width(),
		image.height(),
		projection.rects.len(),
		path.display()
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;
	use crate::model::node::{NodeRecord, NodeTable, Schema};
	use crate::model::vector3::Vector3;
	use crate::projection::{project, Plane};

	fn projection(color_by: ColorBy) -> Projection {
		let records = (0..8)
			.map(|i| {
				NodeRecord::new(
					i,
					true,
					Vector3::new(f64::from(i), f64::from(i % 3), 0.0),
					Vector3::new(0.5, 0.5, 0.5),
				)
			})
			.collect();
		let table = NodeTable::new(Schema::default(), records);
		project(&table, Plane::for_slice(None), color_by).unwrap()
	}

	#[test]
	fn writes_png_into_new_directory() -> Result<(), Box<dyn std::error::Error>> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("nested").join("plot.png");
		let options = RenderOptions {
			title: "levels".to_string(),
		};
		write_png(&projection(ColorBy::Level), &options, &path)?;

		let bytes = fs::read(&path)?;
		assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
		let leftovers = fs::read_dir(path.parent().unwrap())?.count();
		assert_eq!(leftovers, 1);
		Ok(())
	}

	#[test]
	fn curve_plot_draws_red_path() {
		let projection = projection(ColorBy::CurveRank);
		let image = render(&projection);
		let reddish = image
			.pixels()
			.filter(|p| p.0[0] > 200 && p.0[1] < 120 && p.0[2] < 120)
			.count();
		assert!(reddish > 0);
	}

	#[test]
	fn unwritable_target_is_a_write_error() -> Result<(), Box<dyn std::error::Error>> {
		let dir = tempfile::tempdir()?;
		let blocker = dir.path().join("file");
		fs::write(&blocker, b"not a directory")?;
		let options = RenderOptions {
			title: String::new(),
		};
		let result = write_png(&projection(ColorBy::Level), &options, &blocker.join("plot.png"));
		assert!(matches!(result, Err(PlotError::Write { .. })));
		Ok(())
	}
}
