use crate::error::PlotError;
use crate::model::bounds::{Bounds, Rect};
use crate::model::node::NodeTable;
use crate::model::vector3::Axis;

/// The displayed pair of axes, `u` horizontal and `v` vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plane {
	pub u: Axis,
	pub v: Axis,
}

impl Plane {
	/// Plane orthogonal to the slice axis; (x, y) when not slicing.
	pub fn for_slice(axis: Option<Axis>) -> Plane {
		match axis {
			Some(Axis::X) => Plane { u: Axis::Y, v: Axis::Z },
			Some(Axis::Y) => Plane { u: Axis::X, v: Axis::Z },
			Some(Axis::Z) | None => Plane { u: Axis::X, v: Axis::Y },
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorBy {
	Level,
	/// Rank along the space-filling curve, with a path through consecutive centers.
	CurveRank,
}

impl ColorBy {
	pub fn label(&self) -> &'static str {
		match self {
			ColorBy::Level => "octree level",
			ColorBy::CurveRank => "Ordering in SFC Curve",
		}
	}
}

#[derive(Clone, Debug)]
pub struct Projection {
	pub plane: Plane,
	pub color_by: ColorBy,
	pub rects: Vec<Rect>,
	pub path: Option<Vec<(f64, f64)>>,
	pub bounds: Bounds,
}

pub fn project(table: &NodeTable, plane: Plane, color_by: ColorBy) -> Result<Projection, PlotError> {
	let Plane { u, v } = plane;
	let rects: Vec<Rect> = table
		.records()
		.iter()
		.enumerate()
		.map(|(rank, record)| {
			let lower = record.lower();
			let extent = record.half_size * 2.0;
			Rect {
				x: lower.get(u),
				y: lower.get(v),
				width: extent.get(u),
				height: extent.get(v),
				value: match color_by {
					ColorBy::Level => f64::from(record.level),
					ColorBy::CurveRank => rank as f64,
				},
			}
		})
		.collect();

	let bounds = Bounds::of_rects(&rects).ok_or(PlotError::EmptyResult)?;
	let path = match color_by {
		ColorBy::CurveRank => Some(
			table
				.records()
				.iter()
				.map(|record| (record.center.get(u), record.center.get(v)))
				.collect(),
		),
		ColorBy::Level => None,
	};

	Ok(Projection {
		plane,
		color_by,
		rects,
		path,
		bounds,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::node::{NodeRecord, Schema};
	use crate::model::vector3::Vector3;

	fn single(center: Vector3, half: Vector3, level: u32) -> NodeTable {
		NodeTable::new(Schema::default(), vec![NodeRecord::new(level, true, center, half)])
	}

	#[test]
	fn rect_geometry_on_xy() -> Result<(), PlotError> {
		let table = single(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.5, 0.25, 0.1), 6);
		let projection = project(&table, Plane::for_slice(None), ColorBy::Level)?;

		assert_eq!(
			projection.rects,
			vec![Rect {
				x: 0.5,
				y: 1.75,
				width: 1.0,
				height: 0.5,
				value: 6.0,
			}]
		);
		assert_eq!(projection.bounds, Bounds::new(0.5, 1.75, 1.5, 2.25));
		assert!(projection.path.is_none());
		Ok(())
	}

	#[test]
	fn slice_axis_picks_orthogonal_plane() {
		assert_eq!(Plane::for_slice(Some(Axis::X)), Plane { u: Axis::Y, v: Axis::Z });
		assert_eq!(Plane::for_slice(Some(Axis::Y)), Plane { u: Axis::X, v: Axis::Z });
		assert_eq!(Plane::for_slice(Some(Axis::Z)), Plane { u: Axis::X, v: Axis::Y });
	}

	#[test]
	fn yz_plane_uses_y_and_z() -> Result<(), PlotError> {
		let table = single(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.5, 0.25, 0.125), 0);
		let projection = project(&table, Plane::for_slice(Some(Axis::X)), ColorBy::Level)?;
		let rect = projection.rects[0];
		assert_eq!((rect.x, rect.y), (1.75, 2.875));
		assert_eq!((rect.width, rect.height), (0.5, 0.25));
		Ok(())
	}

	#[test]
	fn curve_rank_follows_table_order() -> Result<(), PlotError> {
		let records = vec![
			NodeRecord::new(3, true, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5)),
			NodeRecord::new(3, true, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5)),
			NodeRecord::new(3, true, Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.5, 0.5, 0.5)),
		];
		let table = NodeTable::new(Schema::default(), records);
		let projection = project(&table, Plane::for_slice(None), ColorBy::CurveRank)?;

		let ranks: Vec<f64> = projection.rects.iter().map(|r| r.value).collect();
		assert_eq!(ranks, vec![0.0, 1.0, 2.0]);
		assert_eq!(
			projection.path,
			Some(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
		);
		Ok(())
	}

	#[test]
	fn empty_table_cannot_be_projected() {
		let table = NodeTable::new(Schema::default(), Vec::new());
		assert!(matches!(
			project(&table, Plane::for_slice(None), ColorBy::Level),
			Err(PlotError::EmptyResult)
		));
	}
}
