use ord_subset::OrdSubsetIterExt;

/// Axis-aligned rectangle on the projection plane, tagged with the value used for coloring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub lu: f64,
	pub lv: f64,
	pub uu: f64,
	pub uv: f64,
}

impl Bounds {
	pub fn new(lu: f64, lv: f64, uu: f64, uv: f64) -> Bounds {
		Bounds { lu, lv, uu, uv }
	}

	pub fn size_u(&self) -> f64 {
		(self.uu - self.lu).abs()
	}

	pub fn size_v(&self) -> f64 {
		(self.uv - self.lv).abs()
	}

	/// Union of all rectangle extents. `None` when there are no rectangles.
	pub fn of_rects(rects: &[Rect]) -> Option<Bounds> {
		let lu = rects.iter().map(|r| r.x).ord_subset_min()?;
		let lv = rects.iter().map(|r| r.y).ord_subset_min()?;
		let uu = rects.iter().map(|r| r.x + r.width).ord_subset_max()?;
		let uv = rects.iter().map(|r| r.y + r.height).ord_subset_max()?;
		Some(Bounds::new(lu, lv, uu, uv))
	}

	/// Widens a zero-length side by one unit around its midpoint.
	pub fn non_degenerate(&self) -> Bounds {
		let mut bounds = *self;
		if bounds.size_u() == 0.0 {
			bounds.lu -= 0.5;
			bounds.uu += 0.5;
		}
		if bounds.size_v() == 0.0 {
			bounds.lv -= 0.5;
			bounds.uv += 0.5;
		}
		bounds
	}
}
