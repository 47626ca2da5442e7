use image::{Rgba, RgbaImage};

use crate::model::bounds::{Bounds, Rect};

pub const IMAGE_SIZE: u32 = 1440;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 90.0;
const COLORBAR_GAP: f64 = 30.0;
const COLORBAR_WIDTH: f64 = 40.0;

const BLACK: [u8; 3] = [0, 0, 0];

// viridis, sampled at eighths
const VIRIDIS: [[u8; 3]; 9] = [
	[68, 1, 84],
	[71, 44, 122],
	[59, 81, 139],
	[44, 113, 142],
	[33, 144, 141],
	[39, 173, 129],
	[92, 200, 99],
	[170, 220, 50],
	[253, 231, 37],
];

/// Color for `t` in [0, 1]; values outside are clamped.
pub fn viridis(t: f64) -> [u8; 3] {
	let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
	let scaled = t * (VIRIDIS.len() - 1) as f64;
	let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
	let f = scaled - i as f64;
	let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
	let mix = |k: usize| (f64::from(a[k]) + (f64::from(b[k]) - f64::from(a[k])) * f).round() as u8;
	[mix(0), mix(1), mix(2)]
}

/// Maps plot coordinates to pixels with one scale for both axes.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
	bounds: Bounds,
	scale: f64,
	left: f64,
	bottom: f64,
}

impl Transform {
	pub fn fit(bounds: Bounds, width: u32, height: u32) -> Transform {
		let bounds = bounds.non_degenerate();
		let area_w = f64::from(width) - MARGIN_LEFT - MARGIN_RIGHT;
		let area_h = f64::from(height) - MARGIN_TOP - MARGIN_BOTTOM;
		let scale = (area_w / bounds.size_u()).min(area_h / bounds.size_v());
		let plot_w = bounds.size_u() * scale;
		let plot_h = bounds.size_v() * scale;
		Transform {
			bounds,
			scale,
			left: MARGIN_LEFT + (area_w - plot_w) / 2.0,
			bottom: MARGIN_TOP + (area_h + plot_h) / 2.0,
		}
	}

	pub fn x(&self, u: f64) -> f64 {
		self.left + (u - self.bounds.lu) * self.scale
	}

	pub fn y(&self, v: f64) -> f64 {
		self.bottom - (v - self.bounds.lv) * self.scale
	}

	fn plot_right(&self) -> f64 {
		self.x(self.bounds.uu)
	}

	fn plot_top(&self) -> f64 {
		self.y(self.bounds.uv)
	}
}

pub struct Canvas {
	image: RgbaImage,
	transform: Transform,
}

impl Canvas {
	pub fn new(bounds: Bounds) -> Canvas {
		Canvas {
			image: RgbaImage::from_pixel(IMAGE_SIZE, IMAGE_SIZE, Rgba([255, 255, 255, 255])),
			transform: Transform::fit(bounds, IMAGE_SIZE, IMAGE_SIZE),
		}
	}

	pub fn into_image(self) -> RgbaImage {
		self.image
	}

	fn blend(&mut self, x: i64, y: i64, color: [u8; 3], alpha: f64) {
		if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height()) {
			return;
		}
		let pixel = self.image.get_pixel_mut(x as u32, y as u32);
		for k in 0..3 {
			let dst = f64::from(pixel.0[k]);
			pixel.0[k] = (f64::from(color[k]) * alpha + dst * (1.0 - alpha)).round() as u8;
		}
	}

	fn fill_box(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3], alpha: f64) {
		for y in y0..y1 {
			for x in x0..x1 {
				self.blend(x, y, color, alpha);
			}
		}
	}

	fn outline_box(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3], alpha: f64) {
		for x in x0..x1 {
			self.blend(x, y0, color, alpha);
			if y1 - 1 > y0 {
				self.blend(x, y1 - 1, color, alpha);
			}
		}
		for y in (y0 + 1)..(y1 - 1) {
			self.blend(x0, y, color, alpha);
			if x1 - 1 > x0 {
				self.blend(x1 - 1, y, color, alpha);
			}
		}
	}

	/// Pixel box of a rectangle, at least one pixel on each side.
	fn pixel_box(&self, rect: &Rect) -> (i64, i64, i64, i64) {
		let t = &self.transform;
		let x0 = t.x(rect.x).round() as i64;
		let x1 = (t.x(rect.x + rect.width).round() as i64).max(x0 + 1);
		let y0 = t.y(rect.y + rect.height).round() as i64;
		let y1 = (t.y(rect.y).round() as i64).max(y0 + 1);
		(x0, y0, x1, y1)
	}

	/// Faces colored by value over `range`, edges black, both at `alpha`.
	pub fn draw_rects(&mut self, rects: &[Rect], range: (f64, f64), alpha: f64) {
		let (min, max) = range;
		let span = max - min;
		for rect in rects {
			let t = if span > 0.0 { (rect.value - min) / span } else { 0.0 };
			let (x0, y0, x1, y1) = self.pixel_box(rect);
			self.fill_box(x0, y0, x1, y1, viridis(t), alpha);
			self.outline_box(x0, y0, x1, y1, BLACK, alpha);
		}
	}

	pub fn draw_path(&mut self, points: &[(f64, f64)], color: [u8; 3], alpha: f64) {
		let t = self.transform;
		for pair in points.windows(2) {
			let (u0, v0) = pair[0];
			let (u1, v1) = pair[1];
			self.line(
				(t.x(u0).round() as i64, t.y(v0).round() as i64),
				(t.x(u1).round() as i64, t.y(v1).round() as i64),
				color,
				alpha,
			);
		}
	}

	// Bresenham; the end pixel is left to the next segment so joints are not blended twice.
	fn line(&mut self, from: (i64, i64), to: (i64, i64), color: [u8; 3], alpha: f64) {
		let (mut x, mut y) = from;
		let dx = (to.0 - x).abs();
		let dy = -(to.1 - y).abs();
		let sx = if x < to.0 { 1 } else { -1 };
		let sy = if y < to.1 { 1 } else { -1 };
		let mut err = dx + dy;
		while (x, y) != to {
			self.blend(x, y, color, alpha);
			let e2 = 2 * err;
			if e2 >= dy {
				err += dy;
				x += sx;
			}
			if e2 <= dx {
				err += dx;
				y += sy;
			}
		}
	}

	pub fn draw_frame(&mut self) {
		let t = self.transform;
		let x0 = t.x(t.bounds.lu).round() as i64;
		let x1 = t.plot_right().round() as i64 + 1;
		let y0 = t.plot_top().round() as i64;
		let y1 = t.y(t.bounds.lv).round() as i64 + 1;
		self.outline_box(x0, y0, x1, y1, BLACK, 1.0);
	}

	/// Vertical gradient right of the plot, low values at the bottom.
	pub fn draw_colorbar(&mut self) {
		let t = self.transform;
		let x0 = (t.plot_right() + COLORBAR_GAP).round() as i64;
		let x1 = x0 + COLORBAR_WIDTH as i64;
		let y0 = t.plot_top().round() as i64;
		let y1 = t.y(t.bounds.lv).round() as i64 + 1;
		let height = (y1 - y0 - 1).max(1) as f64;
		for y in y0..y1 {
			let color = viridis((y1 - 1 - y) as f64 / height);
			self.fill_box(x0, y, x1, y + 1, color, 1.0);
		}
		self.outline_box(x0, y0, x1, y1, BLACK, 1.0);
	}

	#[cfg(test)]
	pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
		self.image.get_pixel(x, y).0
	}

	#[cfg(test)]
	pub fn transform(&self) -> Transform {
		self.transform
	}
}
