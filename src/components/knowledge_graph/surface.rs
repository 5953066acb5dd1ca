/// Maps the fixed graph coordinate space onto the canvas, preserving aspect
/// ratio and centring the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn fit(graph_w: f64, graph_h: f64, canvas_w: f64, canvas_h: f64) -> Self {
		if graph_w <= 0.0 || graph_h <= 0.0 || canvas_w <= 0.0 || canvas_h <= 0.0 {
			return Self::default();
		}
		let k = (canvas_w / graph_w).min(canvas_h / graph_h);
		Self {
			x: (canvas_w - graph_w * k) / 2.0,
			y: (canvas_h - graph_h * k) / 2.0,
			k,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_when_sizes_match() {
		let t = ViewTransform::fit(800.0, 600.0, 800.0, 600.0);
		assert_eq!(t, ViewTransform::default());
		assert_eq!(t.screen_to_graph(400.0, 300.0), (400.0, 300.0));
	}

	#[test]
	fn letterboxes_wide_canvas() {
		let t = ViewTransform::fit(800.0, 600.0, 1600.0, 600.0);
		assert_eq!(t.k, 1.0);
		assert_eq!(t.x, 400.0);
		assert_eq!(t.screen_to_graph(800.0, 300.0), (400.0, 300.0));
	}

	#[test]
	fn scales_down_small_canvas() {
		let t = ViewTransform::fit(800.0, 600.0, 400.0, 300.0);
		assert_eq!(t.k, 0.5);
		assert_eq!(t.screen_to_graph(100.0, 50.0), (200.0, 100.0));
	}

	#[test]
	fn degenerate_canvas_falls_back() {
		assert_eq!(
			ViewTransform::fit(800.0, 600.0, 0.0, 0.0),
			ViewTransform::default()
		);
	}
}
