use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::surface::ViewTransform;
use crate::graph::scene::{Scene, SceneNode, SceneText};

const BACKGROUND: &str = "#1a1a2e";
const SELECTED_RING: &str = "rgba(255, 255, 255, 0.85)";

/// Draws `scene` onto a canvas of `width` x `height` pixels.
pub fn render(
	scene: &Scene,
	transform: &ViewTransform,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) {
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	draw_edges(scene, ctx);
	for node in &scene.nodes {
		draw_node(node, ctx);
	}
	ctx.restore();
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for line in &scene.lines {
		ctx.set_global_alpha(line.opacity);
		ctx.set_stroke_style_str(line.stroke);
		ctx.set_line_width(line.width);
		ctx.begin_path();
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node(node: &SceneNode, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(node.opacity);

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(node.fill);
	ctx.fill();
	ctx.set_stroke_style_str(node.stroke);
	ctx.set_line_width(node.stroke_width);
	ctx.stroke();

	if node.selected {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius + 4.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(SELECTED_RING);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}

	draw_text(&node.label, ctx);
	draw_text(&node.confidence, ctx);
	if let Some(warning) = &node.warning {
		draw_text(warning, ctx);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_text(text: &SceneText, ctx: &CanvasRenderingContext2d) {
	let weight = if text.bold { "bold " } else { "" };
	ctx.set_font(&format!("{weight}{}px sans-serif", text.font_size));
	ctx.set_text_align("center");
	ctx.set_fill_style_str(text.fill);
	let _ = ctx.fill_text(&text.text, text.x, text.y);
}
