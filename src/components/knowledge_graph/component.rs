use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use log::{debug, error, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::panels::{GraphToolbar, NodeDetailsPanel, RankingTable, TrustMeter};
use super::render;
use super::surface::ViewTransform;
use crate::components::notifications::{Notifications, use_notifications};
use crate::graph::derive::TrustScore;
use crate::graph::scene::{Scene, SceneOptions};
use crate::graph::selection::NodeDetails;
use crate::graph::{
	FilterLevel, GraphConfig, GraphData, GraphError, KnowledgeGraph, NotifyLevel, RankingRow, Result,
	ViewMode,
};

/// Reactive mirror of the graph state the view reads.
#[derive(Clone, Copy)]
struct GraphSignals {
	scene: RwSignal<Scene>,
	revision: StoredValue<u64>,
	details: RwSignal<Option<NodeDetails>>,
	trust: RwSignal<TrustScore>,
	filter: RwSignal<FilterLevel>,
	view_mode: RwSignal<ViewMode>,
	ranking: RwSignal<Vec<RankingRow>>,
	refreshing: RwSignal<bool>,
}

impl GraphSignals {
	fn new(kg: &KnowledgeGraph) -> Self {
		Self {
			scene: RwSignal::new(kg.scene().clone()),
			revision: StoredValue::new(kg.revision()),
			details: RwSignal::new(kg.details()),
			trust: RwSignal::new(kg.trust_score()),
			filter: RwSignal::new(kg.filter()),
			view_mode: RwSignal::new(kg.view_mode()),
			ranking: RwSignal::new(kg.ranking()),
			refreshing: RwSignal::new(kg.is_refreshing()),
		}
	}

	fn publish(&self, kg: &KnowledgeGraph) {
		if self.revision.get_value() != kg.revision() {
			self.revision.set_value(kg.revision());
			self.scene.set(kg.scene().clone());
		}
		self.details.set(kg.details());
		self.trust.set(kg.trust_score());
		self.filter.set(kg.filter());
		self.view_mode.set(kg.view_mode());
		self.ranking.set(kg.ranking());
		self.refreshing.set(kg.is_refreshing());
	}
}

/// Translates UI events into graph commands and republishes the result.
#[derive(Clone, Copy)]
struct GraphHandle {
	graph: StoredValue<KnowledgeGraph, LocalStorage>,
	signals: GraphSignals,
	notifications: Notifications,
}

impl GraphHandle {
	/// Runs `command` and republishes. `None` once the view is unmounted.
	fn apply(
		&self,
		command: impl FnOnce(&mut KnowledgeGraph) -> Result<()>,
	) -> Option<Result<()>> {
		self.graph.try_update_value(|kg| {
			let outcome = command(kg);
			self.signals.publish(kg);
			outcome
		})
	}

	/// Runs a user command; failures become error toasts.
	fn dispatch(&self, command: impl FnOnce(&mut KnowledgeGraph) -> Result<()>) {
		match self.apply(command) {
			Some(Ok(())) => {}
			Some(Err(err)) => {
				warn!("graph command failed: {err}");
				self.notifications.push(err.to_string(), NotifyLevel::Error);
			}
			None => debug!("graph command dropped after unmount"),
		}
	}

	fn refresh_delay(&self) -> Duration {
		let ms = self
			.graph
			.with_value(|kg| kg.config().refresh_delay_ms);
		Duration::from_millis(u64::from(ms))
	}
}

/// Initialization failures are handed to the page's error boundary rather
/// than toasted.
fn initialization_error(outcome: Option<Result<()>>) -> Option<GraphError> {
	match outcome {
		Some(Err(err)) => {
			error!("knowledge graph failed to initialize: {err}");
			Some(err)
		}
		_ => None,
	}
}

fn cursor_over(scene: &Scene, x: f64, y: f64) -> &'static str {
	if scene.node_at(x, y).is_some() {
		"pointer"
	} else {
		"default"
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn canvas_size(canvas: &HtmlCanvasElement, fallback: (f64, f64)) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or(fallback)
}

/// Knowledge-graph viewer: toolbar, canvas (or ranking table), trust meter
/// and node detail panel.
#[component]
pub fn KnowledgeGraphView(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = 1000)] refresh_delay_ms: u32,
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let notifications = use_notifications();
	let config = GraphConfig {
		scene: SceneOptions {
			width,
			height,
			..SceneOptions::default()
		},
		refresh_delay_ms,
		seed: js_sys::Date::now() as u64,
		..GraphConfig::default()
	};
	let kg = KnowledgeGraph::new(config, Box::new(notifications));
	let signals = GraphSignals::new(&kg);
	let handle = GraphHandle {
		graph: StoredValue::new_local(kg),
		signals,
		notifications,
	};

	let init_error = RwSignal::new(None::<GraphError>);
	Effect::new(move |_| {
		let data = data.get();
		let outcome = handle.apply(|kg| kg.initialize_graph(&data));
		init_error.set(initialization_error(outcome));
	});

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let resized = RwSignal::new(0u32);
	let resize_listener = window_event_listener(ev::resize, move |_| {
		resized.update(|n| *n = n.wrapping_add(1));
	});
	on_cleanup(move || resize_listener.remove());

	Effect::new(move |_| {
		resized.track();
		let mode = signals.view_mode.get();
		let scene = signals.scene.get();
		if !mode.uses_graph_renderer() {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, (scene.width, scene.height));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let Some(ctx) = context_2d(&canvas) else {
			error!("2d canvas context unavailable");
			return;
		};
		let transform = ViewTransform::fit(scene.width, scene.height, w, h);
		render::render(&scene, &transform, &ctx, w, h);
	});

	let graph_point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		let (sx, sy) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let scene = signals.scene.read_untracked();
		let transform = ViewTransform::fit(scene.width, scene.height, rect.width(), rect.height());
		Some(transform.screen_to_graph(sx, sy))
	};

	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = graph_point(&ev) else {
			return;
		};
		let hit = signals
			.scene
			.with_untracked(|scene| scene.node_at(x, y).map(str::to_string));
		if let Some(id) = hit {
			handle.dispatch(|kg| kg.select_node(&id).map(|_| ()));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = graph_point(&ev) else {
			return;
		};
		let cursor = signals
			.scene
			.with_untracked(|scene| cursor_over(scene, x, y));
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let on_filter = Callback::new(move |level: String| {
		handle.dispatch(|kg| kg.set_filter(&level).map(|_| ()));
	});
	let on_search = Callback::new(move |query: String| {
		handle.dispatch(|kg| {
			kg.search(&query);
			Ok(())
		});
	});
	let on_refresh = Callback::new(move |_: ()| {
		if signals.refreshing.get_untracked() {
			return;
		}
		handle.dispatch(|kg| {
			kg.begin_refresh();
			Ok(())
		});
		set_timeout(
			move || {
				handle.dispatch(|kg| {
					kg.refresh();
					Ok(())
				})
			},
			handle.refresh_delay(),
		);
	});
	let on_view = Callback::new(move |mode: String| {
		handle.dispatch(|kg| kg.set_view_mode(&mode).map(|_| ()));
	});
	let on_toggle_view = Callback::new(move |_: ()| {
		handle.dispatch(|kg| {
			kg.toggle_view_mode();
			Ok(())
		});
	});
	let on_select = Callback::new(move |id: String| {
		handle.dispatch(|kg| kg.select_node(&id).map(|_| ()));
	});
	let on_close = Callback::new(move |_: ()| {
		handle.dispatch(|kg| {
			kg.close_selection();
			Ok(())
		});
	});

	view! {
		<section class="knowledge-graph">
			{move || init_error.get().map_or(Ok(()), Err)}
			<GraphToolbar
				filter=signals.filter
				view_mode=signals.view_mode
				refreshing=signals.refreshing
				on_filter=on_filter
				on_search=on_search
				on_refresh=on_refresh
				on_view=on_view
				on_toggle_view=on_toggle_view
			/>
			<div class="graph-body">
				<div
					class="graph-visualization"
					style:display=move || {
						if signals.view_mode.get().uses_graph_renderer() { "block" } else { "none" }
					}
				>
					<canvas
						node_ref=canvas_ref
						class="knowledge-graph-canvas"
						on:click=on_click
						on:mousemove=on_mousemove
						style="display: block; width: 100%; height: 100%;"
					/>
				</div>
				<Show when=move || signals.view_mode.get() == ViewMode::Ranking>
					<RankingTable rows=signals.ranking on_select=on_select />
				</Show>
				<aside class="graph-sidebar">
					<TrustMeter trust=signals.trust />
					<NodeDetailsPanel details=signals.details on_select=on_select on_close=on_close />
				</aside>
			</div>
		</section>
	}
}
