use std::f64::consts::PI;

use leptos::prelude::*;

use crate::graph::derive::{METER_RADIUS, TrustScore};
use crate::graph::selection::NodeDetails;
use crate::graph::{FilterLevel, RankingRow, ViewMode};

#[component]
pub fn GraphToolbar(
	#[prop(into)] filter: Signal<FilterLevel>,
	#[prop(into)] view_mode: Signal<ViewMode>,
	#[prop(into)] refreshing: Signal<bool>,
	on_filter: Callback<String>,
	on_search: Callback<String>,
	on_refresh: Callback<()>,
	on_view: Callback<String>,
	on_toggle_view: Callback<()>,
) -> impl IntoView {
	let filter_buttons = FilterLevel::ALL
		.into_iter()
		.map(|level| {
			view! {
				<button
					class="filter-btn"
					class:active=move || filter.get() == level
					on:click=move |_| on_filter.run(level.as_str().to_string())
				>
					{level.caption()}
				</button>
			}
		})
		.collect_view();

	let view_buttons = ViewMode::ALL
		.into_iter()
		.map(|mode| {
			view! {
				<button
					class="view-btn"
					class:active=move || view_mode.get() == mode
					on:click=move |_| on_view.run(mode.as_str().to_string())
				>
					{mode.as_str()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="graph-toolbar">
			<div class="confidence-filters">{filter_buttons}</div>
			<input
				type="search"
				class="graph-search"
				placeholder="Search variables..."
				on:input=move |ev| on_search.run(event_target_value(&ev))
			/>
			<div class="view-modes">
				{view_buttons}
				<button class="view-toggle" on:click=move |_| on_toggle_view.run(())>
					"Next view"
				</button>
			</div>
			<button
				class="refresh-btn"
				disabled=move || refreshing.get()
				on:click=move |_| on_refresh.run(())
			>
				{move || if refreshing.get() { "Refreshing..." } else { "Refresh" }}
			</button>
		</div>
	}
}

#[component]
pub fn TrustMeter(#[prop(into)] trust: Signal<TrustScore>) -> impl IntoView {
	let circumference = 2.0 * PI * METER_RADIUS;

	view! {
		<div class="trust-meter">
			<svg viewBox="0 0 200 200">
				<circle cx="100" cy="100" r=METER_RADIUS.to_string() fill="none" stroke="#2a2a3e" stroke-width="12" />
				<circle
					cx="100"
					cy="100"
					r=METER_RADIUS.to_string()
					fill="none"
					stroke="#00ff88"
					stroke-width="12"
					stroke-linecap="round"
					transform="rotate(-90 100 100)"
					stroke-dasharray=circumference.to_string()
					stroke-dashoffset=move || trust.get().meter_offset().to_string()
				/>
			</svg>
			<div class="trust-score-value">{move || format!("{}%", trust.get().percent)}</div>
			<div class="trust-score-label">{move || trust.get().level.label()}</div>
		</div>
	}
}

#[component]
pub fn NodeDetailsPanel(
	#[prop(into)] details: Signal<Option<NodeDetails>>,
	on_select: Callback<String>,
	on_close: Callback<()>,
) -> impl IntoView {
	move || {
		details.get().map(|d| {
			let related = d
				.related_nodes
				.into_iter()
				.map(|node| {
					let id = node.id;
					view! {
						<span class="related-node" on:click=move |_| on_select.run(id.clone())>
							{node.label}
						</span>
					}
				})
				.collect_view();

			let uncertain = d.uncertain;
			view! {
				<aside class="node-details" data-node-id=d.id>
					<header>
						<h3>{d.label}</h3>
						<button class="close-btn" on:click=move |_| on_close.run(())>
							"×"
						</button>
					</header>
					<div class="confidence-bar">
						<div
							class="confidence-fill"
							style:width=format!("{}%", d.confidence_percent)
						></div>
					</div>
					<span class="confidence-value">{format!("{}%", d.confidence_percent)}</span>
					<dl class="node-stats">
						<dt>"Sources"</dt>
						<dd>{d.source_count_estimate}</dd>
						<dt>"Updated"</dt>
						<dd>{d.last_updated}</dd>
						<dt>"Connections"</dt>
						<dd>{d.connection_count}</dd>
					</dl>
					<p class="node-description">{d.description}</p>
					{uncertain
						.then(|| {
							view! {
								<div class="uncertainty-notice">
									"Low confidence: verify against source documents before relying on this variable."
								</div>
							}
						})}
					<div class="related-nodes-list">{related}</div>
				</aside>
			}
		})
	}
}

#[component]
pub fn RankingTable(
	#[prop(into)] rows: Signal<Vec<RankingRow>>,
	on_select: Callback<String>,
) -> impl IntoView {
	view! {
		<table class="variables-ranking">
			<thead>
				<tr>
					<th>"#"</th>
					<th>"Variable"</th>
					<th>"Confidence"</th>
					<th>"Importance"</th>
				</tr>
			</thead>
			<tbody>
				{move || {
					rows.get()
						.into_iter()
						.map(|row| {
							let id = row.id;
							view! {
								<tr on:click=move |_| on_select.run(id.clone())>
									<td>{row.rank}</td>
									<td>{row.label}</td>
									<td style:color=row.color>{format!("{}%", row.confidence)}</td>
									<td>{row.tier.as_str()}</td>
								</tr>
							}
						})
						.collect_view()
				}}
			</tbody>
		</table>
	}
}
