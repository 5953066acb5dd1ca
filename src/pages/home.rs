use leptos::prelude::*;

use crate::components::knowledge_graph::KnowledgeGraphView;
use crate::graph::seed::reference_dataset;

/// Knowledge-graph page seeded with the reference project dataset.
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(reference_dataset);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-page">
				<div class="graph-header">
					<h1>"Project Knowledge Graph"</h1>
					<p class="subtitle">
						"Click a variable for details. Filter by confidence or search by name."
					</p>
				</div>
				<KnowledgeGraphView data=graph_data />
			</div>
		</ErrorBoundary>
	}
}
