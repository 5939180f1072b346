use leptos::prelude::*;

use super::catalog;
use super::editor::EditorContext;
use super::factory_graph::{Asset, Selection};

/// Picker for splicing an unused asset into the connection held in `insert_target`.
#[component]
pub fn InsertMenu() -> impl IntoView {
	let editor = expect_context::<EditorContext>();
	let query = RwSignal::new(String::new());
	let options = Memo::new(move |_| {
		let query = query.get();
		editor
			.used_assets
			.with(|used| catalog::available(&query, |id| used.contains(id)))
	});

	let close = move || {
		editor.insert_target.set(None);
		query.set(String::new());
	};
	let pick = move |asset: Asset| {
		let Some(edge_id) = editor.insert_target.get_untracked() else {
			return;
		};
		if let Some(node_id) = editor.apply(|g| g.insert_asset_on_edge(&edge_id, asset)) {
			editor.selection.set(Selection::Node(node_id));
		}
		close();
	};

	view! {
		<div class="modal-backdrop" on:click=move |_| close()>
			<div class="insert-menu" on:click=|ev| ev.stop_propagation()>
				<header class="panel-header">
					<h2>"Insert asset"</h2>
				</header>
				<input
					class="search"
					type="search"
					placeholder="Search unused assets..."
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
				/>
				<ul class="insert-options">
					{move || {
						options
							.get()
							.into_iter()
							.map(|asset| {
								let label = asset.name.clone();
								let group = asset.group.clone();
								let glyph = asset.icon_kind().glyph();
								view! {
									<li>
										<button class="insert-option" on:click=move |_| pick(asset.clone())>
											<span class="asset-icon">{glyph}</span>
											<span class="asset-name">{label}</span>
											<span class="muted">{group}</span>
										</button>
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
				<Show when=move || options.with(Vec::is_empty)>
					<p class="muted">"No unused assets match"</p>
				</Show>
				<footer class="panel-footer">
					<button class="secondary" on:click=move |_| close()>
						"Cancel"
					</button>
				</footer>
			</div>
		</div>
	}
}
