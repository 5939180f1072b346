use std::collections::BTreeSet;

use leptos::prelude::*;
use web_sys::DragEvent;

use super::catalog::{self, AssetGroup};
use super::editor::EditorContext;
use super::factory_graph::{Asset, GraphError};
use crate::config::DRAG_MIME;

/// Searchable, grouped list of catalog assets that can be dragged onto the canvas.
#[component]
pub fn AssetLibrary() -> impl IntoView {
	let editor = expect_context::<EditorContext>();
	let query = RwSignal::new(String::new());
	let collapsed = RwSignal::new(BTreeSet::<String>::new());
	let groups = Memo::new(move |_| query.with(|q| catalog::filter_groups(q)));

	view! {
		<aside class="library">
			<header class="panel-header">
				<h2>"Asset Library"</h2>
				<button
					class="icon-button"
					title="Hide library"
					on:click=move |_| editor.library_open.set(false)
				>
					"«"
				</button>
			</header>
			<input
				class="search"
				type="search"
				placeholder="Search assets..."
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<div class="library-groups">
				{move || {
					groups
						.get()
						.into_iter()
						.map(|group| view! { <GroupSection group collapsed /> })
						.collect_view()
				}}
				<Show when=move || groups.with(Vec::is_empty)>
					<p class="muted">"No assets match your search"</p>
				</Show>
			</div>
		</aside>
	}
}

#[component]
fn GroupSection(group: AssetGroup, collapsed: RwSignal<BTreeSet<String>>) -> impl IntoView {
	let AssetGroup { name, assets } = group;
	let count = assets.len();
	let is_open = {
		let name = name.clone();
		move || collapsed.with(|c| !c.contains(&name))
	};
	let toggle = {
		let name = name.clone();
		move |_| {
			collapsed.update(|c| {
				if !c.remove(&name) {
					c.insert(name.clone());
				}
			})
		}
	};
	let chevron = {
		let is_open = is_open.clone();
		move || if is_open() { "▾" } else { "▸" }
	};

	view! {
		<section class="library-group">
			<button class="group-header" on:click=toggle>
				<span class="chevron">{chevron}</span>
				<span class="group-name">{name}</span>
				<span class="count">{count}</span>
			</button>
			{move || {
				is_open()
					.then(|| {
						assets
							.iter()
							.cloned()
							.map(|asset| view! { <AssetCard asset /> })
							.collect_view()
					})
			}}
		</section>
	}
}

#[component]
fn AssetCard(asset: Asset) -> impl IntoView {
	let editor = expect_context::<EditorContext>();
	let used = {
		let id = asset.id.clone();
		Memo::new(move |_| editor.used_assets.with(|u| u.contains(&id)))
	};
	let payload = serde_json::to_string(&asset);
	let name = asset.name.clone();

	let on_dragstart = move |ev: DragEvent| {
		if used.get_untracked() {
			ev.prevent_default();
			editor
				.notices
				.report(&GraphError::AssetAlreadyUsed(name.clone()));
			return;
		}
		let Some(dt) = ev.data_transfer() else {
			return;
		};
		match &payload {
			Ok(json) => {
				// A drag without the payload would drop nothing, so cancel it.
				if let Err(err) = dt.set_data(DRAG_MIME, json) {
					log::error!("could not attach asset to the drag: {err:?}");
					ev.prevent_default();
					return;
				}
				dt.set_effect_allowed("move");
			}
			Err(err) => log::error!("could not encode asset for dragging: {err}"),
		}
	};

	view! {
		<div
			class="asset-card"
			class:used=move || used.get()
			draggable=move || if used.get() { "false" } else { "true" }
			title=asset.kind.clone()
			on:dragstart=on_dragstart
		>
			<span class="asset-icon">{asset.icon_kind().glyph()}</span>
			<span class="asset-name">{asset.name.clone()}</span>
			<Show when=move || used.get()>
				<span class="badge">"Used"</span>
			</Show>
		</div>
	}
}
