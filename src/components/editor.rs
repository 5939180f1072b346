use std::collections::BTreeSet;

use leptos::prelude::*;

use super::asset_library::AssetLibrary;
use super::factory_graph::{Asset, FactoryCanvas, FactoryGraph, GraphError, Selection};
use super::insert_menu::InsertMenu;
use super::notices::{NoticeStack, Notices};
use super::property_panel::PropertyPanel;
use super::toolbar::EditorToolbar;
use crate::config::EditorSettings;

/// One-shot requests from the toolbar to the canvas viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasCommand {
	ZoomIn,
	ZoomOut,
	Fit,
}

/// Signals shared by every editor component.
#[derive(Clone, Copy)]
pub struct EditorContext {
	pub graph: RwSignal<FactoryGraph>,
	pub settings: RwSignal<EditorSettings>,
	pub selection: RwSignal<Selection>,
	pub notices: Notices,
	pub used_assets: Memo<BTreeSet<String>>,
	pub canvas_command: RwSignal<Option<CanvasCommand>>,
	/// Connection the insert menu will splice into, while it is open.
	pub insert_target: RwSignal<Option<String>>,
	pub library_open: RwSignal<bool>,
}

impl EditorContext {
	pub fn new(settings: EditorSettings) -> Self {
		let graph = RwSignal::new(FactoryGraph::default());
		Self {
			graph,
			settings: RwSignal::new(settings),
			selection: RwSignal::new(Selection::None),
			notices: Notices::default(),
			used_assets: Memo::new(move |_| graph.with(|g| g.used_asset_ids())),
			canvas_command: RwSignal::new(None),
			insert_target: RwSignal::new(None),
			library_open: RwSignal::new(true),
		}
	}

	/// Runs a graph action and turns a refusal into a notice.
	pub fn apply<U>(&self, action: impl FnOnce(&mut FactoryGraph) -> Result<U, GraphError>) -> Option<U> {
		match self.graph.try_update(action)? {
			Ok(value) => Some(value),
			Err(err) => {
				self.notices.report(&err);
				None
			}
		}
	}

	pub fn undo(&self) {
		self.apply(FactoryGraph::undo);
	}

	pub fn redo(&self) {
		self.apply(FactoryGraph::redo);
	}

	pub fn delete_selection(&self) {
		match self.selection.get_untracked() {
			Selection::Node(id) => {
				self.graph.update(|g| {
					g.remove_node(&id);
				});
			}
			Selection::Edge(id) => {
				self.graph.update(|g| {
					g.remove_edge(&id);
				});
			}
			Selection::None => return,
		}
		self.selection.set(Selection::None);
	}

	pub fn command(&self, command: CanvasCommand) {
		self.canvas_command.set(Some(command));
	}
}

/// The selected node's id and its current asset payload, if a node is selected.
fn selected_asset(graph: &FactoryGraph, selection: &Selection) -> Option<(String, Asset)> {
	let id = selection.node()?;
	graph.node(id).map(|n| (n.id.clone(), n.data.clone()))
}

#[component]
pub fn FactoryEditor() -> impl IntoView {
	let editor = EditorContext::new(EditorSettings::load());
	provide_context(editor);
	provide_context(editor.notices);

	Effect::new(move |_| editor.settings.with(EditorSettings::save));

	// Undo, redo and imports can remove whatever was selected.
	Effect::new(move |_| {
		let (stale_selection, stale_target) = editor.graph.with(|g| {
			let selection = editor.selection.with_untracked(|s| match s {
				Selection::Node(id) => g.node(id).is_none(),
				Selection::Edge(id) => g.edge(id).is_none(),
				Selection::None => false,
			});
			let target = editor
				.insert_target
				.with_untracked(|t| t.as_deref().is_some_and(|id| g.edge(id).is_none()));
			(selection, target)
		});
		if stale_selection {
			editor.selection.set(Selection::None);
		}
		if stale_target {
			editor.insert_target.set(None);
		}
	});

	// Keyed on the payload too, so undo and redo rebuild the property form.
	let selected = Memo::new(move |_| {
		editor
			.selection
			.with(|s| editor.graph.with(|g| selected_asset(g, s)))
	});

	view! {
		<div class="editor" data-theme=move || editor.settings.with(|s| s.theme.as_str())>
			<EditorToolbar />
			<div class="editor-body">
				<Show when=move || editor.library_open.get()>
					<AssetLibrary />
				</Show>
				<FactoryCanvas />
				{move || {
					selected
						.get()
						.map(|(node_id, asset)| view! { <PropertyPanel node_id base=asset /> })
				}}
			</div>
			<Show when=move || editor.insert_target.with(Option::is_some)>
				<InsertMenu />
			</Show>
			<NoticeStack />
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::catalog;
	use crate::components::factory_graph::Position;

	#[test]
	fn selected_asset_follows_undo_and_redo() {
		let mut g = FactoryGraph::default();
		let id = g
			.place_asset(catalog::find("weighbridge").unwrap(), Position::default())
			.unwrap();
		let selection = Selection::Node(id.clone());
		let before = selected_asset(&g, &selection).unwrap();

		let mut edited = before.1.clone();
		edited.zone = Some("Receiving".into());
		g.update_node_asset(&id, edited).unwrap();
		assert_eq!(selected_asset(&g, &selection).unwrap().1.zone.as_deref(), Some("Receiving"));

		g.undo().unwrap();
		assert_eq!(selected_asset(&g, &selection), Some(before));

		g.redo().unwrap();
		assert_eq!(selected_asset(&g, &selection).unwrap().1.zone.as_deref(), Some("Receiving"));

		g.move_node(&id, Position::new(40.0, 40.0));
		assert_eq!(selected_asset(&g, &selection).unwrap().1.zone.as_deref(), Some("Receiving"));
		assert_eq!(selected_asset(&g, &Selection::None), None);
	}
}
