use std::str::FromStr;

use leptos::prelude::*;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, FileReader, HtmlAnchorElement, Url};

use super::editor::{CanvasCommand, EditorContext};
use super::factory_graph::EdgeStyle;
use super::notices::NoticeLevel;
use crate::config::Theme;

/// Saves `text` as a JSON file through a temporary object URL.
fn download(file_name: &str, text: &str) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

#[component]
pub fn EditorToolbar() -> impl IntoView {
	let editor = expect_context::<EditorContext>();
	let file_input = NodeRef::<leptos::html::Input>::new();

	let on_download = move |_| {
		let exported = editor
			.graph
			.with_untracked(|g| g.export_snapshot().map(|text| (g.export_file_name(), text)));
		match exported {
			Ok((name, text)) => {
				if let Err(err) = download(&name, &text) {
					log::error!("download failed: {err:?}");
					editor.notices.push(NoticeLevel::Error, "Download failed");
				}
			}
			Err(err) => editor.notices.report(&err),
		}
	};

	let on_file_chosen = move |_| {
		let Some(input) = file_input.get_untracked() else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		let reader = match FileReader::new() {
			Ok(reader) => reader,
			Err(err) => {
				log::error!("FileReader unavailable: {err:?}");
				return;
			}
		};
		let (reader_done, input_done, input_failed) = (reader.clone(), input.clone(), input.clone());
		let on_load = Closure::once_into_js(move || {
			let text = reader_done.result().ok().and_then(|r| r.as_string());
			input_done.set_value("");
			let Some(text) = text else {
				editor.notices.push(NoticeLevel::Error, "Could not read the file");
				return;
			};
			if editor.apply(|g| g.import_snapshot(&text)).is_some() {
				editor.notices.push(NoticeLevel::Info, "Configuration loaded");
				editor.command(CanvasCommand::Fit);
			}
		});
		let on_error = Closure::once_into_js(move || {
			log::error!("reading the chosen file failed");
			input_failed.set_value("");
			editor.notices.push(NoticeLevel::Error, "Could not read the file");
		});
		reader.set_onload(Some(on_load.unchecked_ref()));
		reader.set_onerror(Some(on_error.unchecked_ref()));
		if let Err(err) = reader.read_as_text(&file) {
			log::error!("could not read {}: {err:?}", file.name());
			input.set_value("");
			editor.notices.push(NoticeLevel::Error, "Could not read the file");
		}
	};

	let open_file = move |_| {
		if let Some(input) = file_input.get_untracked() {
			input.click();
		}
	};

	let reset_layout = move |_| {
		editor.graph.update(|g| g.reset_layout());
		editor.command(CanvasCommand::Fit);
	};

	view! {
		<header class="toolbar">
			<h1 class="title">"Factory Loss Graphical Editor"</h1>
			<span class="muted counts">
				{move || {
					editor
						.graph
						.with(|g| format!("{} assets · {} connections", g.nodes().len(), g.edges().len()))
				}}
			</span>
			<div class="toolbar-group">
				<button
					title="Undo (Ctrl+Z)"
					disabled=move || !editor.graph.with(|g| g.can_undo())
					on:click=move |_| editor.undo()
				>
					"↶"
				</button>
				<button
					title="Redo (Ctrl+Shift+Z)"
					disabled=move || !editor.graph.with(|g| g.can_redo())
					on:click=move |_| editor.redo()
				>
					"↷"
				</button>
			</div>
			<div class="toolbar-group">
				<button title="Zoom in" on:click=move |_| editor.command(CanvasCommand::ZoomIn)>
					"+"
				</button>
				<button title="Zoom out" on:click=move |_| editor.command(CanvasCommand::ZoomOut)>
					"−"
				</button>
				<button title="Fit view" on:click=move |_| editor.command(CanvasCommand::Fit)>
					"⤢"
				</button>
				<button title="Reset layout" on:click=reset_layout>
					"Reset layout"
				</button>
			</div>
			<div class="toolbar-group">
				<select
					title="Connection style"
					on:change=move |ev| {
						if let Ok(style) = EdgeStyle::from_str(&event_target_value(&ev)) {
							editor.settings.update(|s| s.edge_style = style);
						}
					}
				>
					{EdgeStyle::iter()
						.map(|style| {
							view! {
								<option
									value=style.to_string()
									selected=move || editor.settings.with(|s| s.edge_style == style)
								>
									{style.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
				<button
					title="Toggle grid"
					class:active=move || editor.settings.with(|s| s.show_grid)
					on:click=move |_| editor.settings.update(|s| s.show_grid = !s.show_grid)
				>
					"Grid"
				</button>
				<button
					title="Toggle minimap"
					class:active=move || editor.settings.with(|s| s.show_minimap)
					on:click=move |_| editor.settings.update(|s| s.show_minimap = !s.show_minimap)
				>
					"Map"
				</button>
				<button
					title="Toggle theme"
					on:click=move |_| editor.settings.update(|s| s.theme = s.theme.toggled())
				>
					{move || match editor.settings.with(|s| s.theme) {
						Theme::Dark => "☀",
						Theme::Light => "☾",
					}}
				</button>
			</div>
			<div class="toolbar-group">
				<input
					node_ref=file_input
					type="file"
					accept=".json,application/json"
					style="display: none;"
					on:change=on_file_chosen
				/>
				<button title="Load a saved configuration" on:click=open_file>
					"Upload"
				</button>
				<button class="primary" title="Save the configuration as JSON" on:click=on_download>
					"Download"
				</button>
			</div>
		</header>
	}
}
