use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use super::interaction::{CanvasState, ConnectState, DragState, PanState, Pick, Selection};
use super::render::{self, RenderOptions};
use super::types::{Asset, Position};
use crate::components::editor::{CanvasCommand, EditorContext};
use crate::config::DRAG_MIME;

const FRAME_SECONDS: f64 = 0.016;
const ZOOM_STEP: f64 = 1.2;

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Ends any drag, pan or pending connection. A drag that moved a card is committed.
fn finish_gestures(s: &mut CanvasState, editor: EditorContext) {
	let drag = std::mem::take(&mut s.drag);
	if let (Some(id), true) = (drag.node_id, drag.moved) {
		editor.graph.update(|g| {
			g.finish_move(&id);
		});
	}
	s.pan.active = false;
	s.connect = ConnectState::default();
}

#[component]
pub fn FactoryCanvas() -> impl IntoView {
	let editor = expect_context::<EditorContext>();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) = (state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas 2d context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(CanvasState::new(w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let drawn = {
				let mut guard = state_anim.borrow_mut();
				let Some(s) = guard.as_mut() else {
					return;
				};
				s.tick(FRAME_SECONDS);
				editor
					.settings
					.try_get_untracked()
					.zip(editor.selection.try_get_untracked())
					.and_then(|(settings, selection)| {
						let opts = RenderOptions {
							theme: settings.theme,
							show_grid: settings.show_grid,
							show_minimap: settings.show_minimap,
							selection: &selection,
						};
						editor
							.graph
							.try_with_untracked(|graph| render::render(s, graph, &opts, &ctx))
					})
					.is_some()
			};
			// The editor was torn down.
			if !drawn {
				return;
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_cmd = state.clone();
	Effect::new(move |_| {
		let Some(command) = editor.canvas_command.get() else {
			return;
		};
		if let Some(ref mut s) = *state_cmd.borrow_mut() {
			match command {
				CanvasCommand::ZoomIn => s.zoom_centered(ZOOM_STEP),
				CanvasCommand::ZoomOut => s.zoom_centered(1.0 / ZOOM_STEP),
				CanvasCommand::Fit => editor.graph.with_untracked(|g| s.fit(g)),
			}
		}
		editor.canvas_command.set(None);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.focus();
		}
		let mut guard = state_md.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};

		let selected_edge = editor.selection.with_untracked(|sel| sel.edge().map(str::to_string));
		let on_badge = selected_edge.as_deref().is_some_and(|id| {
			editor
				.graph
				.with_untracked(|g| s.hits_insert_badge(g, id, x, y))
		});
		if on_badge {
			editor.insert_target.set(selected_edge);
			return;
		}

		match editor.graph.with_untracked(|g| s.pick(g, x, y)) {
			Pick::SourceHandle(id) => {
				s.connect.source = Some(id);
				s.connect.pointer = s.screen_to_graph(x, y);
			}
			Pick::Node(id) => {
				let start = editor
					.graph
					.with_untracked(|g| g.node(&id).map(|n| n.position));
				if let Some(node_start) = start {
					s.drag = DragState {
						node_id: Some(id.clone()),
						start_x: x,
						start_y: y,
						node_start,
						moved: false,
					};
				}
				editor.selection.set(Selection::Node(id));
			}
			Pick::Edge(id) => editor.selection.set(Selection::Edge(id)),
			Pick::Empty => {
				s.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: s.transform.x,
					transform_start_y: s.transform.y,
				};
				editor.selection.set(Selection::None);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let mut guard = state_mm.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};

		if s.connect.source.is_some() {
			s.connect.pointer = s.screen_to_graph(x, y);
		} else if let Some(id) = s.drag.node_id.clone() {
			let k = s.transform.k;
			let (dx, dy) = ((x - s.drag.start_x) / k, (y - s.drag.start_y) / k);
			if dx != 0.0 || dy != 0.0 {
				s.drag.moved = true;
			}
			let to = Position::new(s.drag.node_start.x + dx, s.drag.node_start.y + dy);
			editor.graph.update(|g| {
				g.move_node(&id, to);
			});
		} else if s.pan.active {
			s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
			s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
		} else {
			let hovered = editor.graph.with_untracked(|g| match s.pick(g, x, y) {
				Pick::Node(id) | Pick::SourceHandle(id) => Some(id),
				_ => None,
			});
			s.set_hover(hovered);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = local_point(canvas_ref, &ev);
		let mut guard = state_mu.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		if let Some(source) = s.connect.source.take() {
			let target = point.and_then(|(x, y)| editor.graph.with_untracked(|g| s.drop_target(g, x, y)));
			// A card cannot feed itself.
			if let Some(target) = target.filter(|t| *t != source) {
				let style = editor.settings.with_untracked(|st| st.edge_style);
				editor.graph.update(|g| {
					g.connect(&source, &target, style);
				});
			}
		}
		finish_gestures(s, editor);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			finish_gestures(s, editor);
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let pick = state_dc
			.borrow()
			.as_ref()
			.map(|s| editor.graph.with_untracked(|g| s.pick(g, x, y)));
		if let Some(Pick::Edge(id)) = pick {
			editor.selection.set(Selection::Edge(id.clone()));
			editor.insert_target.set(Some(id));
		}
	};

	let state_kd = state.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		let modifier = ev.ctrl_key() || ev.meta_key();
		match ev.key().as_str() {
			"Delete" | "Backspace" => {
				ev.prevent_default();
				editor.delete_selection();
			}
			"z" | "Z" if modifier && ev.shift_key() => {
				ev.prevent_default();
				editor.redo();
			}
			"z" | "Z" if modifier => {
				ev.prevent_default();
				editor.undo();
			}
			"y" | "Y" if modifier => {
				ev.prevent_default();
				editor.redo();
			}
			"Escape" => {
				if let Some(ref mut s) = *state_kd.borrow_mut() {
					s.connect = ConnectState::default();
				}
				editor.selection.set(Selection::None);
			}
			_ => {}
		}
	};

	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		if let Some(dt) = ev.data_transfer() {
			dt.set_drop_effect("move");
		}
	};

	let state_dp = state.clone();
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let Some(raw) = ev.data_transfer().and_then(|dt| dt.get_data(DRAG_MIME).ok()) else {
			return;
		};
		if raw.is_empty() {
			return;
		}
		let asset: Asset = match serde_json::from_str(&raw) {
			Ok(asset) => asset,
			Err(err) => {
				log::warn!("ignoring dropped payload: {err}");
				return;
			}
		};
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let position = state_dp.borrow().as_ref().map(|s| s.screen_to_graph(x, y));
		if let Some(position) = position {
			if let Some(id) = editor.apply(|g| g.place_asset(asset, position)) {
				editor.selection.set(Selection::Node(id));
			}
		}
	};

	let insert_on_selected = move |_| {
		editor
			.insert_target
			.set(editor.selection.with_untracked(|s| s.edge().map(str::to_string)));
	};

	view! {
		<div class="canvas-wrap">
			<canvas
				node_ref=canvas_ref
				class="factory-canvas"
				tabindex="0"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:dblclick=on_dblclick
				on:keydown=on_keydown
				on:dragover=on_dragover
				on:drop=on_drop
				style="display: block; outline: none;"
			/>
			<Show when=move || editor.graph.with(|g| g.nodes().is_empty())>
				<div class="canvas-empty">
					<p>"Drag assets from the library onto the canvas"</p>
					<p class="muted">"Connect cards by dragging from the right handle of one card to another"</p>
				</div>
			</Show>
			<Show when=move || !editor.library_open.get()>
				<button class="library-toggle" on:click=move |_| editor.library_open.set(true)>
					"Show library"
				</button>
			</Show>
			<Show when=move || editor.selection.with(|s| s.edge().is_some())>
				<button class="insert-button" on:click=insert_on_selected>
					"+ Insert asset"
				</button>
			</Show>
		</div>
	}
}
