use std::str::FromStr;

use leptos::prelude::*;
use strum::IntoEnumIterator;

use super::editor::EditorContext;
use super::factory_graph::{Asset, AssetTag, CalculationType, Selection, ZoneDirection};
use super::notices::NoticeLevel;

const TAG_SLOTS: [&str; 2] = ["t1", "t2"];

fn tag_id(asset_id: &str, slot: &str) -> String {
	format!("{asset_id}-{slot}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct TagDraft {
	pub name: String,
	pub zone_in_out: ZoneDirection,
	pub calculation_type: CalculationType,
}

impl Default for TagDraft {
	fn default() -> Self {
		Self {
			name: String::new(),
			zone_in_out: ZoneDirection::In,
			calculation_type: CalculationType::default(),
		}
	}
}

/// Form state for a node's asset while it is being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetDraft {
	pub name: String,
	pub zone: String,
	pub zone_in_out: Option<ZoneDirection>,
	pub tags: [TagDraft; 2],
}

impl AssetDraft {
	pub fn from_asset(asset: &Asset) -> Self {
		let tags = TAG_SLOTS.map(|slot| {
			let id = tag_id(&asset.id, slot);
			asset
				.tags
				.iter()
				.find(|t| t.id == id)
				.map(|t| TagDraft {
					name: t.name.clone(),
					zone_in_out: t.zone_in_out,
					calculation_type: t.calculation_type,
				})
				.unwrap_or_default()
		});
		Self {
			name: asset.name.clone(),
			zone: asset.zone.clone().unwrap_or_default(),
			zone_in_out: asset.zone_in_out,
			tags,
		}
	}

	/// Folds the draft back into `base`. Blank tag slots are left out and a
	/// blank name keeps the original one.
	pub fn to_asset(&self, base: &Asset) -> Asset {
		let tags = TAG_SLOTS
			.iter()
			.zip(&self.tags)
			.filter(|(_, t)| !t.name.trim().is_empty())
			.map(|(slot, t)| AssetTag {
				id: tag_id(&base.id, slot),
				name: t.name.trim().to_string(),
				zone_in_out: t.zone_in_out,
				calculation_type: t.calculation_type,
			})
			.collect();
		let name = self.name.trim();
		let zone = self.zone.trim();
		Asset {
			name: if name.is_empty() {
				base.name.clone()
			} else {
				name.to_string()
			},
			zone: (!zone.is_empty()).then(|| zone.to_string()),
			zone_in_out: self.zone_in_out,
			tags,
			..base.clone()
		}
	}
}

/// Edits `base`, the node's asset as it is now. The editor remounts the panel
/// whenever that payload changes, so the form never shows stale values.
#[component]
pub fn PropertyPanel(node_id: String, base: Asset) -> impl IntoView {
	let editor = expect_context::<EditorContext>();
	let draft = RwSignal::new(AssetDraft::from_asset(&base));
	let tab = RwSignal::new(0usize);

	let close = move |_| editor.selection.set(Selection::None);
	let apply = move |_| {
		let asset = draft.with_untracked(|d| d.to_asset(&base));
		if editor
			.apply(|g| g.update_node_asset(&node_id, asset))
			.is_some()
		{
			editor.notices.push(NoticeLevel::Info, "Changes applied");
		}
	};

	view! {
		<aside class="properties">
			<header class="panel-header">
				<h2>"Properties"</h2>
				<button class="icon-button" title="Close" on:click=close>
					"×"
				</button>
			</header>
			<div class="panel-body">
				<label class="field">
					<span>"Asset Name"</span>
					<input
						type="text"
						prop:value=move || draft.with(|d| d.name.clone())
						on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
					/>
				</label>
				<label class="field">
					<span>"Zone Name"</span>
					<input
						type="text"
						placeholder="Enter zone name"
						prop:value=move || draft.with(|d| d.zone.clone())
						on:input=move |ev| draft.update(|d| d.zone = event_target_value(&ev))
					/>
				</label>
				<label class="field">
					<span>"Zone In/Out"</span>
					<select on:change=move |ev| {
						let direction = ZoneDirection::from_str(&event_target_value(&ev)).ok();
						draft.update(|d| d.zone_in_out = direction);
					}>
						<option value="" selected=move || draft.with(|d| d.zone_in_out.is_none())>
							"Select zone direction"
						</option>
						{ZoneDirection::iter()
							.map(|dir| {
								view! {
									<option
										value=dir.to_string()
										selected=move || draft.with(|d| d.zone_in_out == Some(dir))
									>
										{dir.to_string()}
									</option>
								}
							})
							.collect_view()}
					</select>
				</label>

				<div class="tabs">
					{TAG_SLOTS
						.iter()
						.enumerate()
						.map(|(i, slot)| {
							view! {
								<button
									class="tab"
									class:active=move || tab.get() == i
									on:click=move |_| tab.set(i)
								>
									{slot.to_uppercase()}
								</button>
							}
						})
						.collect_view()}
				</div>
				{move || view! { <TagEditor draft index=tab.get() /> }}
			</div>
			<footer class="panel-footer">
				<button class="primary" on:click=apply>
					"Apply Changes"
				</button>
			</footer>
		</aside>
	}
}

#[component]
fn TagEditor(draft: RwSignal<AssetDraft>, index: usize) -> impl IntoView {
	let tag = move || draft.with(|d| d.tags[index].clone());

	view! {
		<div class="tag-editor">
			<label class="field">
				<span>"Tag Name"</span>
				<input
					type="text"
					placeholder="Enter tag name"
					prop:value=move || tag().name
					on:input=move |ev| draft.update(|d| d.tags[index].name = event_target_value(&ev))
				/>
			</label>
			<label class="field">
				<span>"Zone In/Out"</span>
				<select on:change=move |ev| {
					if let Ok(dir) = ZoneDirection::from_str(&event_target_value(&ev)) {
						draft.update(|d| d.tags[index].zone_in_out = dir);
					}
				}>
					{ZoneDirection::iter()
						.map(|dir| {
							view! {
								<option value=dir.to_string() selected=move || tag().zone_in_out == dir>
									{dir.to_string()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
			<label class="field">
				<span>"Calculation Type"</span>
				<select on:change=move |ev| {
					if let Ok(calc) = CalculationType::from_str(&event_target_value(&ev)) {
						draft.update(|d| d.tags[index].calculation_type = calc);
					}
				}>
					{CalculationType::iter()
						.map(|calc| {
							view! {
								<option value=calc.to_string() selected=move || tag().calculation_type == calc>
									{calc.to_string()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
		</div>
	}
}
