//! Editor constants and persisted user preferences.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::components::factory_graph::EdgeStyle;

/// Media type carrying a JSON-encoded asset from the library to the canvas.
pub const DRAG_MIME: &str = "application/reactflow";
pub const SETTINGS_KEY: &str = "factory-editor.settings";

pub const LAYOUT_COLUMNS: usize = 4;
pub const LAYOUT_SPACING: (f64, f64) = (300.0, 150.0);
pub const LAYOUT_ORIGIN: (f64, f64) = (100.0, 100.0);

pub const NOTICE_TTL_MS: u64 = 4_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	Dark,
	Light,
}

impl Theme {
	pub fn toggled(self) -> Self {
		match self {
			Theme::Dark => Theme::Light,
			Theme::Light => Theme::Dark,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Dark => "dark",
			Theme::Light => "light",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
	pub theme: Theme,
	pub show_grid: bool,
	pub edge_style: EdgeStyle,
	pub show_minimap: bool,
}

impl Default for EditorSettings {
	fn default() -> Self {
		Self {
			theme: Theme::Dark,
			show_grid: true,
			edge_style: EdgeStyle::Bezier,
			show_minimap: true,
		}
	}
}

impl EditorSettings {
	/// Parses stored settings; anything unreadable falls back to defaults.
	pub fn parse(text: &str) -> Self {
		serde_json::from_str(text).unwrap_or_else(|e| {
			warn!("ignoring stored settings: {e}");
			Self::default()
		})
	}

	pub fn load() -> Self {
		match storage().and_then(|s| s.get_item(SETTINGS_KEY).ok().flatten()) {
			Some(text) => Self::parse(&text),
			None => Self::default(),
		}
	}

	pub fn save(&self) {
		let Some(storage) = storage() else {
			return;
		};
		match serde_json::to_string(self) {
			Ok(text) => {
				if storage.set_item(SETTINGS_KEY, &text).is_err() {
					warn!("could not persist settings");
				} else {
					debug!("settings saved");
				}
			}
			Err(e) => warn!("could not encode settings: {e}"),
		}
	}
}

fn storage() -> Option<web_sys::Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_take_defaults() {
		let settings = EditorSettings::parse(r#"{"theme":"light"}"#);
		assert_eq!(settings.theme, Theme::Light);
		assert!(settings.show_grid);
		assert_eq!(settings.edge_style, EdgeStyle::Bezier);
	}

	#[test]
	fn garbage_falls_back_to_defaults() {
		assert_eq!(EditorSettings::parse("{{"), EditorSettings::default());
		assert_eq!(
			EditorSettings::parse(r#"{"edgeStyle":"zigzag"}"#),
			EditorSettings::default()
		);
	}

	#[test]
	fn settings_round_trip_through_storage_text() {
		let settings = EditorSettings {
			theme: Theme::Light,
			show_grid: false,
			edge_style: EdgeStyle::Step,
			show_minimap: false,
		};
		let text = serde_json::to_string(&settings).unwrap();
		assert!(text.contains(r#""edgeStyle":"step""#));
		assert_eq!(EditorSettings::parse(&text), settings);
	}

	#[test]
	fn theme_toggles() {
		assert_eq!(Theme::Dark.toggled(), Theme::Light);
		assert_eq!(Theme::Light.toggled().as_str(), "dark");
	}
}
