pub mod asset_library;
pub mod catalog;
pub mod editor;
pub mod factory_graph;
pub mod insert_menu;
pub mod notices;
pub mod property_panel;
pub mod toolbar;
