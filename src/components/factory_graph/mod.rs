mod clock;
mod component;
mod error;
mod geometry;
mod history;
mod interaction;
mod render;
mod snapshot;
mod state;
mod types;

pub use component::FactoryCanvas;
pub use error::GraphError;
pub use interaction::Selection;
pub use state::FactoryGraph;
pub use types::{Asset, AssetTag, CalculationType, EdgeStyle, Position, ZoneDirection};
