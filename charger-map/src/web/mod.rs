//! Web layer: serves the map page, the live feature collection and the
//! marker style. Rendering itself happens in the browser.

mod routes;
mod state;
mod style;
pub mod templates;

pub use routes::{StatusResponse, create_router};
pub use state::AppState;
pub use style::{CircleLayerStyle, CirclePaint, LayerKind};
