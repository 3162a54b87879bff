//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::FeatureStore;

use super::style::CircleLayerStyle;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live feature collection, published by the pipeline
    pub store: FeatureStore,

    /// Marker style handed to the map
    pub style: Arc<CircleLayerStyle>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: FeatureStore, style: CircleLayerStyle) -> Self {
        Self {
            store,
            style: Arc::new(style),
        }
    }
}
