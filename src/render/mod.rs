mod json_contract;
mod null_renderer;
mod primitives;
mod scene;

pub use json_contract::{SCENE_JSON_SCHEMA_V1, SceneJsonContractV1};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive, TextHAlign,
    TextPrimitive, Vertex,
};
pub use scene::{ChartState, LegendEntry, Placeholder, Scene, SceneSeries};

use crate::error::ChartResult;

/// Contract implemented by any painting backend.
///
/// Backends receive a fully materialized, deterministic `Scene` so drawing
/// code stays isolated from scaling and comparison logic.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
