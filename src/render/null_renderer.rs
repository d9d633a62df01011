use crate::error::ChartResult;
use crate::render::{Renderer, Scene};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates scene content so tests catch invalid geometry without
/// a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_stroke_count: usize,
    pub last_fill_count: usize,
    pub last_text_count: usize,
    pub rendered_scenes: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.last_stroke_count = scene.strokes.len();
        self.last_fill_count = scene.fills.len();
        self.last_text_count = scene.texts.len();
        self.rendered_scenes += 1;
        Ok(())
    }
}
