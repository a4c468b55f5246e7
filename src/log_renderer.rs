use articulate::{DrawItem, DrawStyle, InstanceData, Renderer};

use crate::shape::Shape;

/// Headless renderer: records what a GPU backend would upload and logs each
/// draw.
#[derive(Default)]
pub struct LogRenderer {
    pub surface_draws: usize,
    pub wireframe_draws: usize,
    /// Instance data of the current frame, in draw order.
    pub instances: Vec<InstanceData>,
    frame: u64,
}

impl LogRenderer {
    pub fn begin_frame(&mut self) {
        self.instances.clear();
    }

    pub fn end_frame(&mut self) {
        log::debug!(
            "Frame {}: {} instances ({} bytes)",
            self.frame,
            self.instances.len(),
            bytemuck::cast_slice::<InstanceData, u8>(&self.instances).len()
        );
        self.frame += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl Renderer<Shape> for LogRenderer {
    fn draw(&mut self, item: &DrawItem<'_, Shape>) {
        match item.style {
            DrawStyle::Surface => self.surface_draws += 1,
            DrawStyle::Wireframe { .. } => self.wireframe_draws += 1,
        }

        log::trace!(
            "draw '{}' [{}] ({:?}) at {}",
            item.name,
            item.payload,
            item.style,
            item.model_matrix.w_axis.truncate()
        );

        self.instances.push(item.instance_data());
    }
}
