//! Rendering side of the hierarchy.
//!
//! The hierarchy never talks to a GPU. It hands out [`DrawItem`]s, one per
//! node, and an external [`Renderer`] turns them into draw calls together with
//! its own camera and projection. Solid and wireframe passes read the same
//! payloads and the same world matrices and only differ in [`DrawStyle`].

use glam::{Mat4, Vec3};

use crate::scene_graph::hierarchy::Hierarchy;

/// How the renderer should draw a payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawStyle {
    Surface,
    /// Edges only, in a single flat color.
    Wireframe { color: Vec3 },
}

/// One node as seen by the renderer.
#[derive(Debug)]
pub struct DrawItem<'a, P> {
    pub name: &'a str,
    pub payload: &'a P,
    /// World transform followed by the node's shape transform.
    pub model_matrix: Mat4,
    pub style: DrawStyle,
}

// Manual impls: deriving would require `P: Clone`.
impl<P> Clone for DrawItem<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for DrawItem<'_, P> {}

impl<P> DrawItem<'_, P> {
    /// Inverse transpose of the model matrix, for transforming normals.
    /// Falls back to identity when the model matrix is singular (zero scale).
    pub fn normal_matrix(&self) -> Mat4 {
        const EPSILON: f32 = 1e-6;

        if self.model_matrix.determinant().abs() < EPSILON {
            Mat4::IDENTITY
        } else {
            self.model_matrix.inverse().transpose()
        }
    }

    pub fn instance_data(&self) -> InstanceData {
        InstanceData::new(self.model_matrix, self.normal_matrix())
    }
}

/// Per-draw matrices laid out for a GPU uniform or storage buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model_matrix: Mat4,
    pub normal_matrix: Mat4,
}

impl InstanceData {
    pub fn new(model_matrix: Mat4, normal_matrix: Mat4) -> Self {
        Self {
            model_matrix,
            normal_matrix,
        }
    }
}

/// Consumer of a hierarchy traversal.
pub trait Renderer<P> {
    fn draw(&mut self, item: &DrawItem<'_, P>);
}

impl<P, F> Renderer<P> for F
where
    F: FnMut(&DrawItem<'_, P>),
{
    fn draw(&mut self, item: &DrawItem<'_, P>) {
        self(item)
    }
}

impl<P> Hierarchy<P> {
    /// One draw item per node, parents before children. Renderers should not
    /// rely on the order.
    pub fn draw_items(&self, style: DrawStyle) -> impl Iterator<Item = DrawItem<'_, P>> + '_ {
        if !self.is_up_to_date() {
            log::warn!("drawing a hierarchy whose world transforms are out of date");
        }

        self.nodes().map(move |node| DrawItem {
            name: node.name(),
            payload: &node.payload,
            model_matrix: node.model_matrix(),
            style,
        })
    }

    pub fn draw(&self, renderer: &mut impl Renderer<P>) {
        self.draw_with_style(renderer, DrawStyle::Surface);
    }

    pub fn draw_wireframe(&self, renderer: &mut impl Renderer<P>, color: Vec3) {
        self.draw_with_style(renderer, DrawStyle::Wireframe { color });
    }

    pub fn draw_with_style(&self, renderer: &mut impl Renderer<P>, style: DrawStyle) {
        for item in self.draw_items(style) {
            renderer.draw(&item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::transform::Transform;

    const EPSILON: f32 = 1e-5;

    fn body_and_head() -> Hierarchy<u32> {
        let mut hierarchy = Hierarchy::new();
        hierarchy.add_root(1, "body").unwrap();
        hierarchy
            .add_child(2, "head", "body", Vec3::new(0.0, 0.0, 1.8))
            .unwrap();
        hierarchy.update_world_transforms();
        hierarchy
    }

    #[test]
    fn draw_visits_every_node_once() {
        let hierarchy = body_and_head();
        let mut drawn = Vec::new();
        hierarchy.draw(&mut |item: &DrawItem<'_, u32>| {
            drawn.push((item.name.to_string(), *item.payload, item.style))
        });

        assert_eq!(
            drawn,
            [
                ("body".to_string(), 1, DrawStyle::Surface),
                ("head".to_string(), 2, DrawStyle::Surface),
            ]
        );
    }

    #[test]
    fn wireframe_shares_matrices_with_surface() {
        let hierarchy = body_and_head();
        let color = Vec3::new(1.0, 0.0, 0.0);

        let surface: Vec<_> = hierarchy.draw_items(DrawStyle::Surface).collect();
        let mut wireframe = Vec::new();
        hierarchy.draw_wireframe(
            &mut |item: &DrawItem<'_, u32>| wireframe.push((item.model_matrix, item.style)),
            color,
        );

        assert_eq!(surface.len(), wireframe.len());
        for (solid, (matrix, style)) in surface.iter().zip(&wireframe) {
            assert_eq!(solid.model_matrix, *matrix);
            assert_eq!(*style, DrawStyle::Wireframe { color });
        }
    }

    #[test]
    fn draw_items_use_shape_transform() {
        let mut hierarchy = body_and_head();
        hierarchy["head"].shape_transform = Transform::from_translation(Vec3::X);
        hierarchy.update_world_transforms();

        let head = hierarchy
            .draw_items(DrawStyle::Surface)
            .find(|item| item.name == "head")
            .unwrap();
        assert!(head
            .model_matrix
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(1.0, 0.0, 1.8), EPSILON));
    }

    #[test]
    fn normal_matrix_is_inverse_transpose() {
        let mut hierarchy = body_and_head();
        hierarchy["body"].transform.scale = Vec3::new(1.0, 2.0, 1.0);
        hierarchy.update_world_transforms();

        for item in hierarchy.draw_items(DrawStyle::Surface) {
            let expected = item.model_matrix.inverse().transpose();
            assert!(item.normal_matrix().abs_diff_eq(expected, EPSILON));
        }
    }

    #[test]
    fn normal_matrix_falls_back_to_identity_for_zero_scale() {
        let mut hierarchy = body_and_head();
        hierarchy["body"].transform.scale = Vec3::ZERO;
        hierarchy.update_world_transforms();

        for item in hierarchy.draw_items(DrawStyle::Surface) {
            assert_eq!(item.normal_matrix(), Mat4::IDENTITY);
        }
    }

    #[test]
    fn instance_data_is_plain_bytes() {
        let hierarchy = body_and_head();
        let instances: Vec<InstanceData> = hierarchy
            .draw_items(DrawStyle::Surface)
            .map(|item| item.instance_data())
            .collect();

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<InstanceData>());
        assert_eq!(std::mem::size_of::<InstanceData>(), 2 * 16 * 4);
    }
}
