use glam::{Mat4, Quat, Vec3};

/// Local translation/rotation/scale of a node, relative to its parent.
///
/// Fields are public: animation code overwrites them directly every frame and
/// nothing is cached here. The hierarchy turns them into a matrix during
/// propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Rotation of `angle` radians around `axis`. The axis does not need to be
    /// normalized; a zero axis yields the identity rotation.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_rotation(axis_angle(axis, angle))
    }

    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn set_transform(&mut self, translation: Vec3, rotation: Quat, scale: Vec3) {
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Applies `rotation` after the current rotation, in the local frame.
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = self.rotation * rotation;
    }

    /// Scale first, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl From<Transform> for Mat4 {
    fn from(transform: Transform) -> Self {
        transform.matrix()
    }
}

/// Quaternion for a rotation of `angle` radians around `axis`.
pub fn axis_angle(axis: Vec3, angle: f32) -> Quat {
    match axis.try_normalize() {
        Some(axis) => Quat::from_axis_angle(axis, angle),
        None => Quat::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert!(t.is_identity());
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_scales_then_rotates_then_translates() {
        let t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_z(FRAC_PI_2))
            .with_uniform_scale(2.0);

        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (1,2,0)
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), EPSILON), "got {p:?}");

        let expected = Mat4::from_translation(t.translation)
            * Mat4::from_quat(t.rotation)
            * Mat4::from_scale(t.scale);
        assert!(t.matrix().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn non_uniform_scale() {
        let t = Transform::default().with_scale(Vec3::new(1.0, 2.0, 3.0));
        let p = t.matrix().transform_point3(Vec3::ONE);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), EPSILON));
    }

    #[test]
    fn axis_angle_normalizes_axis() {
        let a = axis_angle(Vec3::new(0.0, 0.0, 5.0), FRAC_PI_2);
        assert!(a.abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), EPSILON));
    }

    #[test]
    fn axis_angle_with_zero_axis_is_identity() {
        assert_eq!(axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }

    #[test]
    fn negative_axis_rotates_the_other_way() {
        let pos = axis_angle(Vec3::Z, 0.3);
        let neg = axis_angle(Vec3::NEG_Z, 0.3);
        assert!((pos * neg).abs_diff_eq(Quat::IDENTITY, EPSILON));
    }

    #[test]
    fn translate_and_rotate_accumulate() {
        let mut t = Transform::default();
        t.translate(Vec3::X);
        t.translate(Vec3::Y);
        t.rotate(Quat::from_rotation_y(0.25));
        t.rotate(Quat::from_rotation_y(0.25));

        assert_eq!(t.translation, Vec3::new(1.0, 1.0, 0.0));
        assert!(t.rotation.abs_diff_eq(Quat::from_rotation_y(0.5), EPSILON));
    }
}
