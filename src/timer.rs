/// Animation clock advanced by a fixed step each frame.
#[derive(Debug, Clone)]
pub struct Timer {
    pub t: f32,
    pub scale: f32,
    interval: Option<(f32, f32)>,
}

impl Timer {
    /// Clock that runs forever.
    pub fn basic() -> Self {
        Self {
            t: 0.0,
            scale: 1.0,
            interval: None,
        }
    }

    /// Clock that loops over `[t_min, t_max)`.
    pub fn interval(t_min: f32, t_max: f32) -> Self {
        Self {
            t: t_min,
            scale: 1.0,
            interval: Some((t_min, t_max)),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.t += self.scale * dt;

        if let Some((t_min, t_max)) = self.interval {
            let length = t_max - t_min;
            if length > 0.0 && self.t >= t_max {
                self.t = t_min + (self.t - t_min).rem_euclid(length);
            }
        }
    }
}
