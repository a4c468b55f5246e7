use std::f32::consts::{PI, TAU};

use anyhow::Context;
use articulate::{axis_angle, Hierarchy, Node, NodeId, Transform};
use glam::Vec3;
use itertools::Itertools;

use crate::config::{DemoConfig, DemoModel};
use crate::shape::Shape;
use crate::timer::Timer;

/// Handles to the robot's animated joints, resolved once at setup.
struct RobotJoints {
    body: NodeId<Shape>,
    shoulder_left: NodeId<Shape>,
    arm_bottom_left: NodeId<Shape>,
    shoulder_right: NodeId<Shape>,
    arm_bottom_right: NodeId<Shape>,
}

enum Rig {
    Bird,
    Robot(RobotJoints),
}

pub struct DemoState {
    pub hierarchy: Hierarchy<Shape>,
    pub timer: Timer,
    rig: Rig,
}

impl DemoState {
    pub fn new(config: &DemoConfig) -> anyhow::Result<Self> {
        let mut hierarchy = Hierarchy::new();

        let (rig, mut timer) = match config.model {
            DemoModel::Bird => {
                build_bird(&mut hierarchy).context("Failed to build bird hierarchy")?;
                (Rig::Bird, Timer::basic())
            }
            DemoModel::Robot => {
                let joints =
                    build_robot(&mut hierarchy).context("Failed to build robot hierarchy")?;
                (Rig::Robot(joints), Timer::interval(0.0, 1.0))
            }
        };
        timer.scale = config.time_scale;

        log::info!(
            "Built {:?} with {} nodes: {}",
            config.model,
            hierarchy.len(),
            hierarchy.nodes().map(Node::name).join(", ")
        );

        Ok(Self {
            hierarchy,
            timer,
            rig,
        })
    }

    /// Advances the clock and writes this frame's local transforms.
    pub fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        self.timer.update(dt);
        let t = self.timer.t;

        match &self.rig {
            Rig::Bird => animate_bird(&mut self.hierarchy, t),
            Rig::Robot(joints) => {
                animate_robot(&mut self.hierarchy, joints, t);
                Ok(())
            }
        }
    }
}

fn build_bird(hierarchy: &mut Hierarchy<Shape>) -> articulate::Result<()> {
    let body = Shape::ellipsoid(Vec3::new(1.0, 1.0, 1.5)).with_texture("assets/body.png");
    let head = Shape::sphere(0.9).with_texture("assets/head.png");
    let wing = Shape::file("assets/wing.obj").with_texture("assets/wing.png");
    let eye = Shape::sphere(0.2).with_color(Vec3::splat(0.2));

    hierarchy.add_root(body, "body")?;
    hierarchy.add_child(head, "head", "body", Vec3::new(0.0, 0.0, 1.8))?;
    hierarchy.add_child(eye.clone(), "eye_R", "head", Vec3::new(0.4, 0.3, 0.6))?;
    hierarchy.add_child(eye, "eye_L", "head", Vec3::new(-0.4, 0.3, 0.6))?;
    hierarchy.add_child(wing.clone(), "wing", "body", Vec3::new(0.0, 1.03, 0.0))?;
    let wing2 = hierarchy.add_child(wing, "wing2", "body", Vec3::new(0.0, 1.03, 0.0))?;

    // Same mesh as the first wing, mirrored by a half turn.
    if let Some(wing2) = hierarchy.get_mut(wing2) {
        wing2.shape_transform = Transform::from_axis_angle(Vec3::Z, PI);
    }

    Ok(())
}

fn animate_bird(hierarchy: &mut Hierarchy<Shape>, t: f32) -> anyhow::Result<()> {
    let flap = PI / 8.0 * (1.0 + (20.0 * t).cos());

    hierarchy.lookup_mut("body")?.transform.translation =
        Vec3::new(0.0, 0.2 * (5.0 * t).cos(), 0.0);
    hierarchy.lookup_mut("wing")?.transform.rotation = axis_angle(Vec3::Z, flap);
    hierarchy.lookup_mut("wing2")?.transform.rotation = axis_angle(Vec3::NEG_Z, flap);

    let head = &mut hierarchy.lookup_mut("head")?.transform;
    head.translation = Vec3::new(0.0, 0.0, 1.8) + Vec3::new(0.0, 0.0, 0.1 * (2.5 * t).cos());
    head.rotation = axis_angle(Vec3::Y, PI / 8.0 * (5.0 * t).cos());

    Ok(())
}

fn build_robot(hierarchy: &mut Hierarchy<Shape>) -> articulate::Result<RobotJoints> {
    let radius_body = 0.25;
    let radius_arm = 0.05;
    let length_arm = 0.2;

    let body = Shape::sphere(radius_body);
    let eye = Shape::sphere(0.05).with_color(Vec3::ZERO);
    let shoulder_left = Shape::cylinder(radius_arm, Vec3::ZERO, Vec3::new(-length_arm, 0.0, 0.0));
    let arm_left = Shape::cylinder(
        radius_arm,
        Vec3::ZERO,
        Vec3::new(-length_arm / 1.5, 0.0, -length_arm),
    );
    let shoulder_right = Shape::cylinder(radius_arm, Vec3::ZERO, Vec3::new(length_arm, 0.0, 0.0));
    let arm_right = Shape::cylinder(
        radius_arm,
        Vec3::ZERO,
        Vec3::new(length_arm / 1.5, 0.0, -length_arm),
    );
    let elbow = Shape::sphere(0.055);

    let body = hierarchy.add_root(body, "body")?;

    let eye_offset = Vec3::new(1.0 / 3.0, 1.0 / 2.0, 1.0 / 1.5);
    hierarchy.add_child(eye.clone(), "eye_left", "body", radius_body * eye_offset)?;
    hierarchy.add_child(
        eye,
        "eye_right",
        "body",
        radius_body * eye_offset * Vec3::new(-1.0, 1.0, 1.0),
    )?;

    // Left arm: shoulder, elbow at the end of the shoulder, forearm from the elbow.
    let shoulder_left = hierarchy.add_child(
        shoulder_left,
        "shoulder_left",
        "body",
        Vec3::new(-radius_body + 0.05, 0.0, 0.0),
    )?;
    hierarchy.add_child(
        elbow.clone(),
        "elbow_left",
        "shoulder_left",
        Vec3::new(-length_arm, 0.0, 0.0),
    )?;
    let arm_bottom_left =
        hierarchy.add_child(arm_left, "arm_bottom_left", "elbow_left", Vec3::ZERO)?;

    // Right arm mirrors the left one along x.
    let shoulder_right = hierarchy.add_child(
        shoulder_right,
        "shoulder_right",
        "body",
        Vec3::new(radius_body - 0.05, 0.0, 0.0),
    )?;
    hierarchy.add_child(
        elbow,
        "elbow_right",
        "shoulder_right",
        Vec3::new(length_arm, 0.0, 0.0),
    )?;
    let arm_bottom_right =
        hierarchy.add_child(arm_right, "arm_bottom_right", "elbow_right", Vec3::ZERO)?;

    Ok(RobotJoints {
        body,
        shoulder_left,
        arm_bottom_left,
        shoulder_right,
        arm_bottom_right,
    })
}

fn animate_robot(hierarchy: &mut Hierarchy<Shape>, joints: &RobotJoints, t: f32) {
    if let Some(body) = hierarchy.get_mut(joints.body) {
        body.transform.translation = Vec3::new(0.0, 0.2 * (1.0 + (TAU * t).sin()), 0.0);
    }

    // Forearms lag behind the shoulders; the right side swings the other way.
    let swings = [
        (joints.shoulder_left, Vec3::Z, 0.4),
        (joints.arm_bottom_left, Vec3::Z, 0.6),
        (joints.shoulder_right, Vec3::NEG_Z, 0.4),
        (joints.arm_bottom_right, Vec3::NEG_Z, 0.6),
    ];

    for (id, axis, delay) in swings {
        if let Some(joint) = hierarchy.get_mut(id) {
            joint.transform.rotation = axis_angle(axis, (TAU * (t - delay)).sin());
        }
    }
}
