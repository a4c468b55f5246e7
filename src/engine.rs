use crate::{config::DemoConfig, demo::DemoState, log_renderer::LogRenderer};

/// One animation frame: edit local transforms, propagate, then draw.
pub fn update(
    state: &mut DemoState,
    config: &DemoConfig,
    renderer: &mut LogRenderer,
) -> anyhow::Result<()> {
    state.update(config.time_step)?;
    state.hierarchy.update_world_transforms();

    renderer.begin_frame();
    if config.display_surface {
        state.hierarchy.draw(renderer);
    }
    if config.display_wireframe {
        state
            .hierarchy
            .draw_wireframe(renderer, config.wireframe_color);
    }
    renderer.end_frame();

    Ok(())
}

pub fn run(config: &DemoConfig) -> anyhow::Result<LogRenderer> {
    let mut state = DemoState::new(config)?;
    let mut renderer = LogRenderer::default();

    for _ in 0..config.frames {
        update(&mut state, config, &mut renderer)?;
    }

    log::info!(
        "Rendered {} frames: {} surface draws, {} wireframe draws",
        renderer.frames(),
        renderer.surface_draws,
        renderer.wireframe_draws
    );

    Ok(renderer)
}
