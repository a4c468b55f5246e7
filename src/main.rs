use anyhow::Result;

mod config;
mod demo;
mod engine;
mod log_renderer;
mod shape;
mod timer;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = config::DemoConfig::from_args(std::env::args().skip(1))?;
    engine::run(&config)?;

    Ok(())
}
