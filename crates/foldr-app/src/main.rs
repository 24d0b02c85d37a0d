//! Foldr command-line entry point.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Starting Foldr");

    foldr_app::run_from_env()?;
    Ok(())
}
