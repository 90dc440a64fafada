use talait::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = LogConfig {
        filter: "logger_demo=trace".to_string(),
    };
    logger.reload_from_config(&config)?;
    trace!("application trace log");
    debug!(user_id = 1, "application debug log");
    info!("application info log");

    Ok(())
}
