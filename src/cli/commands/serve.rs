use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::load_reference_data;
use crate::web;

/// Handle the `serve` command. Reference data is loaded before binding:
/// a missing or malformed list stops the process here.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { host, port } = cmd {
        let mut cfg = cfg.clone();
        if let Some(h) = host {
            cfg.host = h.clone();
        }
        if let Some(p) = port {
            cfg.port = *p;
        }

        let refs = load_reference_data(&cfg)?;
        web::serve(&cfg, refs).await?;
    }

    Ok(())
}
