use anyhow::{Context, Result};
use clap::Parser;
use detail_normal::{Args, TextureConfig, pipeline};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TextureConfig::from(Args::parse());
    log::info!("Detail Normal - sum-of-sines normal map generator");

    pipeline::generate(&config)
        .with_context(|| format!("failed to generate {}", config.output.display()))?;

    log::info!("Done! Wrote {}", config.output.display());
    Ok(())
}
