use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::{
    orchestrator::{FetchOptions, Orchestrator},
    render::{RenderOptions, render},
    runtime::Runtime,
};

pub mod config;

use config::Config;

/// Fetch a portfolio for `handle` and print or write the rendered document.
#[tracing::instrument(skip(runtime, api_url, fetch, render_options))]
pub async fn generate<R: Runtime>(
    runtime: R,
    handle: &str,
    api_url: Option<String>,
    fetch: FetchOptions,
    render_options: RenderOptions,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = Config::new(runtime, api_url, fetch)?;
    run(handle, &render_options, output.as_deref(), config).await
}

#[tracing::instrument(skip(render_options, config))]
pub async fn run<R: Runtime>(
    handle: &str,
    render_options: &RenderOptions,
    output: Option<&Path>,
    config: Config<R>,
) -> Result<()> {
    let mut orchestrator = Orchestrator::new(config.fetch);

    let rendered = orchestrator
        .generate(config.api.clone(), handle)
        .await
        .map(|portfolio| render(portfolio, render_options));

    // Saves run in the background; wait for them so their failures get reported.
    let failures = orchestrator.flush_saves().await;
    debug!("{} snapshot save(s) failed", failures.len());

    let document = rendered??;

    match output {
        Some(path) => {
            write_document(&config.runtime, path, &document)?;
            info!("Portfolio written to {}", path.display());
            println!("Portfolio for {} written to {}", handle.trim(), path.display());
        }
        None => print!("{}", document),
    }

    Ok(())
}

fn write_document<R: Runtime>(runtime: &R, path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !runtime.exists(parent) {
            debug!("Creating output directory {:?}", parent);
            runtime.create_dir_all(parent)?;
        }
    }
    runtime
        .write(path, document.as_bytes())
        .with_context(|| format!("Failed to write portfolio to {}", path.display()))
}
