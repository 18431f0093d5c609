use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::path::Path;

use crate::{
    application::{DocsService, ReleaseService, slug_for_file},
    provider::ContentSource,
    release::Quality,
    runtime::Runtime,
};

use super::config::Config;

/// Write the release and documentation data a static site build consumes:
///
/// ```text
/// <out>/release.stable.json
/// <out>/release.insider.json
/// <out>/docs/index.json          navigation, pages with sections
/// <out>/docs/pages/<slug>.json   one rendered page each
/// ```
#[tracing::instrument(skip(config))]
pub async fn export<R: Runtime, S: ContentSource>(config: &Config<R, S>, out_dir: &Path) -> Result<()> {
    let runtime = config.cache.runtime();

    let releases = ReleaseService::new(&config.cache, &config.source, config.dev);
    for quality in Quality::ALL {
        let release = releases.latest_release(quality).await;
        let path = out_dir.join(format!("release.{}.json", quality));
        write_json(runtime, &path, &release)?;
    }

    let docs = DocsService::new(&config.cache, &config.source);
    let navigation = docs.pages_with_sections().await;
    write_json(runtime, &out_dir.join("docs").join("index.json"), &navigation)?;

    // Hidden pages are still routable, so every listed file is exported.
    let files = docs.list_pages().await;
    let pages_dir = out_dir.join("docs").join("pages");
    for file in &files {
        let page = docs.page(file).await;
        let path = pages_dir.join(format!("{}.json", slug_for_file(file)));
        write_json(runtime, &path, &page)?;
    }

    info!("Exported {} documentation page(s)", files.len());
    println!(
        "Exported {} release(s) and {} documentation page(s) to {}",
        Quality::ALL.len(),
        files.len(),
        out_dir.display()
    );
    Ok(())
}

fn write_json<R: Runtime, T: Serialize + ?Sized>(runtime: &R, path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    if let Some(parent) = path.parent() {
        runtime.create_dir_all(parent)?;
    }
    debug!("Writing {:?}", path);
    runtime.write(path, json.as_bytes())
}
