use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::{info, warn};
use tokio::fs;

use crate::config::Config;
use crate::pages::home::home_props;
use crate::pages::post::{post_props, static_paths};
use crate::prismic::DocumentSource;
use crate::view::comments::comments_script;
use crate::view::home_renderer::HomeRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::templates::Templates;

#[derive(Debug, Default, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<PathBuf>,
    pub assets: usize,
}

async fn write_page(out_dir: &Path, relative: &Path, html: String) -> Result<PathBuf> {
    let full_path = out_dir.join(relative);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).await
            .with_context(|| format!("Error creating {}", parent.display()))?;
    }
    fs::write(&full_path, html).await
        .with_context(|| format!("Error writing {}", full_path.display()))?;
    Ok(relative.to_path_buf())
}

async fn copy_public(public_dir: &Path, out_dir: &Path) -> Result<usize> {
    let mut entries = match fs::read_dir(public_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Public dir {} not copied: {}", public_dir.display(), e);
            return Ok(0);
        }
    };

    let target = out_dir.join("public");
    fs::create_dir_all(&target).await?;

    let mut copied = 0;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            fs::copy(entry.path(), target.join(entry.file_name())).await?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Writes the first listing page, every static post path and the public
/// assets into `out_dir`.
pub async fn generate_site<S>(source: &S, config: &Config, templates: &Templates, out_dir: &Path) -> Result<GenerateReport>
    where
        S: DocumentSource + ?Sized,
{
    let defaults = &config.defaults;
    let tz = &defaults.timezone;
    let mut report = GenerateReport::default();

    let home = home_props(source, defaults.page_size, 1, tz).await?;
    let home_renderer = HomeRenderer::new(&templates.home)?;
    let html = home_renderer.render(&defaults.site_name, &home);
    report.pages.push(write_page(out_dir, Path::new("index.html"), html).await?);

    let comments = config.comments.as_ref().map(comments_script).unwrap_or_default();
    let post_renderer = PostRenderer::new(&templates.post)?;
    for slug in static_paths(source, defaults.static_paths_size).await? {
        let Some(post) = post_props(source, &slug, tz).await? else {
            warn!("Post {} vanished while generating", slug);
            continue;
        };

        let html = post_renderer.render(&defaults.site_name, Some(&post), &comments, false);
        let relative = Path::new("post").join(&slug).join("index.html");
        report.pages.push(write_page(out_dir, &relative, html).await?);
        info!("Generated post {}", slug);
    }

    report.assets = copy_public(&config.paths.public_dir, out_dir).await?;
    info!("Generated {} pages and {} assets in {}", report.pages.len(), report.assets, out_dir.display());

    Ok(report)
}
