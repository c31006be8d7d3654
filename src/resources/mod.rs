//! Loading of assets from the asset root: raw files, textures and models.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{context::InitContext, data_structures::texture::Texture};

pub mod loader;
pub mod material_factory;
pub mod primitives;

/// Resolves `file_name` against the asset root.
pub fn asset_path(root: &Path, file_name: &str) -> PathBuf {
    root.join(file_name)
}

pub async fn load_string(root: &Path, file_name: &str) -> anyhow::Result<String> {
    let path = asset_path(root, file_name);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))
}

pub async fn load_binary(root: &Path, file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(root, file_name);
    tokio::fs::read(&path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))
}

/// Loads and uploads an image file. `srgb` is true for color maps.
pub async fn load_texture(ctx: &InitContext, file_name: &str, srgb: bool) -> anyhow::Result<Texture> {
    let data = load_binary(&ctx.asset_root, file_name).await?;
    Texture::from_bytes(&ctx.device, &ctx.queue, &data, file_name, srgb)
        .with_context(|| format!("cannot decode texture {file_name}"))
}

/// Like [`load_texture`], but a missing or broken file yields a checkerboard and a warning.
pub async fn load_texture_or_checkerboard(ctx: &InitContext, file_name: &str, srgb: bool) -> Texture {
    match load_texture(ctx, file_name, srgb).await {
        Ok(texture) => texture,
        Err(err) => {
            log::warn!("{err:#}; using a checkerboard instead");
            Texture::checkerboard(&ctx.device, &ctx.queue, 256, 8, file_name)
        }
    }
}
