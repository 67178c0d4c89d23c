// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use anyhow::Context;
use std::path::Path;
use tokio::fs;

async fn ensure_parent(dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Copies one file, creating the destination's parent directories.
///
/// Symbolic links are followed: the destination receives the target's content.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the copy fails.
pub async fn copy_file_async(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent(dst).await?;
    fs::copy(src, dst)
        .await
        .map_err(|source| FsError::IoError {
            path: src.display().to_string(),
            source,
        })
        .with_context(|| format!("failed to copy to {}", dst.display()))?;
    Ok(())
}

/// Recreates the symbolic link `src` at `dst` with the same target.
///
/// An existing file or link at `dst` is replaced.
///
/// # Errors
///
/// Returns an error if the link cannot be read or created.
pub async fn copy_symlink_async(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src)
        .await
        .with_context(|| format!("failed to read link {}", src.display()))?;

    ensure_parent(dst).await?;
    if fs::symlink_metadata(dst).await.is_ok() {
        fs::remove_file(dst)
            .await
            .with_context(|| format!("failed to replace {}", dst.display()))?;
    }

    #[cfg(unix)]
    let created = fs::symlink(&target, dst).await;
    #[cfg(windows)]
    let created = fs::symlink_file(&target, dst).await;

    created.with_context(|| {
        format!(
            "failed to link {} -> {}",
            dst.display(),
            target.display()
        )
    })
}
