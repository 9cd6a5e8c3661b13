// src/storage.rs
use crate::config::ModeProfile;
use crate::errors::FetchError;
use crate::types::{FetchMode, QueryWindow};
use log::{debug, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub fn output_path(data_dir: &Path, mode: FetchMode, window: &QueryWindow) -> PathBuf {
    let profile = ModeProfile::for_mode(mode);
    data_dir.join(profile.file_name_for_year(window.year()))
}

/// Replaces `path` with the serialized collection, creating parent directories.
/// The bytes land in a sibling `.tmp` file first and are renamed over `path`,
/// so a failed write leaves the previous snapshot in place.
/// Returns the number of bytes written.
pub async fn write_collection(path: &Path, collection: &Value, pretty: bool) -> Result<usize, FetchError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(collection)?
    } else {
        serde_json::to_vec(collection)?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FetchError::io(parent, e))?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(e) = tokio::fs::write(&tmp_path, &bytes).await {
        discard_temp(&tmp_path).await;
        return Err(FetchError::io(&tmp_path, e));
    }
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        discard_temp(&tmp_path).await;
        return Err(FetchError::io(path, e));
    }

    debug!(
        "[storage::write_collection] Wrote {} bytes to {}",
        bytes.len(),
        path.display()
    );
    Ok(bytes.len())
}

/// `earthquakes.json` -> `earthquakes.json.tmp`, same directory.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn discard_temp(tmp_path: &Path) {
    // Only a regular file is ours to remove.
    if let Ok(meta) = tokio::fs::symlink_metadata(tmp_path).await {
        if meta.is_file() {
            if let Err(e) = tokio::fs::remove_file(tmp_path).await {
                warn!(
                    "[storage::discard_temp] Could not remove {}: {}",
                    tmp_path.display(),
                    e
                );
            }
        }
    }
}
