//! Whole-document JSON persistence shared by every repository.
//!
//! Reads fail soft: a missing, empty or unparseable file yields the empty
//! value. Writes go to a sibling `.tmp` file that is renamed over the target,
//! so the previous document survives a failed write.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting empty", path.display());
            return T::default();
        }
        Err(e) => {
            warn!("Failed to read {}, treating as empty: {}", path.display(), e);
            return T::default();
        }
    };

    if content.trim().is_empty() {
        return T::default();
    }

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Ignoring unparseable document {}, treating as empty: {}",
                path.display(),
                e
            );
            T::default()
        }
    }
}

pub fn save<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    let tmp = temp_path(path);
    fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;

    if let Err(e) = fs::rename(&tmp, path) {
        fs::remove_file(&tmp).ok();
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    debug!("Saved {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("document"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}
