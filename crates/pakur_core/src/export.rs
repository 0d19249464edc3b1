//! Partner export: a pretty-printed JSON document describing the selected
//! partner and, when available, its route estimate.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::dashboard::DashboardState;
use crate::model::{PartnerRef, RouteInfo};

const FILE_PREFIX: &str = "PakurFast_Partner_";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no partner is selected")]
    NothingSelected,
    #[error("failed to write export '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<'a> {
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub city: String,
    pub partner: PartnerRef<'a>,
    /// `null` when no estimate has been calculated for this selection.
    pub logistics: Option<&'a RouteInfo>,
}

impl ExportDocument<'_> {
    pub fn file_name(&self) -> String {
        export_file_name(self.partner.name())
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn build_export<'a>(
    state: &'a DashboardState,
    city: &str,
    now: DateTime<Utc>,
) -> Result<ExportDocument<'a>, ExportError> {
    let partner = state.selected_partner().ok_or(ExportError::NothingSelected)?;
    Ok(ExportDocument {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        city: city.to_string(),
        partner,
        logistics: state.route_info(),
    })
}

/// `PakurFast_Partner_<name>.json`. Each whitespace run, leading and trailing
/// ones included, becomes one `_`; path separators, characters reserved on
/// Windows and control characters become `_` too, so the name always stays a
/// single path component.
pub fn export_file_name(partner_name: &str) -> String {
    let mut stem = String::with_capacity(partner_name.len());
    let mut in_whitespace = false;
    for ch in partner_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        stem.push(if is_reserved_in_file_name(ch) { '_' } else { ch });
    }
    format!("{FILE_PREFIX}{stem}.json")
}

fn is_reserved_in_file_name(ch: char) -> bool {
    ch.is_control() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Writes `document` into `dir` via a temp file and rename. Returns the final path.
pub fn write_export(dir: &Path, document: &ExportDocument<'_>) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let serialized = document.to_json()?;
    let target = dir.join(document.file_name());
    let temp = target.with_extension(format!("json.tmp.{}", std::process::id()));

    let written = File::create(&temp).and_then(|mut file| {
        file.write_all(serialized.as_bytes())?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(&temp);
        return Err(ExportError::Io { path: temp, source });
    }

    replace_file(&temp, &target)?;
    info!(path = %target.display(), "partner exported");
    Ok(target)
}

fn replace_file(temp: &Path, target: &Path) -> Result<(), ExportError> {
    let Err(first_error) = fs::rename(temp, target) else {
        return Ok(());
    };
    if !target.exists() {
        let _ = fs::remove_file(temp);
        return Err(ExportError::Io {
            path: target.to_path_buf(),
            source: first_error,
        });
    }
    fs::remove_file(target)
        .and_then(|()| fs::rename(temp, target))
        .map_err(|source| {
            let _ = fs::remove_file(temp);
            ExportError::Io {
                path: target.to_path_buf(),
                source,
            }
        })
}
