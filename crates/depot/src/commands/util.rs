//! Shared helpers for command handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;

use depot_core::{
    ApiPage, CreateMode, ExportFile, ExportFormat, ListParams, LookupKind, RecordId, Sort,
    SortOrder, ToFilters,
};

use crate::cli::{CreateModeArg, ExportFormatArg, ListArgs, LookupKindArg, SortOrderArg};
use crate::error::CliError;

// ── Argument translation ────────────────────────────────────────────

/// Combine shared list flags with a feature's filter record.
pub fn list_params<F: ToFilters>(list: &ListArgs, filters: F) -> Result<ListParams<F>, CliError> {
    let page = ApiPage::new(list.page).ok_or_else(|| CliError::Validation {
        field: "page".into(),
        reason: "pages start at 1".into(),
    })?;
    let mut params = ListParams::new(filters).page(page);
    if let Some(limit) = list.limit {
        params = params.limit(limit);
    }
    if let Some(ref by) = list.sort_by {
        let order = match list.sort_order {
            SortOrderArg::Asc => SortOrder::Asc,
            SortOrderArg::Desc => SortOrder::Desc,
        };
        params = params.sort(Sort::new(by.clone(), order));
    }
    Ok(params)
}

pub fn record_ids(raw: &[String]) -> Vec<RecordId> {
    raw.iter().map(|s| RecordId::from(s.as_str())).collect()
}

pub fn export_format(arg: ExportFormatArg) -> ExportFormat {
    match arg {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Pdf => ExportFormat::Pdf,
        ExportFormatArg::Txt => ExportFormat::Txt,
    }
}

pub fn create_mode(arg: CreateModeArg) -> CreateMode {
    match arg {
        CreateModeArg::Single => CreateMode::Single,
        CreateModeArg::Bulk => CreateMode::Bulk,
    }
}

pub fn lookup_kind(arg: LookupKindArg) -> LookupKind {
    match arg {
        LookupKindArg::Customers => LookupKind::Customers,
        LookupKindArg::Warehouses => LookupKind::Warehouses,
        LookupKindArg::BatchRegistry => LookupKind::BatchRegistry,
        LookupKindArg::LotAdjustmentTypes => LookupKind::LotAdjustmentTypes,
        LookupKindArg::SkuCodeBases => LookupKind::SkuCodeBases,
    }
}

// ── Files ───────────────────────────────────────────────────────────

/// Read records for `--from-file`: a JSON array, or one object.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| CliError::Validation {
            field: "from-file".into(),
            reason: format!("invalid JSON: {e}"),
        })?;
    let records = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(records)
}

/// Write an export into `dir`, returning the full path.
pub fn write_export(file: &ExportFile, dir: &Path) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.bytes)?;
    Ok(path)
}

// ── Progress ────────────────────────────────────────────────────────

/// A stderr spinner; hidden in quiet mode.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use depot_core::NewAddress;

    use super::*;

    #[test]
    fn single_object_file_becomes_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, r#"{"addressLine1": "1 Dock Rd"}"#).unwrap();

        let records: Vec<NewAddress> = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address_line1, "1 Dock Rd");
    }

    #[test]
    fn array_file_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("many.json");
        std::fs::write(
            &path,
            r#"[{"addressLine1": "A"}, {"addressLine1": "B", "customerId": 4}]"#,
        )
        .unwrap();

        let records: Vec<NewAddress> = read_records(&path).unwrap();
        assert_eq!(records[1].address_line1, "B");
        assert_eq!(records[1].customer_id, Some(RecordId::from("4")));
    }

    #[test]
    fn malformed_json_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = read_records::<NewAddress>(&path).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
