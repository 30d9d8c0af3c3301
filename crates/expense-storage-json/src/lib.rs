//! Filesystem-backed expense sheet stored as a JSON document.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use expense_core::{CoreError, ExpenseSheet};
use expense_domain::RawExpenseRow;
use serde::{Deserialize, Serialize};

const SHEET_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// On-disk layout: the sheet title plus its rows in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetDocument {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<RawExpenseRow>,
}

/// One named sheet persisted at `<dir>/<slug>.json`.
#[derive(Debug)]
pub struct JsonSheetStorage {
    name: String,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSheetStorage {
    pub fn new(dir: &Path, sheet_name: &str) -> Result<Self, CoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            name: sheet_name.trim().to_string(),
            path: sheet_file_path(dir, sheet_name),
            write_lock: Mutex::new(()),
        })
    }

    pub fn sheet_path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn load_document(&self) -> Result<SheetDocument, CoreError> {
        if !self.path.exists() {
            return Ok(SheetDocument {
                name: self.name.clone(),
                rows: Vec::new(),
            });
        }
        load_sheet_from_path(&self.path)
    }

    fn modify<T>(
        &self,
        change: impl FnOnce(&mut SheetDocument) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::Storage("sheet write lock poisoned".into()))?;
        let mut document = self.load_document()?;
        let outcome = change(&mut document)?;
        save_sheet_to_path(&document, &self.path)?;
        Ok(outcome)
    }
}

impl ExpenseSheet for JsonSheetStorage {
    fn read_all_rows(&self) -> Result<Vec<RawExpenseRow>, CoreError> {
        Ok(self.load_document()?.rows)
    }

    fn append_row(
        &self,
        date_iso: &str,
        category: &str,
        amount_text: &str,
    ) -> Result<(), CoreError> {
        self.modify(|document| {
            document
                .rows
                .push(RawExpenseRow::new(date_iso, category, amount_text));
            Ok(())
        })
    }

    fn delete_row_at(&self, position: usize) -> Result<RawExpenseRow, CoreError> {
        self.modify(|document| {
            if position >= document.rows.len() {
                return Err(CoreError::RowNotFound(position));
            }
            Ok(document.rows.remove(position))
        })
    }
}

/// Where the sheet titled `sheet_name` lives inside `dir`.
pub fn sheet_file_path(dir: &Path, sheet_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", canonical_name(sheet_name), SHEET_EXTENSION))
}

/// Writes a sheet document atomically (temp file, then rename).
pub fn save_sheet_to_path(document: &SheetDocument, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_sheet_from_path(path: &Path) -> Result<SheetDocument, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "sheet".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(TMP_SUFFIX);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_slugs_sheet_titles() {
        assert_eq!(canonical_name("controle_despesas"), "controle_despesas");
        assert_eq!(canonical_name(" Casa 2025 "), "casa_2025");
        assert_eq!(canonical_name("???"), "sheet");
    }
}
