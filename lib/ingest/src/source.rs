//! Readers for the tabular ticket sources.
//!
//! A corpus directory holds any mix of `.csv`, `.tsv`, and `.json`
//! files, each with at least the columns
//! `Issue, Category, Description, Resolution, Resolved`. All rows from
//! all files are concatenated into one batch; a file that fails to parse
//! fails the whole load (no silent partial corpora).

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use triagex_core::{Error, Result, TicketFields};

/// One raw row as it appears in a source file, before filtering.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawTicketRow {
    #[serde(rename = "Issue")]
    pub issue: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Resolution")]
    pub resolution: String,
    #[serde(rename = "Resolved", deserialize_with = "bool_like")]
    pub resolved: bool,
}

/// A row that survived the resolved filter, projected to the four
/// semantic fields. The `Resolved` flag is dropped here by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusRow {
    pub fields: TicketFields,
    pub resolution: String,
}

/// A query-shaped example row, used only as demo input for surrounding
/// UI/API layers. Never scored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QueryRow {
    #[serde(rename = "Issue")]
    pub issue: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl QueryRow {
    #[must_use]
    pub fn into_fields(self) -> TicketFields {
        TicketFields::new(self.issue, self.category, self.description)
    }
}

/// Read every supported source file under `dir` and concatenate their
/// rows.
///
/// Files are read in sorted name order; row order is never semantically
/// significant downstream. Zero files of a given format is an empty
/// contribution, not an error.
///
/// # Errors
///
/// A missing directory surfaces as [`Error::Io`]; an unparsable or
/// misshapen file as [`Error::Schema`].
pub fn load_rows(dir: &Path) -> Result<Vec<RawTicketRow>> {
    let mut csv_files = Vec::new();
    let mut tsv_files = Vec::new();
    let mut json_files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => csv_files.push(path),
            Some("tsv") => tsv_files.push(path),
            Some("json") => json_files.push(path),
            _ => debug!(?path, "skipping unsupported file"),
        }
    }
    csv_files.sort();
    tsv_files.sort();
    json_files.sort();

    let mut rows = Vec::new();
    for path in &csv_files {
        rows.extend(read_delimited(path, b',')?);
    }
    for path in &tsv_files {
        rows.extend(read_delimited(path, b'\t')?);
    }
    for path in &json_files {
        rows.extend(read_json(path)?);
    }

    info!(
        csv = csv_files.len(),
        tsv = tsv_files.len(),
        json = json_files.len(),
        rows = rows.len(),
        "loaded ticket sources"
    );
    Ok(rows)
}

/// Filter to resolved rows and project to the four semantic fields.
#[must_use]
pub fn preprocess(rows: Vec<RawTicketRow>) -> Vec<CorpusRow> {
    rows.into_iter()
        .filter(|row| row.resolved)
        .map(|row| CorpusRow {
            fields: TicketFields::new(row.issue, row.category, row.description),
            resolution: row.resolution,
        })
        .collect()
}

/// Load the held-out query-example batch from a single file
/// (`Issue, Category, Description`). Format chosen by extension.
pub fn load_query_examples(path: &Path) -> Result<Vec<QueryRow>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_delimited(path, b','),
        Some("tsv") => read_delimited(path, b'\t'),
        Some("json") => read_json(path),
        _ => Err(Error::Schema {
            file: display_name(path),
            detail: "unsupported example file format".to_string(),
        }),
    }
}

fn read_delimited<T: DeserializeOwned>(path: &Path, delimiter: u8) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| schema_error(path, e))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|e| schema_error(path, e))?);
    }
    Ok(rows)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| schema_error(path, e))
}

fn schema_error(path: &Path, detail: impl std::fmt::Display) -> Error {
    Error::Schema {
        file: display_name(path),
        detail: detail.to_string(),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Accepts booleans in the shapes source files actually use: real
/// booleans, 0/1, and case-insensitive true/false, yes/no strings.
fn bool_like<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolLike {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match BoolLike::deserialize(deserializer)? {
        BoolLike::Bool(b) => Ok(b),
        BoolLike::Int(i) => Ok(i != 0),
        BoolLike::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!(
                "unrecognized Resolved value: {other}"
            ))),
        },
    }
}
