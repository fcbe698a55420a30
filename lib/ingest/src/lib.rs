//! # triagex Ingest
//!
//! Tabular source readers for ticket corpora. A corpus directory may
//! contain CSV, TSV, and JSON files; all rows are concatenated, filtered
//! to resolved tickets, and projected to the semantic fields used for
//! embedding.

pub mod source;

pub use source::{
    load_query_examples, load_rows, preprocess, CorpusRow, QueryRow, RawTicketRow,
};
