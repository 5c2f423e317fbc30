//! Question bank backed by a directory of per-topic MCQ datasets.
//!
//! Each dataset file is named `"<count> <Topic Name> MCQs.json"` and holds an
//! array of question records whose shape varies from batch to batch. Records
//! are normalized into [`CanonicalQuestion`]s and served page by page.

pub mod bank;
pub mod error;
pub mod export;
pub mod import;

pub use crate::bank::catalog::{Catalog, Topic};
pub use crate::bank::page::{Page, PageRequest};
pub use crate::bank::question::{normalize, CanonicalQuestion, RawQuestion};
pub use crate::bank::QuestionBank;
pub use crate::error::{Error, Result};
pub use crate::import::{import_topic, ImportSummary, MemoryStore, QuestionDocument, QuestionStore, StoreError};
