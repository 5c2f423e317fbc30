use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

use crate::bank::page::PageRequest;
use crate::bank::question::CanonicalQuestion;
use crate::bank::QuestionBank;
use crate::error::Result;


pub const IMPORT_LIMIT: usize = 1000;
pub const SOURCE: &str = "sanfoundry";
const TITLE_LENGTH: usize = 100;

/// A question as persisted by the storage layer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDocument {
    pub title: String,
    pub body: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub source: String,
    pub created_by: String,
    pub company_id: Option<String>,
}

impl QuestionDocument {
    pub fn new(question: CanonicalQuestion, topic: &str, user_id: &str) -> Self {
        QuestionDocument {
            title: question.question.chars().take(TITLE_LENGTH).collect(),
            body: question.question,
            difficulty: question.difficulty,
            tags: vec![topic.to_owned(), "mcq".to_owned(), SOURCE.to_owned()],
            kind: "mcq".to_owned(),
            options: question.options,
            correct_answer: question.answer,
            explanation: question.explanation,
            source: SOURCE.to_owned(),
            created_by: user_id.to_owned(),
            company_id: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Some documents already existed. The others were still inserted.
    #[error("{skipped} documents already exist")]
    Duplicates { inserted: usize, skipped: usize },

    #[error("Storage failure: {0}")]
    Backend(String),
}

/// Persistence for imported questions. Implementations own deduplication.
pub trait QuestionStore {
    /// Inserts every document it can and reports how many were inserted.
    fn insert_many(&self, documents: Vec<QuestionDocument>) -> Result<usize, StoreError>;
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ImportSummary {
    pub topic: String,
    pub imported: usize,
    pub skipped: usize,
}

/// Copies up to `IMPORT_LIMIT` usable questions of a topic into `store`.
pub fn import_topic<S: QuestionStore>(
    bank: &QuestionBank,
    token: &str,
    user_id: &str,
    store: &S,
) -> Result<ImportSummary> {
    let request = PageRequest {
        page: 1,
        limit: IMPORT_LIMIT,
    };
    let page = bank.questions_page(token, request)?;
    let documents: Vec<QuestionDocument> = page
        .questions
        .into_iter()
        .map(|question| QuestionDocument::new(question, token, user_id))
        .collect();

    let (imported, skipped) = match store.insert_many(documents) {
        Ok(inserted) => (inserted, 0),
        Err(StoreError::Duplicates { inserted, skipped }) => {
            warn!(topic = token, skipped, "Some questions already exist, skipping duplicates");
            (inserted, skipped)
        }
        Err(e) => return Err(e.into()),
    };

    info!(topic = token, imported, "Imported questions");
    Ok(ImportSummary {
        topic: token.to_owned(),
        imported,
        skipped,
    })
}

/// Keeps documents in memory, rejecting a body already stored under the same
/// first tag.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<QuestionDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn documents(&self) -> Vec<QuestionDocument> {
        self.documents.read().clone()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

fn dedup_key(document: &QuestionDocument) -> (String, String) {
    let topic = document.tags.first().cloned().unwrap_or_default();
    (topic, document.body.clone())
}

impl QuestionStore for MemoryStore {
    fn insert_many(&self, documents: Vec<QuestionDocument>) -> Result<usize, StoreError> {
        let mut stored = self.documents.write();
        let mut keys: HashSet<(String, String)> = stored.iter().map(dedup_key).collect();

        let mut inserted = 0;
        let mut skipped = 0;
        for document in documents {
            if keys.insert(dedup_key(&document)) {
                stored.push(document);
                inserted += 1;
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            return Err(StoreError::Duplicates { inserted, skipped });
        }
        Ok(inserted)
    }
}
