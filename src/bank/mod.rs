use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub mod catalog;
pub mod page;
pub mod question;
pub mod resolver;

use self::catalog::{read_catalog, Catalog, Topic};
use self::page::{paginate, Page, PageRequest};
use self::question::{CanonicalQuestion, RawQuestion};

#[cfg(test)]
mod tests;

/// Dataset files hold either a bare array of records or an object wrapping
/// them under `questions`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    Records(Vec<RawQuestion>),
    Wrapped { questions: Vec<RawQuestion> },
}

impl Dataset {
    fn into_records(self) -> Vec<RawQuestion> {
        match self {
            Dataset::Records(records) => records,
            Dataset::Wrapped { questions } => questions,
        }
    }
}

/// Read-only view over a directory of per-topic MCQ datasets.
///
/// Nothing is cached: every call lists the directory and reads the dataset
/// again, so concurrent callers never share state.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    data_dir: PathBuf,
}

impl QuestionBank {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        QuestionBank {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn list_topics(&self) -> Catalog {
        read_catalog(&self.data_dir)
    }

    pub fn resolve_topic(&self, token: &str) -> Result<Topic> {
        let catalog = self.list_topics();
        resolver::resolve(catalog.topics(), token).cloned()
    }

    /// Topics whose name contains `query`, ignoring case.
    pub fn search_topics(&self, query: &str) -> Result<Vec<Topic>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(self
            .list_topics()
            .into_topics()
            .into_iter()
            .filter(|topic| topic.name.to_lowercase().contains(&query))
            .collect())
    }

    /// Every usable question of a topic, in dataset order.
    pub fn usable_questions(&self, topic: &Topic) -> Result<Vec<CanonicalQuestion>> {
        let records = self.load_dataset(topic)?;
        let record_count = records.len();
        let questions: Vec<CanonicalQuestion> = records
            .into_iter()
            .map(CanonicalQuestion::from)
            .filter(CanonicalQuestion::is_usable)
            .collect();
        debug!(
            topic = %topic.name,
            records = record_count,
            usable = questions.len(),
            "Normalized dataset"
        );
        Ok(questions)
    }

    pub fn questions_page(&self, token: &str, request: PageRequest) -> Result<Page> {
        let topic = self.resolve_topic(token)?;
        let questions = self.usable_questions(&topic)?;
        paginate(topic.name, questions, request)
    }

    fn load_dataset(&self, topic: &Topic) -> Result<Vec<RawQuestion>> {
        let file = self.data_dir.join(&topic.file_name);
        let content = fs::read_to_string(&file).map_err(|source| {
            warn!(?file, "Dataset file for topic {} is unreadable", topic.id);
            Error::DatasetUnavailable {
                file: file.clone(),
                source,
            }
        })?;
        let dataset: Dataset = serde_json::from_str(&content)
            .map_err(|source| Error::MalformedDataset { file, source })?;
        Ok(dataset.into_records())
    }
}
