use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use unidecode::unidecode;

#[cfg(test)]
mod tests;

pub const DATASET_EXTENSION: &str = ".json";

lazy_static! {
    static ref COUNT_PREFIX_REGEX: Regex = Regex::new(r"(?i)^\d+\s+").unwrap();
    static ref MARKER_SUFFIX_REGEX: Regex = Regex::new(r"(?i)\s+MCQs$").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// One practice subject, backed by a single dataset file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub file_name: String,
}

/// Result of listing the dataset directory.
///
/// A directory that is missing or cannot be listed is not an error: it
/// produces `Unavailable`, which holds no topics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Catalog {
    Listed(Vec<Topic>),
    Unavailable(PathBuf),
}

impl Catalog {
    pub fn topics(&self) -> &[Topic] {
        match self {
            Catalog::Listed(topics) => topics,
            Catalog::Unavailable(_) => &[],
        }
    }

    pub fn into_topics(self) -> Vec<Topic> {
        match self {
            Catalog::Listed(topics) => topics,
            Catalog::Unavailable(_) => Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Catalog::Listed(_))
    }
}

pub fn read_catalog(dir: &Path) -> Catalog {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(?dir, "Topic directory unavailable: {}", e);
            return Catalog::Unavailable(dir.to_path_buf());
        }
    };

    let mut file_names = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => file_names.push(entry.file_name().to_string_lossy().into_owned()),
            Err(e) => {
                warn!(?dir, "Could not list topic directory: {}", e);
                return Catalog::Unavailable(dir.to_path_buf());
            }
        }
    }

    let topics = build_topics(file_names);
    debug!(?dir, count = topics.len(), "Found topics");
    Catalog::Listed(topics)
}

/// Display name of a dataset file: "1000 Data Structures MCQs.json" becomes
/// "Data Structures".
pub fn topic_name(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(DATASET_EXTENSION)
        .unwrap_or(file_name);
    let stem = COUNT_PREFIX_REGEX.replace(stem, "");
    let stem = MARKER_SUFFIX_REGEX.replace(&stem, "");
    stem.trim().to_owned()
}

pub fn slugify(name: &str) -> String {
    WHITESPACE_REGEX
        .replace_all(&name.to_lowercase(), "-")
        .replace('+', "plus")
}

fn collation_key(name: &str) -> String {
    unidecode(name).to_lowercase()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

pub(crate) fn build_topics<I>(file_names: I) -> Vec<Topic>
where
    I: IntoIterator<Item = String>,
{
    let named = file_names
        .into_iter()
        .filter(|file_name| file_name.ends_with(DATASET_EXTENSION))
        .filter_map(|file_name| {
            let name = topic_name(&file_name);
            if name.is_empty() {
                debug!(%file_name, "Skipping dataset file without a topic name");
                return None;
            }
            Some((name, file_name))
        })
        .sorted_by(|(name_a, file_a), (name_b, file_b)| {
            compare_names(name_a, name_b).then_with(|| file_a.cmp(file_b))
        })
        .map(|(name, file_name)| (slugify(&name), name, file_name))
        .collect::<Vec<_>>();

    // A bare slug belongs to the first topic producing it. Suffixed ids skip
    // every bare slug of the catalog.
    let natural: HashSet<String> = named.iter().map(|(slug, _, _)| slug.clone()).collect();
    let mut taken = HashSet::new();
    named
        .into_iter()
        .map(|(slug, name, file_name)| {
            let mut id = slug.clone();
            let mut suffix = 1;
            while taken.contains(&id) || (suffix > 1 && natural.contains(&id)) {
                suffix += 1;
                id = format!("{}-{}", slug, suffix);
            }
            if suffix > 1 {
                warn!(%name, %id, "Topic slug collision, using suffixed id");
            }
            taken.insert(id.clone());
            Topic {
                id,
                name,
                file_name,
            }
        })
        .collect()
}
