use serde::{Deserialize, Serialize};

use crate::bank::question::CanonicalQuestion;
use crate::error::{Error, Result};


pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// One-based page number and page size.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub topic_name: String,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub questions: Vec<CanonicalQuestion>,
}

/// Cuts one page out of the usable questions, preserving their order.
///
/// Pages past the end (and page 0) are empty but still report the totals.
pub fn paginate(
    topic_name: String,
    questions: Vec<CanonicalQuestion>,
    request: PageRequest,
) -> Result<Page> {
    let PageRequest { page, limit } = request;
    if limit == 0 {
        return Err(Error::InvalidLimit);
    }

    let total = questions.len();
    let total_pages = total / limit + usize::from(total % limit != 0);
    let questions = match page.checked_sub(1) {
        Some(index) => questions
            .into_iter()
            .skip(index.saturating_mul(limit))
            .take(limit)
            .collect(),
        None => Vec::new(),
    };

    Ok(Page {
        topic_name,
        total,
        page,
        limit,
        total_pages,
        questions,
    })
}
