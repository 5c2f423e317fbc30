use serde::Serialize;
use std::io::Write;

use crate::bank::question::CanonicalQuestion;
use crate::error::Result;


#[derive(Serialize)]
struct CsvRow<'a> {
    question: &'a str,
    option_a: &'a str,
    option_b: &'a str,
    option_c: &'a str,
    option_d: &'a str,
    answer: &'a str,
    explanation: &'a str,
    difficulty: &'a str,
}

impl<'a> From<&'a CanonicalQuestion> for CsvRow<'a> {
    fn from(question: &'a CanonicalQuestion) -> Self {
        let option = move |index: usize| question.options.get(index).map_or("", String::as_str);
        CsvRow {
            question: &question.question,
            option_a: option(0),
            option_b: option(1),
            option_c: option(2),
            option_d: option(3),
            answer: &question.answer,
            explanation: &question.explanation,
            difficulty: &question.difficulty,
        }
    }
}

/// Writes questions as CSV, one row per question. Options past the fourth
/// are not exported.
pub fn write_csv<W: Write>(questions: &[CanonicalQuestion], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for question in questions {
        csv_writer.serialize(CsvRow::from(question))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
