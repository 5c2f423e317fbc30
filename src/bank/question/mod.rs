use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use unidecode::unidecode;


const QUESTION_KEYS: &[&str] = &["question", "Question", "title", "q"];
const ANSWER_KEYS: &[&str] = &["answer", "Answer", "correctAnswer", "correct"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "Explanation", "solution"];
const DIFFICULTY_KEYS: &[&str] = &["difficulty", "Difficulty"];

pub const DEFAULT_DIFFICULTY: &str = "medium";

lazy_static! {
    static ref OPTION_LETTER_PREFIX_REGEX: Regex = Regex::new(r"(?i)^[a-d]\)\s*").unwrap();
    static ref ANSWER_LETTER_REGEX: Regex = Regex::new(r"(?i)Answer:\s*([a-d])\b").unwrap();
    static ref EXPLANATION_MARKER_REGEX: Regex = Regex::new(r"(?i)Explanation:").unwrap();
    static ref FORBIDDEN_COMPARISON_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

/// Where a dataset batch keeps its answer options.
enum OptionSource {
    /// A list whose entries are used as they are.
    List(&'static str),
    /// A list whose entries carry an "a) " style label.
    LabelledList(&'static str),
    /// Four discrete fields, each with its accepted key spellings.
    Fields([&'static [&'static str]; 4]),
}

/// Tried in order. The first source yielding a non-empty option wins and
/// sources are never combined.
const OPTION_SOURCES: &[OptionSource] = &[
    OptionSource::List("options"),
    OptionSource::LabelledList("Options"),
    OptionSource::Fields([&["a", "A"], &["b", "B"], &["c", "C"], &["d", "D"]]),
    OptionSource::Fields([
        &["Option A", "option A"],
        &["Option B", "option B"],
        &["Option C", "option C"],
        &["Option D", "option D"],
    ]),
    OptionSource::Fields([&["option1"], &["option2"], &["option3"], &["option4"]]),
];

impl OptionSource {
    fn extract(&self, record: &Map<String, Value>) -> Vec<String> {
        match self {
            OptionSource::List(key) => list(record, key).map(to_text).collect(),
            OptionSource::LabelledList(key) => list(record, key)
                .map(|option| strip_option_label(&to_text(option)))
                .collect(),
            OptionSource::Fields(slots) => slots
                .iter()
                .filter_map(|keys| first_present(record, keys))
                .map(to_text)
                .collect(),
        }
    }
}

/// One record of a dataset file, in whatever shape its batch uses.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawQuestion(pub Value);

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CanonicalQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// A lowercase option letter when one could be derived, otherwise the
    /// answer text as found in the dataset.
    pub answer: String,
    pub explanation: String,
    pub difficulty: String,
}

impl CanonicalQuestion {
    pub fn is_usable(&self) -> bool {
        !self.question.is_empty() && self.options.len() >= 2
    }

    /// Index of the correct option, matching either an option letter or the
    /// text of an option.
    pub fn correct_option(&self) -> Option<usize> {
        self.option_index(&self.answer)
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        match (self.correct_option(), self.option_index(choice)) {
            (Some(correct), Some(chosen)) => correct == chosen,
            _ => false,
        }
    }

    fn option_index(&self, reference: &str) -> Option<usize> {
        let reference = reference.trim();
        if let Some(index) = letter_index(reference).filter(|&index| index < self.options.len()) {
            return Some(index);
        }
        let wanted = sanitize(reference);
        if wanted.is_empty() {
            return None;
        }
        self.options
            .iter()
            .position(|option| sanitize(option) == wanted)
    }
}

impl From<RawQuestion> for CanonicalQuestion {
    fn from(raw_question: RawQuestion) -> Self {
        normalize(&raw_question.0)
    }
}

/// Normalizes one dataset record. Missing or malformed fields degrade to
/// empty values; anything that is not a JSON object is an empty record.
pub fn normalize(record: &Value) -> CanonicalQuestion {
    let empty = Map::new();
    let record = record.as_object().unwrap_or(&empty);

    let question = first_present(record, QUESTION_KEYS)
        .map(to_text)
        .unwrap_or_default();

    let options = OPTION_SOURCES
        .iter()
        .map(|source| source.extract(record))
        .find(|options| options.iter().any(|option| !option.is_empty()))
        .unwrap_or_default();

    let raw_answer = first_present(record, ANSWER_KEYS)
        .map(to_text)
        .unwrap_or_default();
    let raw_answer = raw_answer.trim();

    let explanation = first_present(record, EXPLANATION_KEYS)
        .map(to_text)
        .or_else(|| explanation_from_answer(raw_answer))
        .unwrap_or_default();

    let difficulty = first_present(record, DIFFICULTY_KEYS)
        .map(|difficulty| to_text(difficulty).to_lowercase())
        .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_owned());

    CanonicalQuestion {
        question,
        options,
        answer: answer_key(raw_answer),
        explanation,
        difficulty,
    }
}

/// `Answer: <a-d>` anywhere in the text gives the letter, provided nothing
/// alphanumeric follows it ("Answer: because" is not `b`). A one-character
/// answer is lowercased. Anything else is kept verbatim.
fn answer_key(raw_answer: &str) -> String {
    if let Some(captures) = ANSWER_LETTER_REGEX.captures(raw_answer) {
        return captures[1].to_lowercase();
    }
    if raw_answer.chars().count() == 1 {
        return raw_answer.to_lowercase();
    }
    raw_answer.to_owned()
}

fn explanation_from_answer(raw_answer: &str) -> Option<String> {
    EXPLANATION_MARKER_REGEX
        .splitn(raw_answer, 3)
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.trim().to_owned())
}

fn strip_option_label(option: &str) -> String {
    OPTION_LETTER_PREFIX_REGEX
        .replace(option, "")
        .trim()
        .to_owned()
}

/// Position named by a lone option letter `a`..`d`.
fn letter_index(reference: &str) -> Option<usize> {
    let mut chars = reference.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => match letter.to_ascii_lowercase() {
            letter @ 'a'..='d' => Some((letter as u8 - b'a') as usize),
            _ => None,
        },
        _ => None,
    }
}

fn sanitize(text: &str) -> String {
    let text = unidecode(text);
    FORBIDDEN_COMPARISON_CHARACTERS_REGEX
        .replace_all(&text.to_lowercase(), "")
        .into()
}

/// Null, false, zero and the empty string count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_present<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_present(value))
}

fn list<'a>(record: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
