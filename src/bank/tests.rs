use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

use super::*;

struct BankBuilder {
    dir: TempDir,
}

impl BankBuilder {
    fn new() -> Self {
        BankBuilder {
            dir: TempDir::new().unwrap(),
        }
    }

    fn dataset(self, file_name: &str, records: Value) -> Self {
        fs::write(self.dir.path().join(file_name), records.to_string()).unwrap();
        self
    }

    fn raw_file(self, file_name: &str, content: &str) -> Self {
        fs::write(self.dir.path().join(file_name), content).unwrap();
        self
    }

    fn build(self) -> (TempDir, QuestionBank) {
        let bank = QuestionBank::new(self.dir.path());
        (self.dir, bank)
    }
}

fn java_records() -> Value {
    json!([
        { "question": "Q1", "options": ["a", "b"], "answer": "a" },
        { "question": "", "options": ["a", "b"], "answer": "a" },
        { "Question": "Q2", "Options": ["a) x", "b) y", "c) z"], "Answer": "Answer: c\nExplanation: z it is" },
        { "question": "Q3", "options": ["only one"] },
        "not even an object",
        { "q": "Q4", "A": "x", "B": "y", "correct": "Paris" },
        { "title": "Q5", "option1": "x", "option2": "y", "Difficulty": "Easy" }
    ])
}

#[test]
fn lists_topics() {
    let (_dir, bank) = BankBuilder::new()
        .dataset("1000 Java MCQs.json", json!([]))
        .dataset("1000 C++ MCQs.json", json!([]))
        .build();
    let catalog = bank.list_topics();
    let ids: Vec<&str> = catalog.topics().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["cplusplus", "java"]);
}

#[test]
fn missing_directory_lists_nothing() {
    let bank = QuestionBank::new("/definitely/not/a/real/dataset/dir");
    assert!(!bank.list_topics().is_available());
    assert!(matches!(
        bank.questions_page("java", PageRequest::default()),
        Err(Error::TopicNotFound(_))
    ));
}

#[test]
fn drops_unusable_records_silently() {
    let (_dir, bank) = BankBuilder::new()
        .dataset("1000 Java MCQs.json", java_records())
        .build();
    let page = bank.questions_page("java", PageRequest::default()).unwrap();
    assert_eq!(page.topic_name, "Java");
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 1);
    let texts: Vec<&str> = page.questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, ["Q1", "Q2", "Q4", "Q5"]);
    assert!(page.questions.iter().all(CanonicalQuestion::is_usable));

    assert_eq!(page.questions[1].options, ["x", "y", "z"]);
    assert_eq!(page.questions[1].answer, "c");
    assert_eq!(page.questions[1].explanation, "z it is");
    assert_eq!(page.questions[2].answer, "Paris");
    assert_eq!(page.questions[3].difficulty, "easy");
}

#[test]
fn pages_follow_dataset_order() {
    let (_dir, bank) = BankBuilder::new()
        .dataset("1000 Java MCQs.json", java_records())
        .build();
    let request = PageRequest { page: 2, limit: 3 };
    let page = bank.questions_page("Java", request).unwrap();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.questions.len(), 1);
    assert_eq!(page.questions[0].question, "Q5");

    let again = bank.questions_page("Java", request).unwrap();
    assert_eq!(page, again);
}

#[test]
fn accepts_wrapped_dataset() {
    let (_dir, bank) = BankBuilder::new()
        .dataset(
            "1000 HTML MCQs.json",
            json!({ "questions": [{ "question": "Q", "options": ["x", "y"] }] }),
        )
        .build();
    let page = bank.questions_page("html", PageRequest::default()).unwrap();
    assert_eq!(page.total, 1);
}

#[test]
fn unknown_topic_is_not_found() {
    let (_dir, bank) = BankBuilder::new()
        .dataset("1000 Java MCQs.json", json!([]))
        .build();
    let error = bank
        .questions_page("nonexistent-topic-xyz", PageRequest::default())
        .unwrap_err();
    assert_eq!(error.to_string(), "Topic \"nonexistent-topic-xyz\" not found");
}

#[test]
fn malformed_dataset_is_reported() {
    let (_dir, bank) = BankBuilder::new()
        .raw_file("1000 Java MCQs.json", "[{ not json")
        .build();
    assert!(matches!(
        bank.questions_page("java", PageRequest::default()),
        Err(Error::MalformedDataset { .. })
    ));
}

#[test]
fn unreadable_dataset_is_distinct_from_missing_topic() {
    let (dir, bank) = BankBuilder::new().build();
    fs::create_dir(dir.path().join("1000 Ruby MCQs.json")).unwrap();
    let topic = bank.resolve_topic("ruby").unwrap();
    assert_eq!(topic.file_name, "1000 Ruby MCQs.json");
    assert!(matches!(
        bank.questions_page("ruby", PageRequest::default()),
        Err(Error::DatasetUnavailable { .. })
    ));
}

#[test]
fn searches_topic_names() {
    let (_dir, bank) = BankBuilder::new()
        .dataset("1000 Java MCQs.json", json!([]))
        .dataset("1000 JavaScript MCQs.json", json!([]))
        .dataset("1000 Python MCQs.json", json!([]))
        .build();
    let names: Vec<String> = bank
        .search_topics("JAVA")
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["Java", "JavaScript"]);
    assert!(bank.search_topics("cobol").unwrap().is_empty());
    assert!(matches!(bank.search_topics("   "), Err(Error::EmptyQuery)));
}
