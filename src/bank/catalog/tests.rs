use std::fs::File;
use tempfile::TempDir;

use super::*;

fn names(file_names: &[&str]) -> Vec<String> {
    file_names.iter().map(|f| f.to_string()).collect()
}

#[test]
fn derives_name_from_file_name() {
    assert_eq!(topic_name("1000 Java MCQs.json"), "Java");
    assert_eq!(topic_name("1000 Data Structures & Algorithms I MCQs.json"), "Data Structures & Algorithms I");
    assert_eq!(topic_name("500   C++ mcqs.json"), "C++");
    assert_eq!(topic_name("Python.json"), "Python");
}

#[test]
fn slugs_are_lowercase_and_hyphenated() {
    assert_eq!(slugify("Data Structures & Algorithms I"), "data-structures-&-algorithms-i");
    assert_eq!(slugify("C++"), "cplusplus");
    assert_eq!(slugify("Cloud   Computing"), "cloud-computing");
}

#[test]
fn ignores_non_dataset_files() {
    let topics = build_topics(names(&["1000 Java MCQs.json", "README.md", "notes.txt"]));
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].name, "Java");
    assert_eq!(topics[0].file_name, "1000 Java MCQs.json");
}

#[test]
fn sorts_by_name() {
    let topics = build_topics(names(&[
        "1000 Unix MCQs.json",
        "1000 aerodynamics MCQs.json",
        "1000 C# MCQs.json",
        "1000 Cloud Computing MCQs.json",
    ]));
    let sorted: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(sorted, ["aerodynamics", "C#", "Cloud Computing", "Unix"]);
}

#[test]
fn ids_have_no_whitespace() {
    let topics = build_topics(names(&[
        "1000 Object Oriented Programming MCQs.json",
        "1000 R Programming MCQs.json",
    ]));
    for topic in &topics {
        assert_eq!(topic.id, topic.id.to_lowercase());
        assert!(!topic.id.chars().any(char::is_whitespace));
    }
}

#[test]
fn colliding_slugs_get_suffixes() {
    let topics = build_topics(names(&["1000 Java MCQs.json", "500 java MCQs.json"]));
    let ids: Vec<&str> = topics.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["java", "java-2"]);
}

#[test]
fn suffixes_skip_natural_slugs() {
    let topics = build_topics(names(&[
        "1000 Java MCQs.json",
        "500 java MCQs.json",
        "1000 Java 2 MCQs.json",
    ]));
    let ids: Vec<(&str, &str)> = topics.iter().map(|t| (t.name.as_str(), t.id.as_str())).collect();
    assert_eq!(ids, [("Java", "java"), ("java", "java-3"), ("Java 2", "java-2")]);
}

#[test]
fn missing_directory_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    let catalog = read_catalog(&missing);
    assert_eq!(catalog, Catalog::Unavailable(missing));
    assert!(catalog.topics().is_empty());
    assert!(!catalog.is_available());
}

#[test]
fn reads_directory() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("1000 Python MCQs.json")).unwrap();
    File::create(dir.path().join("1000 HTML MCQs.json")).unwrap();
    File::create(dir.path().join(".DS_Store")).unwrap();

    let catalog = read_catalog(dir.path());
    assert!(catalog.is_available());
    let ids: Vec<String> = catalog.into_topics().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["html", "python"]);
}

#[test]
fn empty_directory_is_listed() {
    let dir = TempDir::new().unwrap();
    let catalog = read_catalog(dir.path());
    assert_eq!(catalog, Catalog::Listed(Vec::new()));
}
