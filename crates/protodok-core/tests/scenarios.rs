//! End-to-end extraction scenarios over in-memory paragraph streams

use protodok_core::{
    extract_sections, parse_abstract, process_document, AbstractScan, Document, Paragraph,
    ResultMapping,
};

fn h1(text: &str) -> Paragraph {
    Paragraph::new("Heading 1", text)
}

fn h2(text: &str) -> Paragraph {
    Paragraph::new("Heading 2", text)
}

fn body(text: &str) -> Paragraph {
    Paragraph::new("Normal", text)
}

fn protocol() -> Document {
    Document::new(vec![
        body("Non-interventional study protocol"),
        h1("Title"),
        body("Risk of falls in elderly adults"),
        h1("Abstract"),
        body("Title: Risk of falls"),
        body("Rationale and background: Falls are common"),
        body("Population: elderly adults"),
        body("Study Design: retrospective cohort"),
        h1("Rationale and Background"),
        body("Falls are a leading cause of injury."),
        body(""),
        body("Prior studies are limited."),
        h1("Study Design"),
        body("Retrospective cohort using claims."),
        h1("Population"),
        body("full cohort description"),
        h2("Data Source"),
        body("Claims database"),
        h1("Annex"),
        body("Population: not part of the abstract"),
    ])
}

#[test]
fn test_full_protocol() {
    let result = process_document(&protocol());

    assert_eq!(
        result.keys().collect::<Vec<_>>(),
        vec![
            "TITLE",
            "RATIONALE AND BACKGROUND",
            "STUDY DESIGN",
            "POPULATION",
            "DATA SOURCE"
        ]
    );

    let population = result.get("POPULATION").unwrap();
    assert_eq!(population.section, "full cohort description");
    assert_eq!(population.abstract_text.as_deref(), Some("elderly adults"));

    let background = result.get("RATIONALE AND BACKGROUND").unwrap();
    assert_eq!(
        background.section,
        "Falls are a leading cause of injury.\n\nPrior studies are limited."
    );
    assert_eq!(
        background.abstract_text.as_deref(),
        Some("falls are common")
    );

    // Abstract has no DATA SOURCE line
    assert_eq!(result.get("DATA SOURCE").unwrap().abstract_text, None);
}

#[test]
fn test_abstract_fragments_stop_at_next_heading() {
    let scan = parse_abstract(&protocol());
    let labels = scan.labels().unwrap();
    assert_eq!(labels.len(), 4);
    assert_eq!(labels["population"], "elderly adults");
    assert!(labels.values().all(|v| !v.contains("not part")));
}

#[test]
fn test_sections_never_include_abstract() {
    let sections = extract_sections(&protocol());
    assert!(sections
        .iter()
        .all(|s| s.heading.trim().to_uppercase() != "ABSTRACT"));
    assert_eq!(sections.len(), 6);
}

#[test]
fn test_population_scenario() {
    let doc = Document::new(vec![
        h1("Title"),
        body("Protocol"),
        h1("Abstract"),
        body("Population: elderly adults"),
        h1("Study Design"),
        body("cohort"),
        h1("Population"),
        body("full cohort description"),
    ]);

    let result = process_document(&doc);
    let entry = result.get("POPULATION").unwrap();
    assert_eq!(entry.section, "full cohort description");
    assert_eq!(entry.abstract_text.as_deref(), Some("elderly adults"));
}

#[test]
fn test_empty_document() {
    let doc = Document::default();
    assert!(extract_sections(&doc).is_empty());
    assert_eq!(parse_abstract(&doc), AbstractScan::NotFound);
    assert!(process_document(&doc).is_empty());
}

#[test]
fn test_no_abstract_means_no_abstract_keys() {
    let doc = Document::new(vec![
        h1("Title"),
        body("Population: adults"),
        h1("Population"),
        body("cohort"),
    ]);

    let result = process_document(&doc);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|(_, e)| e.abstract_text.is_none()));
    assert!(!result.to_json().unwrap().contains("\"abstract\""));
}

#[test]
fn test_last_heading_wins_across_document() {
    let doc = Document::new(vec![
        h1("Study Population"),
        body("first body"),
        h1("Title"),
        body("t"),
        h2("Population (revised)"),
        body("second body"),
    ]);

    let result = process_document(&doc);
    assert_eq!(result.get("POPULATION").unwrap().section, "second body");
}

#[test]
fn test_result_round_trip_through_json() {
    let result = process_document(&protocol());
    let json = result.to_json().unwrap();
    let restored = ResultMapping::from_json(&json).unwrap();
    assert_eq!(restored, result);
}
