use docx_rs::{Docx, Paragraph, Run};
use lecture_agent::config::{AgentConfig, ProviderKind};
use lecture_agent::error::AgentError;
use lecture_agent::extract::document_parser::read_docx;
use lecture_agent::extract::DocumentExtractor;
use lecture_agent::pipeline::{GenerationOrchestrator, PipelineDriver, RawDocument};
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

const KINEMATICS: &str = "Velocity is the rate of change of position.\n\
Acceleration is the rate of change of velocity.\n\n\
v = d / t\n\
where v is velocity, d is distance, t is time.";

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    docx.build().pack(File::create(path).unwrap()).unwrap();
}

fn local_config(input: &Path, output: &Path) -> AgentConfig {
    AgentConfig {
        provider: ProviderKind::Local,
        api_key: None,
        input_dir: input.to_path_buf(),
        output_dir: Some(output.to_path_buf()),
        ..AgentConfig::default()
    }
}

fn read_back(path: &Path) -> String {
    read_docx(&fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_directory_run_without_provider() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("kinematics.txt"), KINEMATICS).unwrap();
    write_docx(
        &input.path().join("energy notes.docx"),
        &[
            "Energy is the capacity to do work.",
            "The energy equation is E = m * c^2. Here E is energy, m is mass, c is the speed of light.",
        ],
    );
    fs::write(input.path().join("slides.pptx"), b"not a lecture").unwrap();

    let result = lecture_agent::process_directory(&local_config(input.path(), output.path()))
        .await
        .unwrap();

    let files: Vec<&str> = result.summaries.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["energy notes.docx", "kinematics.txt"]);
    assert!(result.failed.is_empty());
    assert!(result.summaries.iter().all(|r| !r.bullets.is_empty()));
    assert!(result.flashcards.iter().all(|r| !r.cards.is_empty()));

    let energy = &result.formulas[0].formulas[0];
    assert_eq!(energy.symbols.get("E").map(String::as_str), Some("energy"));
    assert_eq!(energy.symbols.get("m").map(String::as_str), Some("mass"));

    for name in [
        "summaries.docx",
        "flashcards.docx",
        "formula_sheet.docx",
        "energy_notes_summary.docx",
        "energy_notes_flashcards.docx",
        "energy_notes_formula.docx",
        "kinematics_summary.docx",
        "kinematics_flashcards.docx",
        "kinematics_formula.docx",
    ] {
        assert!(output.path().join(name).is_file(), "{name} missing");
    }

    let sheet = read_back(&output.path().join("formula_sheet.docx"));
    assert!(sheet.starts_with("Formula Sheet\nenergy notes.docx\n"));
    assert!(sheet.contains("Variables:"));
    assert!(sheet.contains("d: distance"));

    let cards = read_back(&output.path().join("kinematics_flashcards.docx"));
    assert!(cards.starts_with("Flashcards\nkinematics\nQ1. "));
}

#[tokio::test]
async fn test_output_defaults_to_input_directory() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("notes.txt"), KINEMATICS).unwrap();
    let config = AgentConfig {
        output_dir: None,
        ..local_config(input.path(), input.path())
    };

    lecture_agent::process_directory(&config).await.unwrap();
    assert!(input.path().join("summaries.docx").is_file());
    assert!(input.path().join("notes_summary.docx").is_file());

    // Aggregates from the previous run are not treated as lectures
    let rerun = lecture_agent::process_directory(&config).await.unwrap();
    assert!(rerun
        .summaries
        .iter()
        .all(|r| !["summaries.docx", "flashcards.docx", "formula_sheet.docx"].contains(&r.file.as_str())));
}

#[tokio::test]
async fn test_missing_input_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let result = lecture_agent::process_directory(&local_config(&missing, dir.path())).await;
    assert!(matches!(result, Err(AgentError::MissingInput(_))));
}

#[tokio::test]
async fn test_unsupported_and_empty_documents_yield_empty_records() {
    let driver = PipelineDriver::new(DocumentExtractor::new(), GenerationOrchestrator::new(None, false));
    let output = driver
        .run(vec![
            RawDocument::new("deck.pptx", b"PK\x03\x04".to_vec()),
            RawDocument::new("blank.txt", b"   \n\n".to_vec()),
        ])
        .await;

    assert!(output.failed.is_empty());
    for i in 0..2 {
        assert!(output.summaries[i].bullets.is_empty());
        assert!(output.flashcards[i].cards.is_empty());
        assert!(output.formulas[i].formulas.is_empty());
    }
}
