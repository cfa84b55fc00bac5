use rc1_core::{check_invariants, load_corpus, Rc1Error, Sample, CI_SAMPLES};
use tempfile::tempdir;

#[test]
fn builtin_samples_hold_every_invariant() {
    let report = check_invariants(&Sample::builtin());
    assert_eq!(report.samples_checked, CI_SAMPLES.len());
    assert!(report.passed(), "failures: {:?}", report.failures);
}

#[test]
fn corpus_of_plain_strings_gets_positional_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    std::fs::write(&path, r#"["The code runs.", "Always validate input."]"#).unwrap();

    let samples = load_corpus(&path).unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].id, "sample_0");
    assert_eq!(samples[1].id, "sample_1");
    assert_eq!(samples[1].text, "Always validate input.");
}

#[test]
fn corpus_of_objects_keeps_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    std::fs::write(
        &path,
        r#"[{"id": "intro", "text": "We deploy intelligence into humanity."}, "The code runs."]"#,
    )
    .unwrap();

    let samples = load_corpus(&path).unwrap();
    assert_eq!(samples[0], Sample::new("intro", "We deploy intelligence into humanity."));
    assert_eq!(samples[1].id, "sample_1");

    let report = check_invariants(&samples);
    assert!(report.passed());
}

#[test]
fn empty_corpus_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "[]").unwrap();

    let err = load_corpus(&path).unwrap_err();
    assert!(matches!(err, Rc1Error::EmptyCorpus(_)));
}

#[test]
fn malformed_corpus_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"text": "not an array"}"#).unwrap();

    let err = load_corpus(&path).unwrap_err();
    assert!(matches!(err, Rc1Error::Serialization(_)));
}

#[test]
fn missing_corpus_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_corpus(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Rc1Error::Io(_)));
}
