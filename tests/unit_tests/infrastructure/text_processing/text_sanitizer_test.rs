use filing_ingest::infrastructure::text_processing::sanitize_transcription;

#[test]
fn given_fenced_output_when_sanitizing_then_fences_are_removed() {
    let raw = "```text\nPETIÇÃO INICIAL\n```";
    assert_eq!(sanitize_transcription(raw), "PETIÇÃO INICIAL");
}

#[test]
fn given_word_split_across_lines_when_sanitizing_then_it_is_rejoined() {
    let raw = "o requeri-\nmento foi deferido";
    assert_eq!(sanitize_transcription(raw), "o requerimento foi deferido");
}

#[test]
fn given_hyphen_before_capitalized_line_when_sanitizing_then_line_break_is_kept() {
    let raw = "Processo n. 123-\nVara Cível";
    assert_eq!(sanitize_transcription(raw), "Processo n. 123-\nVara Cível");
}

#[test]
fn given_repeated_blank_lines_when_sanitizing_then_single_paragraph_gap_remains() {
    let raw = "  first   line \n\n\n\n second\tline  ";
    assert_eq!(sanitize_transcription(raw), "first line\n\nsecond line");
}

#[test]
fn given_decomposed_accents_when_sanitizing_then_they_are_composed() {
    assert_eq!(sanitize_transcription("peti\u{0063}\u{0327}a\u{0303}o"), "petição");
}

#[test]
fn given_ordinal_indicators_when_sanitizing_then_they_are_preserved() {
    assert_eq!(
        sanitize_transcription("Lei nº 8.078, art. 5º, 1ª Vara"),
        "Lei nº 8.078, art. 5º, 1ª Vara"
    );
}
