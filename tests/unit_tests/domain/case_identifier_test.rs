use filing_ingest::domain::CaseIdentifier;

#[test]
fn given_mixed_case_code_in_filename_when_finding_then_only_docket_is_captured() {
    let identifier = CaseIdentifier::find("ATOrd_0001234-56.2023.5.02.0001_peticao.pdf").unwrap();

    assert_eq!(identifier.prefix, None);
    assert_eq!(identifier.docket, "0001234-56.2023.5.02.0001");
}

#[test]
fn given_uppercase_case_type_code_when_finding_then_prefix_is_kept() {
    let identifier = CaseIdentifier::find("ATSUM-0001234-56.2023.5.02.0001.pdf").unwrap();

    assert_eq!(identifier.prefix.as_deref(), Some("ATSUM"));
    assert_eq!(identifier.to_string(), "ATSUM 0001234-56.2023.5.02.0001");
}

#[test]
fn given_code_after_underscore_when_finding_then_prefix_is_kept() {
    let identifier = CaseIdentifier::find("processo_ACP_0001234-56.2023.5.02.0001.pdf").unwrap();

    assert_eq!(identifier.prefix.as_deref(), Some("ACP"));
    assert_eq!(identifier.docket, "0001234-56.2023.5.02.0001");
}

#[test]
fn given_docket_inside_sentence_when_finding_then_docket_is_returned() {
    let identifier =
        CaseIdentifier::find("Autos do processo nº 0009999-11.2022.8.26.0100, em trâmite").unwrap();

    assert_eq!(identifier.prefix, None);
    assert_eq!(identifier.to_string(), "0009999-11.2022.8.26.0100");
}

#[test]
fn given_several_dockets_when_finding_then_first_one_wins() {
    let identifier = CaseIdentifier::find(
        "0000001-00.2020.5.01.0001 apensado a 0000002-00.2020.5.01.0002",
    )
    .unwrap();

    assert_eq!(identifier.docket, "0000001-00.2020.5.01.0001");
}

#[test]
fn given_docket_embedded_in_longer_number_when_finding_then_returns_none() {
    assert_eq!(
        CaseIdentifier::find("90001234-56.2023.5.02.00011"),
        None
    );
}

#[test]
fn given_malformed_docket_when_finding_then_returns_none() {
    assert_eq!(CaseIdentifier::find("processo 1234-56.2023.5.02.0001"), None);
    assert_eq!(CaseIdentifier::find("no identifier here"), None);
}
