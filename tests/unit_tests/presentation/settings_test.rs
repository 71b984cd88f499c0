use filing_ingest::domain::ExtractionMode;
use filing_ingest::presentation::config::{Environment, Settings};

#[test]
fn given_no_config_files_when_loading_settings_then_defaults_apply() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.server.max_upload_mb, 100);
    assert_eq!(settings.extraction.mode, ExtractionMode::Pure);
    assert_eq!(settings.extraction.ocr_language, "pt-BR");
    assert_eq!(settings.extraction.batch_size, 50);
    assert_eq!(settings.extraction.bulk_min_chars, 50);
    assert_eq!(settings.extraction.set_min_chars, 100);
    assert_eq!(settings.extraction.pdfium_library_path, None);
    assert!(!settings.vision.enabled);
    assert_eq!(settings.vision.base_url, None);
}

#[test]
fn given_environment_names_when_parsing_then_aliases_are_accepted() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("dev".to_string()),
        Ok(Environment::Local)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_prod_environment_when_choosing_log_format_then_json_is_preferred() {
    assert!(Environment::Prod.prefers_json_logs());
    assert!(!Environment::Local.prefers_json_logs());
}

#[test]
fn given_unrecognized_mode_in_environment_when_loading_settings_then_pure_is_used() {
    // Any value other than vision/disabled resolves to pure, so concurrent
    // loads in this binary observe the same mode.
    unsafe { std::env::set_var("APP__EXTRACTION__MODE", "OCR") };

    let settings = Settings::load(Environment::Test);

    unsafe { std::env::remove_var("APP__EXTRACTION__MODE") };
    assert_eq!(settings.unwrap().extraction.mode, ExtractionMode::Pure);
}
