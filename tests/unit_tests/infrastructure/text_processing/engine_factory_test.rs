use filing_ingest::domain::ExtractionMode;
use filing_ingest::infrastructure::text_processing::{EngineFactoryError, ExtractionEngines};
use filing_ingest::presentation::config::{
    ExtractionSettings, LoggingSettings, ServerSettings, Settings, VisionSettings,
};

fn settings(vision: VisionSettings) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_mb: 10,
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            json: false,
        },
        extraction: ExtractionSettings {
            mode: ExtractionMode::Vision,
            ocr_language: "pt-BR".to_string(),
            batch_size: 50,
            render_dpi: 150.0,
            bulk_min_chars: 50,
            set_min_chars: 100,
            pdfium_library_path: None,
        },
        vision,
    }
}

fn vision(enabled: bool, base_url: Option<&str>, model: Option<&str>) -> VisionSettings {
    VisionSettings {
        enabled,
        base_url: base_url.map(str::to_string),
        model: model.map(str::to_string),
        api_key: None,
        max_tokens: 4096,
        timeout_secs: 30,
    }
}

#[test]
fn given_vision_disabled_when_building_engines_then_router_has_no_vision_engine() {
    let engines = ExtractionEngines::from_settings(&settings(vision(false, None, None))).unwrap();

    assert!(!engines.router.has_vision());
    assert_eq!(engines.mode, ExtractionMode::Vision);
}

#[test]
fn given_complete_vision_settings_when_building_engines_then_router_has_vision_engine() {
    let engines = ExtractionEngines::from_settings(&settings(vision(
        true,
        Some("http://localhost:1234"),
        Some("qwen2.5-vl"),
    )))
    .unwrap();

    assert!(engines.router.has_vision());
}

#[test]
fn given_vision_without_base_url_when_building_engines_then_fails() {
    let result =
        ExtractionEngines::from_settings(&settings(vision(true, None, Some("qwen2.5-vl"))));

    assert!(matches!(result, Err(EngineFactoryError::MissingVisionBaseUrl)));
}

#[test]
fn given_vision_without_model_when_building_engines_then_fails() {
    let result = ExtractionEngines::from_settings(&settings(vision(
        true,
        Some("http://localhost:1234"),
        None,
    )));

    assert!(matches!(result, Err(EngineFactoryError::MissingVisionModel)));
}
