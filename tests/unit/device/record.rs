use super::*;
use crate::model::capture::CaptureConfig;

fn registry() -> Registry {
    Registry::builder()
        .scenario(ScenarioSpec::new("intro", CaptureConfig::default()), "Intro")
        .scenario(ScenarioSpec::new("chart", CaptureConfig::default()), "Chart")
        .build()
        .unwrap()
}

#[test]
fn config_file_fills_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("recorder.json");
    std::fs::write(&path, r#"{ "application_id": "com.example", "gif_width": 320 }"#).unwrap();

    let cfg = RecorderConfig::from_path(&path).unwrap();
    assert_eq!(cfg.application_id, "com.example");
    assert_eq!(cfg.gif_width, 320);
    assert_eq!(cfg.adb_serial, "auto");
    assert_eq!(cfg.output_dir, PathBuf::from("artifacts/gifs"));
    assert_eq!(cfg.test_class, DEFAULT_TEST_CLASS);
    cfg.validate().unwrap();
}

#[test]
fn config_requires_application_id() {
    let err = RecorderConfig::default().validate().unwrap_err();
    assert_eq!(
        err.as_validation().map(|v| v.field.as_str()),
        Some("application_id")
    );
}

#[test]
fn malformed_config_is_a_serde_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("recorder.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        RecorderConfig::from_path(&path),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn selection_supports_all_named_and_first() {
    let reg = registry();
    let names = |cfg: &RecorderConfig| -> Vec<String> {
        cfg.select(&reg)
            .unwrap()
            .into_iter()
            .map(|s| s.name.clone())
            .collect()
    };

    let mut cfg = RecorderConfig::default();
    assert_eq!(names(&cfg), ["intro", "chart"]);

    cfg.scenario = "chart".to_owned();
    assert_eq!(names(&cfg), ["chart"]);

    cfg.scenario = String::new();
    assert_eq!(names(&cfg), ["intro"]);

    cfg.scenario = "missing".to_owned();
    assert!(matches!(
        cfg.select(&reg),
        Err(ReelError::UnknownScenario { .. })
    ));
}

#[test]
fn encode_options_follow_scenario_fps() {
    let mut spec = ScenarioSpec::new("intro", CaptureConfig::default());
    spec.capture.fps = 24;
    let cfg = RecorderConfig {
        gif_height: 200,
        ..RecorderConfig::default()
    };
    let opts = cfg.encode_opts(&spec);
    assert_eq!((opts.fps, opts.width, opts.height), (24, 540, 200));
}

#[test]
fn record_fails_fast_on_invalid_config() {
    let err = record_scenarios(&RecorderConfig::default(), &registry()).unwrap_err();
    assert!(err.as_validation().is_some());
}
