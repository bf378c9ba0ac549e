// specter-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use specter_core::{DetectorKind, ReplacerKind, SpecterConfig, SpecterError};

#[test]
fn test_load_defaults_has_detectors_and_replacers() {
    let config = SpecterConfig::load_defaults().unwrap();
    assert!(config.detectors.iter().any(|d| d.name == "emails"));
    assert!(config.replacers.iter().any(|r| r.name == "scramble"));
    // Default render options are present even without a config file.
    assert_eq!(config.render.highlight_color, [0, 0, 0]);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
detectors:
  - name: badge_numbers
    label: badge
    languages: [en]
    kind: pattern
    patterns:
      - pattern: "badge ([0-9]{4})"
        group: 1

replacers:
  - name: scramble
    kind: scramble
    memory: true
    seed: 99

render:
  highlight_color: [255, 255, 0]
  max_font_size: 24
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = SpecterConfig::load_from_file(file.path())?;
    assert_eq!(config.detectors.len(), 1);
    assert_eq!(config.detectors[0].label, "badge");
    let DetectorKind::Pattern { patterns } = &config.detectors[0].kind;
    assert_eq!(patterns[0].group(), 1);

    assert_eq!(config.replacers[0].seed, Some(99));
    assert!(matches!(
        config.replacers[0].kind,
        ReplacerKind::Scramble { .. }
    ));

    assert_eq!(config.render.highlight_color, [255, 255, 0]);
    assert_eq!(config.render.max_font_size, 24);
    Ok(())
}

#[test]
fn test_defaults_apply_when_fields_are_omitted() -> Result<()> {
    let yaml_content = r#"
detectors:
  - name: words
    label: word
    kind: pattern
    patterns:
      - "secret"

replacers:
  - name: label
    kind: label
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = SpecterConfig::load_from_file(file.path())?;
    assert_eq!(config.detectors[0].languages, vec!["en".to_string()]);
    assert!(config.detectors[0].active);
    assert!(!config.replacers[0].memory);
    let ReplacerKind::Label { prefix, suffix } = &config.replacers[0].kind else {
        panic!("expected a label replacer");
    };
    assert_eq!((prefix.as_str(), suffix.as_str()), ("<", ">"));
    Ok(())
}

#[test]
fn test_duplicate_detector_names_fail_loading() -> Result<()> {
    let yaml_content = r#"
detectors:
  - name: twice
    label: a
    kind: pattern
    patterns: ["a"]
  - name: twice
    label: b
    kind: pattern
    patterns: ["b"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let err = SpecterConfig::load_from_file(file.path()).unwrap_err();
    let specter_err = err.downcast_ref::<SpecterError>().unwrap();
    assert!(matches!(specter_err, SpecterError::DuplicateDetector(name) if name == "twice"));
    Ok(())
}

#[test]
fn test_unparseable_yaml_fails_loading() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"detectors: [not: {valid")?;
    assert!(SpecterConfig::load_from_file(file.path()).is_err());
    Ok(())
}
