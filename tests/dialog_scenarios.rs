//! End-to-end dialog flows through the public API.

use amwatch::backend::MutationResponse;
use amwatch::data::ProbeRow;
use amwatch::dialog::{Dialog, Field, Outcome};
use amwatch::registry::Granularity;
use amwatch::{MeasurementDescriptor, MeasurementRegistry, ProbeRequest};
use serde_json::json;

fn registry() -> MeasurementRegistry {
    MeasurementRegistry::builtin()
}

fn row(measurement: &str, host: &str, granularity: &str) -> ProbeRow {
    let mut row = ProbeRow::new(measurement, host);
    row.granularity = Some(granularity.to_string());
    row.threshold = Some(100.0);
    row
}

#[test]
fn add_never_offers_claimed_exclusive_measurement() {
    let registry = registry();
    let rows = vec![
        row("icmp", "8.8.8.8", "min"),
        row("speedtest", "speedtest.net", "hour"),
    ];

    let add = Dialog::open_add(1, &registry, &rows, "ms");
    assert!(!add.form.measurement_options.iter().any(|k| k == "speedtest"));
    assert!(add.form.measurement_options.iter().any(|k| k == "icmp"));

    let edit = Dialog::open_edit(2, &registry, &rows, &rows[1], "ms");
    assert!(edit.form.measurement_options.iter().any(|k| k == "speedtest"));
    assert_eq!(edit.form.measurement, "speedtest");
}

fn descriptor(key: &str, label: &str, force_host: Option<&str>) -> MeasurementDescriptor {
    MeasurementDescriptor {
        key: key.into(),
        label: label.into(),
        operator: None,
        unit: None,
        granularities: vec![Granularity::new("min", "1 Minute")],
        force_host: force_host.map(String::from),
        max_threshold: None,
        default_threshold: None,
    }
}

#[test]
fn add_offers_exactly_the_unclaimed_measurements() {
    let registry = MeasurementRegistry::new([
        descriptor("icmp", "ICMP", None),
        descriptor("http", "HTTP", Some("0.0.0.0")),
    ]);
    let rows = vec![row("http", "0.0.0.0", "min")];

    let add = Dialog::open_add(1, &registry, &rows, "ms");
    assert_eq!(add.form.measurement_options, vec!["icmp".to_string()]);
    assert_eq!(add.form.measurement, "icmp");

    let edit = Dialog::open_edit(2, &registry, &rows, &rows[0], "ms");
    assert_eq!(
        edit.form.measurement_options,
        vec!["http".to_string(), "icmp".to_string()]
    );
}

#[test]
fn granularity_survives_measurement_switch_when_offered() {
    let registry = registry();
    let target = row("icmp", "h1", "hour");
    let mut dialog = Dialog::open_edit(1, &registry, &[target.clone()], &target, "ms");
    assert_eq!(dialog.form.granularity.as_deref(), Some("hour"));

    // speedtest offers hour/day: hour is kept
    assert!(dialog.form.select_measurement("speedtest", &registry, "ms"));
    assert_eq!(dialog.form.granularity.as_deref(), Some("hour"));
    assert_eq!(dialog.form.host, "speedtest.net");

    // cicmp offers min/5mins: falls back to the first option
    assert!(dialog.form.select_measurement("cicmp", &registry, "ms"));
    assert_eq!(dialog.form.granularity.as_deref(), Some("min"));
}

#[test]
fn add_scenario_builds_add_payload() {
    let registry = registry();
    let mut dialog = Dialog::open_add(7, &registry, &[], "ms");

    assert!(dialog.form.select_measurement("icmp", &registry, "ms"));
    dialog.focus = Field::Host;
    for c in "1.2.3.4".chars() {
        dialog.input(c);
    }
    dialog.form.threshold = "500".to_string();

    let first_icmp = registry.get("icmp").unwrap().granularities[0].value.clone();
    let request = dialog.begin_submit().expect("valid form");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "action": "add",
            "am_host": "1.2.3.4",
            "threshold": 500,
            "measurement": "icmp",
            "granularity": first_icmp,
        })
    );

    let outcome = dialog.complete(Ok(MutationResponse {
        success: true,
        message: Some("Host 1.2.3.4 added".into()),
    }));
    assert_eq!(
        outcome,
        Outcome::Done {
            notice: "Host 1.2.3.4 added".into()
        }
    );
}

#[test]
fn edit_scenario_carries_old_identity() {
    let registry = registry();
    let target = row("icmp", "h1", "min");
    let mut dialog = Dialog::open_edit(3, &registry, &[target.clone()], &target, "ms");

    dialog.focus = Field::Host;
    dialog.backspace();
    dialog.input('2');

    let request = dialog.begin_submit().expect("valid form");
    match &request {
        ProbeRequest::Edit {
            am_host,
            old_am_host,
            old_measurement,
            old_granularity,
            ..
        } => {
            assert_eq!(am_host, "h2");
            assert_eq!(old_am_host, "h1");
            assert_eq!(old_measurement, "icmp");
            assert_eq!(old_granularity.as_deref(), Some("min"));
        }
        other => panic!("expected edit request, got {:?}", other),
    }

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["action"], json!("edit"));
    assert_eq!(value["threshold"], json!(100));
    assert_eq!(value["old_granularity"], json!("min"));
}

#[test]
fn threshold_above_maximum_is_rejected() {
    let registry = registry();
    let mut dialog = Dialog::open_add(1, &registry, &[], "ms");
    assert!(dialog.form.select_measurement("cicmp", &registry, "ms"));
    dialog.form.host = "h".into();
    dialog.form.threshold = "150".into();

    assert!(dialog.begin_submit().is_none());
    assert_eq!(dialog.error(), Some("threshold must not exceed 100"));
}
