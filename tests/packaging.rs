//! Tests for packaging resolved parameters into endpoint payloads.
mod common;
use common::*;
use otoyai::prelude::*;
use otoyai::value::MediaFile;
use serde_json::json;
use std::io::Write;

fn params(pairs: &[(&str, ParamValue)]) -> ParameterMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn flux_inputs() -> Vec<InputParameter> {
    infer_schema(&flux_dev()).inputs
}

#[tokio::test]
async fn test_flux_payload() {
    let parameters = params(&[
        ("prompt", "a lighthouse".into()),
        ("seed", 42.into()),
        ("guidance_scale", "7.5".into()),
        ("unrelated", "ignored".into()),
    ]);
    let payload = package_parameters(&parameters, &flux_inputs()).await.unwrap();

    assert_eq!(
        serde_json::Value::Object(payload),
        json!({"prompt": "a lighthouse", "seed": 42, "guidance_scale": 7.5})
    );
}

#[tokio::test]
async fn test_seed_bounds() {
    let ok = package_parameters(
        &params(&[("prompt", "x".into()), ("seed", 42.into())]),
        &flux_inputs(),
    )
    .await
    .unwrap();
    assert_eq!(ok.get("seed"), Some(&json!(42)));

    let errors = package_parameters(
        &params(&[("prompt", "x".into()), ("seed", (-1).into())]),
        &flux_inputs(),
    )
    .await
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors.first(),
        Some(PackagingError::BelowMinimum { name, .. }) if name == "seed"
    ));
}

#[tokio::test]
async fn test_missing_required_names_the_parameter() {
    let errors = package_parameters(&ParameterMap::new(), &flux_inputs())
        .await
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.to_string().contains("prompt"));
    assert_eq!(errors.first().map(|e| e.parameter()), Some("prompt"));

    let errors = package_parameters(&params(&[("prompt", ParamValue::Null)]), &flux_inputs())
        .await
        .unwrap_err();
    assert_eq!(
        errors.first(),
        Some(&PackagingError::MissingRequired("prompt".to_string()))
    );
}

#[tokio::test]
async fn test_optional_missing_is_omitted() {
    let payload = package_parameters(&params(&[("prompt", "x".into())]), &flux_inputs())
        .await
        .unwrap();
    assert_eq!(payload.len(), 1);
    assert!(!payload.contains_key("num_inference_steps"));
}

#[tokio::test]
async fn test_all_failures_are_reported_in_schema_order() {
    let parameters = params(&[
        ("seed", "abc".into()),
        ("num_inference_steps", 500.into()),
        ("guidance_scale", "lots".into()),
    ]);
    let errors = package_parameters(&parameters, &flux_inputs())
        .await
        .unwrap_err();

    let names: Vec<&str> = errors.errors().iter().map(|e| e.parameter()).collect();
    assert_eq!(names, vec!["prompt", "seed", "num_inference_steps", "guidance_scale"]);
    assert!(matches!(errors.errors()[1], PackagingError::NotAnInteger { .. }));
    assert!(matches!(errors.errors()[2], PackagingError::AboveMaximum { .. }));
    assert!(matches!(errors.errors()[3], PackagingError::NotANumber { .. }));
    // parameters are never modified
    assert_eq!(parameters.len(), 3);
}

#[tokio::test]
async fn test_integer_rejects_fractions() {
    let errors = package_parameters(
        &params(&[("prompt", "x".into()), ("seed", 1.5.into())]),
        &flux_inputs(),
    )
    .await
    .unwrap_err();
    assert!(matches!(errors.first(), Some(PackagingError::NotAnInteger { .. })));
}

#[tokio::test]
async fn test_text_coercion() {
    let inputs = vec![InputParameter::new("caption", InputType::Text)];
    let payload = package_parameters(&params(&[("caption", 12.into())]), &inputs)
        .await
        .unwrap();
    assert_eq!(payload.get("caption"), Some(&json!("12")));
}

#[tokio::test]
async fn test_boolean_coercion() {
    let inputs = vec![InputParameter::new("flag", InputType::Boolean)];
    let cases = [
        (ParamValue::from("YES"), true),
        (ParamValue::from("true"), true),
        (ParamValue::from("1"), true),
        (ParamValue::from("No"), false),
        (ParamValue::from("0"), false),
        (ParamValue::from("false"), false),
        (ParamValue::from(""), false),
        (ParamValue::from("anything"), true),
        (ParamValue::from(0), false),
        (ParamValue::from(3), true),
        (ParamValue::from(false), false),
    ];
    for (value, expected) in cases {
        let payload = package_parameters(&params(&[("flag", value.clone())]), &inputs)
            .await
            .unwrap();
        assert_eq!(payload.get("flag"), Some(&json!(expected)), "{:?}", value);
    }
}

#[tokio::test]
async fn test_select_checks_options() {
    let inputs = infer_schema(&kling_standard())
        .inputs
        .into_iter()
        .filter(|i| i.name == "duration")
        .collect::<Vec<_>>();

    let payload = package_parameters(&params(&[("duration", 10.into())]), &inputs)
        .await
        .unwrap();
    assert_eq!(payload.get("duration"), Some(&json!("10")));

    let errors = package_parameters(&params(&[("duration", "7".into())]), &inputs)
        .await
        .unwrap_err();
    assert!(matches!(
        errors.first(),
        Some(PackagingError::InvalidOption { value, .. }) if value == "7"
    ));

    let free = vec![InputParameter::new("mode", InputType::Select)];
    let payload = package_parameters(&params(&[("mode", "anything".into())]), &free)
        .await
        .unwrap();
    assert_eq!(payload.get("mode"), Some(&json!("anything")));
}

#[tokio::test]
async fn test_media_strings_pass_through() {
    let inputs = infer_schema(&upscaler()).inputs;
    for value in [
        "https://cdn.example.com/a.png",
        "http://localhost/a.png",
        "data:image/png;base64,iVBORw0KGgo=",
        "iVBORw0KGgo=",
        "iVBORw0KGgo",
        "aGVsbG8_d29ybGQ-",
        "/uploads/cat.png",
        "not a url!",
    ] {
        let payload = package_parameters(&params(&[("image", value.into())]), &inputs)
            .await
            .unwrap();
        assert_eq!(payload.get("image"), Some(&json!(value)));
    }
}

#[tokio::test]
async fn test_invalid_media_value() {
    let inputs = infer_schema(&upscaler()).inputs;
    for value in [
        ParamValue::from(5),
        ParamValue::from(true),
        ParamValue::Json(json!({"url": "https://cdn.example.com/a.png"})),
    ] {
        let errors = package_parameters(&params(&[("image", value)]), &inputs)
            .await
            .unwrap_err();
        assert!(
            errors
                .to_string()
                .contains("Image value must be a URL, File, or base64 string")
        );
    }
}

#[tokio::test]
async fn test_file_bytes_become_data_url() {
    let inputs = infer_schema(&upscaler()).inputs;
    let file = MediaFile::from_bytes("photo.png", None, vec![0x89, 0x50, 0x4e, 0x47]);
    let payload = package_parameters(&params(&[("image", file.into())]), &inputs)
        .await
        .unwrap();
    assert_eq!(payload.get("image"), Some(&json!("data:image/png;base64,iVBORw==")));
}

#[tokio::test]
async fn test_file_on_disk_becomes_data_url() {
    let mut tmp = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    tmp.write_all(b"not really a video").unwrap();

    let inputs = vec![InputParameter::new("video", InputType::Video).required()];
    let file = MediaFile::from_path(tmp.path());
    let payload = package_parameters(&params(&[("video", file.into())]), &inputs)
        .await
        .unwrap();

    let encoded = payload.get("video").and_then(|v| v.as_str()).unwrap();
    assert!(encoded.starts_with("data:video/mp4;base64,"));
}

#[tokio::test]
async fn test_unreadable_file_is_reported() {
    let inputs = vec![InputParameter::new("audio", InputType::Audio)];
    let file = MediaFile::from_path("/definitely/not/here.wav");
    let errors = package_parameters(&params(&[("audio", file.into())]), &inputs)
        .await
        .unwrap_err();
    assert!(matches!(
        errors.first(),
        Some(PackagingError::UnreadableMedia { .. })
    ));
}

#[test]
fn test_unknown_type_passes_through() {
    let inputs = vec![InputParameter::new("mask", InputType::Unknown)];
    let value = ParamValue::Json(json!({"points": [1, 2]}));
    let payload = tokio_test::block_on(package_parameters(&params(&[("mask", value)]), &inputs)).unwrap();
    assert_eq!(payload.get("mask"), Some(&json!({"points": [1, 2]})));
}
