//! Tests for schema inference from endpoint metadata.
mod common;
use common::*;
use otoyai::prelude::*;
use otoyai::schema::{EndpointTraits, SchemaRule};

fn input_names(schema: &EndpointSchema) -> Vec<&str> {
    schema.inputs.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn test_flux_dev_schema() {
    let schema = infer_schema(&flux_dev());

    assert_eq!(
        input_names(&schema),
        vec![
            "prompt",
            "negative_prompt",
            "seed",
            "num_inference_steps",
            "guidance_scale"
        ]
    );

    let prompt = schema.input("prompt").unwrap();
    assert_eq!(prompt.input_type, InputType::Text);
    assert!(prompt.required);

    let negative = schema.input("negative_prompt").unwrap();
    assert!(!negative.required);
    assert_eq!(negative.label, "Negative Prompt");

    let seed = schema.input("seed").unwrap();
    assert_eq!(seed.input_type, InputType::Integer);
    assert_eq!(seed.min, Some(0.0));
    assert_eq!(seed.max, Some(2_147_483_647.0));

    let steps = schema.input("num_inference_steps").unwrap();
    assert_eq!(steps.default, Some(ParamValue::Number(50.0)));
    assert_eq!((steps.min, steps.max), (Some(1.0), Some(150.0)));

    let guidance = schema.input("guidance_scale").unwrap();
    assert_eq!(guidance.input_type, InputType::Float);
    assert_eq!(guidance.default, Some(ParamValue::Number(7.5)));
    assert_eq!(guidance.step, Some(0.5));

    assert_eq!(schema.outputs.len(), 1);
    assert_eq!(schema.primary_output(), Some(OutputType::Image));
}

#[test]
fn test_schema_is_deterministic() {
    for endpoint in [flux_dev(), kling_standard(), upscaler(), chat_model()] {
        assert_eq!(infer_schema(&endpoint), infer_schema(&endpoint));
    }
}

#[test]
fn test_unknown_category_falls_back_to_json_output() {
    let schema = infer_schema(&endpoint("acme/train", "Trainer", "training"));
    assert!(schema.inputs.is_empty());
    assert_eq!(schema.primary_output(), Some(OutputType::Json));

    let mut untagged = endpoint("acme/none", "Untagged", "");
    untagged.category.clear();
    let schema = infer_schema(&untagged);
    assert!(schema.inputs.is_empty());
    assert_eq!(schema.primary_output(), Some(OutputType::Json));
}

#[test]
fn test_only_primary_category_is_considered() {
    let mut e = endpoint("acme/multi", "Multi", "training");
    e.category.push("text-to-image".to_string());
    let schema = infer_schema(&e);
    assert!(schema.inputs.is_empty());
}

#[test]
fn test_kling_standard_adds_keyframe_inputs() {
    let schema = infer_schema(&kling_standard());
    assert_eq!(
        input_names(&schema),
        vec!["image", "prompt", "style", "start_image", "end_image", "duration"]
    );

    let style = schema.input("style").unwrap();
    assert_eq!(style.input_type, InputType::Select);
    assert_eq!(
        style.options.as_deref(),
        Some(&["cinematic", "natural", "artistic", "anime"].map(String::from)[..])
    );
    assert_eq!(style.default, Some(ParamValue::from("natural")));

    let duration = schema.input("duration").unwrap();
    assert_eq!(duration.default, Some(ParamValue::from("5")));
    assert!(!schema.input("start_image").unwrap().required);
}

#[test]
fn test_kling_keyframes_require_exact_edition_casing() {
    let pro = infer_schema(&endpoint("kling/pro", "KLING 2.1 Pro", "text-to-video"));
    assert_eq!(input_names(&pro), vec!["prompt", "style", "duration"]);

    let lowercase = infer_schema(&endpoint("kling/std", "kling standard", "text-to-video"));
    assert!(!lowercase.has_input("start_image"));

    let o1 = infer_schema(&endpoint("kling/o1", "Kling o1", "text-to-video"));
    assert!(o1.has_input("start_image"));
    assert!(o1.has_input("end_image"));
    assert_eq!(o1.primary_output(), Some(OutputType::Video));
}

#[test]
fn test_kling_title_without_video_category() {
    let schema = infer_schema(&endpoint("kling/img", "Kling Image", "text-to-image"));
    assert!(!schema.has_input("style"));
}

#[test]
fn test_image_to_image_gets_optional_prompt_once() {
    let schema = infer_schema(&endpoint("acme/i2i", "Restyle", "image-to-image"));
    assert_eq!(
        input_names(&schema),
        vec![
            "image",
            "prompt",
            "negative_prompt",
            "seed",
            "num_inference_steps",
            "guidance_scale"
        ]
    );
    assert!(schema.input("image").unwrap().required);
    assert!(!schema.input("prompt").unwrap().required);
}

#[test]
fn test_edit_and_upscale_take_an_image() {
    let edit = infer_schema(&endpoint("acme/edit", "Editor", "edit"));
    assert_eq!(input_names(&edit), vec!["image"]);
    assert_eq!(edit.primary_output(), Some(OutputType::Json));

    let upscale = infer_schema(&upscaler());
    assert_eq!(input_names(&upscale), vec!["image"]);
    assert_eq!(upscale.primary_output(), Some(OutputType::Image));
}

#[test]
fn test_video_and_audio_inputs() {
    let lipsync = infer_schema(&endpoint("acme/lipsync", "Lipsync", "lipsync"));
    assert_eq!(input_names(&lipsync), vec!["video"]);
    assert_eq!(lipsync.input("video").unwrap().input_type, InputType::Video);

    let v2v = infer_schema(&endpoint("acme/v2v", "Restyle Video", "video-to-video"));
    assert_eq!(input_names(&v2v), vec!["video", "prompt"]);
    assert_eq!(v2v.primary_output(), Some(OutputType::Video));

    let transcribe = infer_schema(&endpoint("acme/stt", "Transcribe", "speech-to-text"));
    assert_eq!(input_names(&transcribe), vec!["audio"]);
    assert_eq!(transcribe.primary_output(), Some(OutputType::Audio));

    let a2a = infer_schema(&endpoint("acme/a2a", "Denoise", "audio-to-audio"));
    assert_eq!(a2a.input("audio").unwrap().input_type, InputType::Audio);
    assert_eq!(a2a.primary_output(), Some(OutputType::Audio));
}

#[test]
fn test_language_model_schema() {
    let schema = infer_schema(&chat_model());
    assert_eq!(input_names(&schema), vec!["prompt", "temperature", "max_tokens"]);
    assert!(schema.input("prompt").unwrap().required);

    let temperature = schema.input("temperature").unwrap();
    assert_eq!(temperature.default, Some(ParamValue::Number(0.7)));
    assert_eq!((temperature.min, temperature.max), (Some(0.0), Some(2.0)));
    assert_eq!(temperature.step, Some(0.1));

    let max_tokens = schema.input("max_tokens").unwrap();
    assert_eq!(max_tokens.input_type, InputType::Integer);
    assert_eq!(max_tokens.default, Some(ParamValue::Number(512.0)));

    assert_eq!(schema.primary_output(), Some(OutputType::Text));

    let vision = infer_schema(&endpoint("acme/vision", "Describe", "vision"));
    assert_eq!(input_names(&vision), vec!["prompt", "temperature", "max_tokens"]);
    assert_eq!(vision.primary_output(), Some(OutputType::Json));
}

#[test]
fn test_category_matching_is_case_sensitive() {
    let schema = infer_schema(&endpoint("acme/t2i", "Shout", "Text-To-Image"));
    assert!(schema.inputs.is_empty());
    assert_eq!(schema.primary_output(), Some(OutputType::Json));
}

struct WatermarkRule;

impl SchemaRule for WatermarkRule {
    fn name(&self) -> &str {
        "watermark"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if traits.category_contains("image") {
            schema.push_input(InputParameter::new("watermark", InputType::Boolean));
        }
    }
}

#[test]
fn test_custom_rule_runs_after_defaults() {
    let inference = SchemaInference::builder()
        .with_rule(Box::new(WatermarkRule))
        .build();
    assert_eq!(inference.rule_names().last(), Some(&"watermark"));

    let schema = inference.infer(&flux_dev());
    assert_eq!(input_names(&schema).last(), Some(&"watermark"));
    assert_eq!(schema.input("watermark").unwrap().label, "Watermark");
}

#[test]
fn test_removing_a_default_rule() {
    let inference = SchemaInference::builder()
        .without_rule("diffusion-controls")
        .build();
    let schema = inference.infer(&flux_dev());
    assert_eq!(input_names(&schema), vec!["prompt"]);
}

#[test]
fn test_schema_serializes_type_field() {
    let schema = infer_schema(&flux_dev());
    let json = serde_json::to_value(&schema).unwrap();
    assert_eq!(json["inputs"][0]["type"], "text");
    assert_eq!(json["inputs"][0]["required"], true);
    assert_eq!(json["outputs"][0]["type"], "image");
}

#[test]
fn test_unknown_input_type_deserializes() {
    let param: InputParameter =
        serde_json::from_str(r#"{"name": "mask", "label": "Mask", "type": "mask"}"#).unwrap();
    assert_eq!(param.input_type, InputType::Unknown);
    assert!(!param.required);
}
