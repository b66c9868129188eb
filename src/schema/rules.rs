use super::types::{EndpointSchema, InputParameter, InputType};
use crate::catalog::Endpoint;

/// The parts of an endpoint that inference rules look at.
#[derive(Debug, Clone)]
pub struct EndpointTraits<'a> {
    /// Primary category tag, matched case-sensitively.
    pub category: &'a str,
    pub title: &'a str,
}

impl<'a> EndpointTraits<'a> {
    pub fn of(endpoint: &'a Endpoint) -> Self {
        Self {
            category: endpoint.primary_category(),
            title: &endpoint.title,
        }
    }

    pub fn category_contains(&self, needle: &str) -> bool {
        self.category.contains(needle)
    }

    pub fn category_is(&self, value: &str) -> bool {
        self.category == value
    }

    pub fn title_contains_ignore_case(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Defines the contract for one additive step of schema inference.
///
/// Rules run in registration order and may only append inputs.
pub trait SchemaRule: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema);
}

struct TextPromptRule;
impl SchemaRule for TextPromptRule {
    fn name(&self) -> &str {
        "text-prompt"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if traits.category_contains("text-to-") {
            schema.push_input(InputParameter::new("prompt", InputType::Text).required());
        }
    }
}

struct ImageInputRule;
impl SchemaRule for ImageInputRule {
    fn name(&self) -> &str {
        "image-input"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if traits.category_contains("image-to-")
            || traits.category_is("edit")
            || traits.category_is("upscale")
        {
            schema.push_input(InputParameter::new("image", InputType::Image).required());
        }
    }
}

struct VideoInputRule;
impl SchemaRule for VideoInputRule {
    fn name(&self) -> &str {
        "video-input"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if traits.category_contains("video-to-") || traits.category_contains("lipsync") {
            schema.push_input(InputParameter::new("video", InputType::Video).required());
        }
    }
}

struct AudioInputRule;
impl SchemaRule for AudioInputRule {
    fn name(&self) -> &str {
        "audio-input"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if traits.category_contains("audio-to-") || traits.category_contains("speech") {
            schema.push_input(InputParameter::new("audio", InputType::Audio).required());
        }
    }
}

/// Media-to-X endpoints accept an optional guiding prompt.
struct GuidancePromptRule;
impl SchemaRule for GuidancePromptRule {
    fn name(&self) -> &str {
        "guidance-prompt"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        let has_visual_input = schema
            .inputs
            .iter()
            .any(|i| matches!(i.input_type, InputType::Image | InputType::Video));
        let visual_category =
            traits.category_contains("image-to-") || traits.category_contains("video-to-");
        if has_visual_input && visual_category {
            schema.push_input(InputParameter::new("prompt", InputType::Text));
        }
    }
}

struct KlingVideoRule;
impl SchemaRule for KlingVideoRule {
    fn name(&self) -> &str {
        "kling-video"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if !(traits.title_contains_ignore_case("kling") && traits.category_contains("video")) {
            return;
        }
        schema.push_input(
            InputParameter::new("style", InputType::Select)
                .with_options(&["cinematic", "natural", "artistic", "anime"])
                .with_default("natural"),
        );
        if traits.title.contains("Standard") || traits.title.contains("o1") {
            schema.push_input(InputParameter::new("start_image", InputType::Image));
            schema.push_input(InputParameter::new("end_image", InputType::Image));
        }
        schema.push_input(
            InputParameter::new("duration", InputType::Select)
                .with_options(&["5", "10"])
                .with_default("5"),
        );
    }
}

struct DiffusionControlsRule;
impl SchemaRule for DiffusionControlsRule {
    fn name(&self) -> &str {
        "diffusion-controls"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if !(traits.category_contains("text-to-image") || traits.category_contains("image-to-image"))
        {
            return;
        }
        schema.push_input(InputParameter::new("negative_prompt", InputType::Text));
        schema.push_input(
            InputParameter::new("seed", InputType::Integer).with_range(0.0, 2_147_483_647.0),
        );
        schema.push_input(
            InputParameter::new("num_inference_steps", InputType::Integer)
                .with_range(1.0, 150.0)
                .with_default(50),
        );
        schema.push_input(
            InputParameter::new("guidance_scale", InputType::Float)
                .with_range(1.0, 20.0)
                .with_step(0.5)
                .with_default(7.5),
        );
    }
}

struct LanguageModelRule;
impl SchemaRule for LanguageModelRule {
    fn name(&self) -> &str {
        "language-model"
    }
    fn apply(&self, traits: &EndpointTraits<'_>, schema: &mut EndpointSchema) {
        if !(traits.category_is("llm") || traits.category_is("vision")) {
            return;
        }
        schema.push_input(InputParameter::new("prompt", InputType::Text).required());
        schema.push_input(
            InputParameter::new("temperature", InputType::Float)
                .with_range(0.0, 2.0)
                .with_step(0.1)
                .with_default(0.7),
        );
        schema.push_input(
            InputParameter::new("max_tokens", InputType::Integer)
                .with_range(1.0, 4096.0)
                .with_default(512),
        );
    }
}

/// Registers the built-in rules in their significant order.
pub(super) fn register_default_rules(registry: &mut Vec<Box<dyn SchemaRule>>) {
    registry.push(Box::new(TextPromptRule));
    registry.push(Box::new(ImageInputRule));
    registry.push(Box::new(VideoInputRule));
    registry.push(Box::new(AudioInputRule));
    registry.push(Box::new(GuidancePromptRule));
    registry.push(Box::new(KlingVideoRule));
    registry.push(Box::new(DiffusionControlsRule));
    registry.push(Box::new(LanguageModelRule));
}
