//! Declarative input/output schemas inferred from endpoint metadata.
//!
//! Inference is a pure function of an endpoint's primary category tag and
//! title. Schemas are recomputed on every call and never cached, so a schema
//! can never drift from the endpoint it describes.

mod rules;
mod types;

pub use rules::{EndpointTraits, SchemaRule};
pub use types::{EndpointSchema, InputParameter, InputType, OutputSpec, OutputType};

use crate::catalog::Endpoint;
use rules::register_default_rules;

/// Runs an ordered set of [`SchemaRule`]s against endpoints.
pub struct SchemaInference {
    rules: Vec<Box<dyn SchemaRule>>,
}

pub struct SchemaInferenceBuilder {
    rules: Vec<Box<dyn SchemaRule>>,
}

impl SchemaInferenceBuilder {
    pub fn new() -> Self {
        let mut rules: Vec<Box<dyn SchemaRule>> = Vec::new();
        register_default_rules(&mut rules);
        Self { rules }
    }

    /// Appends a rule that runs after every rule registered before it.
    pub fn with_rule(mut self, rule: Box<dyn SchemaRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Removes a previously registered rule by name.
    pub fn without_rule(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name() != name);
        self
    }

    pub fn build(self) -> SchemaInference {
        SchemaInference { rules: self.rules }
    }
}

impl Default for SchemaInferenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInference {
    pub fn builder() -> SchemaInferenceBuilder {
        SchemaInferenceBuilder::new()
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Infers the schema for `endpoint`. Never fails; an endpoint no rule
    /// matches gets no inputs and a single `json` output.
    pub fn infer(&self, endpoint: &Endpoint) -> EndpointSchema {
        let traits = EndpointTraits::of(endpoint);
        let mut schema = EndpointSchema::default();
        for rule in &self.rules {
            rule.apply(&traits, &mut schema);
        }
        schema.outputs.push(OutputSpec {
            output_type: infer_output_type(&traits),
        });
        schema
    }
}

impl Default for SchemaInference {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Infers a schema with the built-in rule set.
pub fn infer_schema(endpoint: &Endpoint) -> EndpointSchema {
    SchemaInference::default().infer(endpoint)
}

/// First match wins.
fn infer_output_type(traits: &EndpointTraits<'_>) -> OutputType {
    if traits.category_contains("image") || traits.category_is("upscale") {
        OutputType::Image
    } else if traits.category_contains("video") {
        OutputType::Video
    } else if traits.category_contains("audio") || traits.category_contains("speech") {
        OutputType::Audio
    } else if traits.category_is("llm") {
        OutputType::Text
    } else {
        OutputType::Json
    }
}
