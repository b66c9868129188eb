use crate::value::ParamValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of an endpoint input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Integer,
    Float,
    Image,
    Video,
    Audio,
    Select,
    Boolean,
    /// Any type string this crate does not recognise.
    #[serde(other)]
    Unknown,
}

impl InputType {
    pub fn is_media(&self) -> bool {
        matches!(self, InputType::Image | InputType::Video | InputType::Audio)
    }

    /// Capitalized media kind used in packaging error messages.
    pub fn media_kind(&self) -> &'static str {
        match self {
            InputType::Image => "Image",
            InputType::Video => "Video",
            InputType::Audio => "Audio",
            _ => "Media",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputType::Text => "text",
            InputType::Integer => "integer",
            InputType::Float => "float",
            InputType::Image => "image",
            InputType::Video => "video",
            InputType::Audio => "audio",
            InputType::Select => "select",
            InputType::Boolean => "boolean",
            InputType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Type of value an endpoint produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Image,
    Video,
    Audio,
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputSpec {
    #[serde(rename = "type")]
    pub output_type: OutputType,
}

/// One typed input of an endpoint schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameter {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl InputParameter {
    /// Creates an optional parameter with a label derived from its name.
    pub fn new(name: &str, input_type: InputType) -> Self {
        Self {
            name: name.to_string(),
            label: label_for(name),
            input_type,
            required: false,
            default: None,
            options: None,
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}

/// `negative_prompt` -> `Negative Prompt`.
fn label_for(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inputs and outputs inferred for one endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EndpointSchema {
    pub inputs: Vec<InputParameter>,
    pub outputs: Vec<OutputSpec>,
}

impl EndpointSchema {
    pub fn input(&self, name: &str) -> Option<&InputParameter> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.input(name).is_some()
    }

    /// The single declared output type, if any.
    pub fn primary_output(&self) -> Option<OutputType> {
        self.outputs.first().map(|o| o.output_type)
    }

    /// Appends `param` unless an input with the same name already exists.
    /// Returns whether the input was added.
    pub fn push_input(&mut self, param: InputParameter) -> bool {
        if self.has_input(&param.name) {
            return false;
        }
        self.inputs.push(param);
        true
    }
}
