//! Converts resolved node parameters into the JSON payload an endpoint
//! expects.
//!
//! Packaging runs in two phases. Every schema input is checked first and
//! each failure is recorded; the payload is only returned when nothing
//! failed. The caller's parameter map is never modified.

mod coerce;
mod media;

use crate::error::{PackagingError, PackagingErrors};
use crate::schema::{InputParameter, InputType};
use crate::value::{ParamValue, ParameterMap};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Packages `parameters` against `schema_inputs`.
///
/// Absent or null optional inputs are omitted. Parameters not named by the
/// schema are ignored.
pub async fn package_parameters(
    parameters: &ParameterMap,
    schema_inputs: &[InputParameter],
) -> Result<Map<String, Value>, PackagingErrors> {
    let mut packaged = Map::new();
    let mut errors = Vec::new();

    for input in schema_inputs {
        let value = match parameters.get(&input.name) {
            Some(value) if !value.is_null() => value,
            _ => {
                if input.required {
                    errors.push(PackagingError::MissingRequired(input.name.clone()));
                }
                continue;
            }
        };

        match package_value(input, value).await {
            Ok(json) => {
                packaged.insert(input.name.clone(), json);
            }
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        warn!(failures = errors.len(), "Parameter packaging failed");
        return Err(PackagingErrors(errors));
    }

    debug!(parameters = packaged.len(), "Packaged parameters");
    Ok(packaged)
}

async fn package_value(input: &InputParameter, value: &ParamValue) -> Result<Value, PackagingError> {
    match input.input_type {
        InputType::Text => Ok(coerce::text(value)),
        InputType::Integer => coerce::integer(input, value),
        InputType::Float => coerce::float(input, value),
        InputType::Boolean => Ok(coerce::boolean(value)),
        InputType::Select => coerce::select(input, value),
        InputType::Image | InputType::Video | InputType::Audio => media::encode(input, value).await,
        InputType::Unknown => Ok(value.to_json()),
    }
}
