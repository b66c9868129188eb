//! Handle naming conventions shared with the node editor.
//!
//! * endpoint inputs: `input-<paramName>`
//! * media item outputs: `output-<index>`
//! * single outputs: `output`

pub const INPUT_PREFIX: &str = "input-";
pub const OUTPUT_HANDLE: &str = "output";

/// Handle id of the input pin for parameter `name`.
pub fn input_handle(name: &str) -> String {
    format!("{}{}", INPUT_PREFIX, name)
}

/// Handle id of the output pin for media item `index`.
pub fn output_handle(index: usize) -> String {
    format!("{}-{}", OUTPUT_HANDLE, index)
}

/// The parameter a target handle addresses. Bare names are accepted as-is.
pub fn parameter_name(handle: &str) -> &str {
    handle.strip_prefix(INPUT_PREFIX).unwrap_or(handle)
}

/// The item index an `output-<index>` handle addresses.
pub fn output_index(handle: &str) -> Option<usize> {
    handle
        .strip_prefix(OUTPUT_HANDLE)?
        .strip_prefix('-')?
        .parse()
        .ok()
}
