use crate::error::PackagingError;
use crate::schema::InputParameter;
use crate::value::{FileSource, MediaFile, ParamValue};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tracing::debug;

/// Packages an image, video or audio value.
///
/// Strings are taken to be URLs or pre-encoded base64 and pass through
/// untouched. Files are read and inlined as `data:<mime>;base64,<payload>`.
pub(super) async fn encode(input: &InputParameter, value: &ParamValue) -> Result<Value, PackagingError> {
    match value {
        ParamValue::Text(s) => Ok(Value::String(s.clone())),
        ParamValue::File(file) => file_to_data_url(input, file).await.map(Value::String),
        _ => Err(PackagingError::InvalidMedia {
            name: input.name.clone(),
            kind: input.input_type.media_kind(),
        }),
    }
}

async fn file_to_data_url(input: &InputParameter, file: &MediaFile) -> Result<String, PackagingError> {
    let bytes = match &file.source {
        FileSource::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|e| PackagingError::UnreadableMedia {
                    name: input.name.clone(),
                    reason: format!("{}: {}", path.display(), e),
                })?
        }
        FileSource::Bytes(bytes) => bytes.clone(),
    };

    let mime = mime_type(file);
    debug!(
        parameter = %input.name,
        file = %file.display_name(),
        mime = %mime,
        size = bytes.len(),
        "Encoding media file"
    );
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)))
}

/// Declared MIME type, else a guess from the file name or path.
fn mime_type(file: &MediaFile) -> String {
    if let Some(mime) = &file.mime_type {
        return mime.clone();
    }
    let guess = match (&file.name, &file.source) {
        (Some(name), _) => mime_guess::from_path(name),
        (None, FileSource::Path(path)) => mime_guess::from_path(path),
        (None, FileSource::Bytes(_)) => mime_guess::from_ext(""),
    };
    guess.first_or_octet_stream().essence_str().to_string()
}
