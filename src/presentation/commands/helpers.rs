use std::fmt::Display;

use axum::extract::Multipart;
use serde::de::DeserializeOwned;

use crate::domain::models::image::ImageFile;
use crate::infrastructure::logging::logger;
use crate::presentation::errors::CommandError;

pub const FORM_FIELD: &str = "form";
pub const IMAGE_FIELD: &str = "image";

pub fn log_command(command: impl AsRef<str>) {
    logger::debug(&format!("Command: {}", command.as_ref()));
}

pub fn map_command_error<E>(context: impl AsRef<str>) -> impl FnOnce(E) -> CommandError
where
    E: Display + Into<CommandError>,
{
    let context = context.as_ref().to_string();

    move |error| {
        logger::error(&format!("{}: {}", context, error));
        error.into()
    }
}

/// A create or edit form as submitted over multipart
pub struct Submission<F> {
    pub form: F,
    pub image: Option<ImageFile>,
}

/// Read the `form` JSON part and the optional `image` file part.
///
/// A missing form part counts as an empty form, and an empty file part as no
/// image, so both end up in the regular required-field checks.
pub async fn read_submission<F: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<Submission<F>, CommandError> {
    let mut form_json: Option<String> = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| CommandError::BadRequest(format!("Invalid multipart data: {}", error)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FORM_FIELD) => {
                let text = field.text().await.map_err(|error| {
                    CommandError::BadRequest(format!("Invalid form part: {}", error))
                })?;
                form_json = Some(text);
            }
            Some(IMAGE_FIELD) => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let bytes = field.bytes().await.map_err(|error| {
                    CommandError::BadRequest(format!("Invalid image part: {}", error))
                })?;
                if !bytes.is_empty() {
                    image = Some(ImageFile::new(file_name, bytes));
                }
            }
            other => logger::debug(&format!("Ignoring multipart field {:?}", other)),
        }
    }

    let form_json = form_json.unwrap_or_else(|| "{}".to_string());
    let form = serde_json::from_str::<F>(&form_json)
        .map_err(|error| CommandError::BadRequest(format!("Invalid form: {}", error)))?;

    Ok(Submission { form, image })
}
