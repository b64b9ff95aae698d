use bytes::Bytes;

use crate::domain::errors::DomainError;

/// An image file selected on a form, held in memory until uploaded
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Original file name as provided by the client
    pub file_name: String,
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content type guessed from the file name
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Checks that the file is an image, by content or by extension, and fits
    /// the size limit
    pub fn validate(&self, max_bytes: usize) -> Result<(), DomainError> {
        if self.file_name.trim().is_empty() {
            return Err(DomainError::InvalidData(
                "Image file name cannot be empty".to_string(),
            ));
        }

        if self.is_empty() {
            return Err(DomainError::InvalidData("Image file is empty".to_string()));
        }

        if self.len() > max_bytes {
            return Err(DomainError::InvalidData(format!(
                "Image is too large: {} bytes (limit {} bytes)",
                self.len(),
                max_bytes
            )));
        }

        if image::guess_format(&self.bytes).is_err() && !self.has_image_extension() {
            return Err(DomainError::InvalidData(format!(
                "'{}' is not a supported image",
                self.file_name
            )));
        }

        Ok(())
    }

    /// Covers image types the decoder cannot sniff, such as SVG or HEIC
    fn has_image_extension(&self) -> bool {
        mime_guess::from_path(&self.file_name)
            .iter()
            .any(|mime| mime.type_() == mime_guess::mime::IMAGE)
    }
}

#[cfg(test)]
pub(crate) fn minimal_png() -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;

    let image = DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
    let mut output = Vec::new();
    let mut cursor = Cursor::new(&mut output);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("should build png image");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_png_bytes() {
        let file = ImageFile::new("logo.png", minimal_png());
        assert!(file.validate(1024 * 1024).is_ok());
        assert_eq!(file.content_type(), "image/png");
    }

    #[test]
    fn validate_rejects_non_image_files() {
        let file = ImageFile::new("notes.txt", b"plain text".to_vec());
        assert!(file.validate(1024).is_err());
    }

    #[test]
    fn validate_accepts_image_types_the_decoder_cannot_read() {
        let svg = ImageFile::new(
            "crest.svg",
            br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#.to_vec(),
        );
        assert!(svg.validate(1024).is_ok());
        assert_eq!(svg.content_type(), "image/svg+xml");

        let heic = ImageFile::new("photo.HEIC", vec![0u8; 16]);
        assert!(heic.validate(1024).is_ok());
    }

    #[test]
    fn validate_rejects_oversized_and_empty_files() {
        let png = minimal_png();
        let limit = png.len() - 1;
        assert!(ImageFile::new("big.png", png).validate(limit).is_err());
        assert!(ImageFile::new("empty.png", Vec::new()).validate(1024).is_err());
    }
}
