use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;

use crate::error::AppError;

/// Extensions offered by the file picker. Anything else is still sent if the
/// user forces it through; the endpoint decides.
pub const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// An image the user picked or dropped, with its raw bytes.
#[derive(Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, media_type: Option<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        let media_type = media_type
            .filter(|m| !m.is_empty())
            .or_else(|| detect_media_type(&name, &bytes));
        Self {
            name,
            media_type,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(file_name(path), None, bytes.into()))
    }

    /// Builds an image from a drop event. Native drops only carry a path,
    /// web drops carry the bytes and the browser's MIME type.
    pub fn from_dropped(file: &egui::DroppedFile) -> Result<Option<Self>, AppError> {
        if let Some(bytes) = &file.bytes {
            let name = if file.name.is_empty() {
                "image".to_string()
            } else {
                file.name.clone()
            };
            return Ok(Some(Self::new(name, Some(file.mime.clone()), bytes.clone())));
        }

        match &file.path {
            Some(path) => {
                let bytes = std::fs::read(path)?;
                Ok(Some(Self::new(
                    file_name(path),
                    Some(file.mime.clone()),
                    bytes.into(),
                )))
            }
            None => Ok(None),
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|m| m.starts_with("image/"))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Raw bytes stay out of logs.
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Content sniffing first, file extension second.
fn detect_media_type(name: &str, bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(name))
        .ok()
        .map(|format| format.to_mime_type().to_string())
}
