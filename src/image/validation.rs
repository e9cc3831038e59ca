//! Image file validation for the insertion dialog
//!
//! Checks an upload before it is handed to the storage collaborator:
//! - MIME type must be `image/*`
//! - Size must not exceed the configured limit (5 MiB by default)

use std::fmt;
use std::path::Path;

/// Default maximum upload size in bytes (5 MiB)
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Extensions we can map to an image MIME type
const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
];

/// A file picked in the image dialog
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self {
            file_name: filename_for_display(path),
            mime_type: mime_type_for_path(path).to_string(),
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// Byte payloads are too noisy for debug logs
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Why a file was refused
#[derive(Debug, Clone, PartialEq)]
pub enum FileRejection {
    /// MIME type is not `image/*`
    NotAnImage { mime_type: String },
    /// File exceeds size limit
    TooLarge { size_mb: f64, max_mb: f64 },
}

impl fmt::Display for FileRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnImage { mime_type } if mime_type.is_empty() => {
                write!(f, "file is not an image")
            }
            Self::NotAnImage { mime_type } => write!(f, "{} is not an image type", mime_type),
            Self::TooLarge { size_mb, max_mb } => write!(
                f,
                "file is too large ({:.1} MB, max {:.0} MB)",
                size_mb, max_mb
            ),
        }
    }
}

/// Validate an upload against the type and size rules
pub fn validate_image_file(file: &ImageFile, max_bytes: u64) -> Result<(), FileRejection> {
    if !file.mime_type.to_lowercase().starts_with("image/") {
        return Err(FileRejection::NotAnImage {
            mime_type: file.mime_type.clone(),
        });
    }

    if file.size() > max_bytes {
        return Err(FileRejection::TooLarge {
            size_mb: file.size() as f64 / (1024.0 * 1024.0),
            max_mb: max_bytes as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Guess a MIME type from the file extension.
///
/// Unknown extensions map to `application/octet-stream`, which validation rejects.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_MIME_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or("application/octet-stream")
}

/// Storage path hint for an upload: `{prefix}/{request_id}-{name}`.
///
/// The name is reduced to ASCII alphanumerics, `.`, `-` and `_`.
pub fn upload_path_hint(prefix: &str, request_id: u64, file_name: &str) -> String {
    let mut name: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    name = name.trim_matches('-').to_string();
    if name.is_empty() {
        name.push_str("image");
    }

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}-{}", request_id, name)
    } else {
        format!("{}/{}-{}", prefix, request_id, name)
    }
}

/// Get the filename from a path for display in error messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn png(size: usize) -> ImageFile {
        ImageFile::new("photo.png", "image/png", vec![0u8; size])
    }

    #[test]
    fn test_validate_accepts_small_image() {
        assert!(validate_image_file(&png(1024), MAX_IMAGE_SIZE).is_ok());
    }

    #[test]
    fn test_validate_accepts_exact_limit() {
        assert!(validate_image_file(&png(MAX_IMAGE_SIZE as usize), MAX_IMAGE_SIZE).is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let result = validate_image_file(&png(MAX_IMAGE_SIZE as usize + 1), MAX_IMAGE_SIZE);
        assert!(matches!(result, Err(FileRejection::TooLarge { .. })));
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let file = ImageFile::new("notes.pdf", "application/pdf", vec![1, 2, 3]);
        let result = validate_image_file(&file, MAX_IMAGE_SIZE);
        assert_eq!(
            result,
            Err(FileRejection::NotAnImage {
                mime_type: "application/pdf".into()
            })
        );
    }

    #[test]
    fn test_validate_mime_case_insensitive() {
        let file = ImageFile::new("a.JPG", "IMAGE/JPEG", vec![1]);
        assert!(validate_image_file(&file, MAX_IMAGE_SIZE).is_ok());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            FileRejection::NotAnImage {
                mime_type: "text/plain".into()
            }
            .to_string(),
            "text/plain is not an image type"
        );
        assert_eq!(
            FileRejection::TooLarge {
                size_mb: 6.5,
                max_mb: 5.0
            }
            .to_string(),
            "file is too large (6.5 MB, max 5 MB)"
        );
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("photo.PNG")), "image/png");
        assert_eq!(mime_type_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(
            mime_type_for_path(Path::new("readme.md")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for_path(Path::new("noextension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_from_path_reads_bytes() {
        let mut temp = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        temp.write_all(b"GIF89a").unwrap();
        temp.flush().unwrap();

        let file = ImageFile::from_path(temp.path()).unwrap();
        assert_eq!(file.mime_type, "image/gif");
        assert_eq!(file.size(), 6);
        assert!(file.file_name.ends_with(".gif"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_path_buf();
        drop(temp);
        assert!(ImageFile::from_path(&path).is_err());
    }

    #[test]
    fn test_upload_path_hint() {
        assert_eq!(
            upload_path_hint("blog-images", 7, "My Photo.PNG"),
            "blog-images/7-my-photo.png"
        );
        assert_eq!(upload_path_hint("/uploads/", 1, "a.gif"), "uploads/1-a.gif");
        assert_eq!(upload_path_hint("", 3, "???"), "3-image");
    }
}
