/// Image encodings accepted for recognition, keyed by declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
    Tiff,
}

impl ImageFormat {
    /// Resolve a declared `Content-Type`. Parameters after `;` are ignored
    /// and matching is case-insensitive. The bytes are never inspected.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/bmp" => Some(Self::Bmp),
            "image/webp" => Some(Self::Webp),
            "image/tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
            Self::Tiff => "image/tiff",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// A validated upload, ready to hand to the OCR engine.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub image: Vec<u8>,
    pub format: ImageFormat,
    pub file_name: Option<String>,
    pub language: String,
}
