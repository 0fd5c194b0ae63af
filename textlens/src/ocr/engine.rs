use crate::error::Result;

/// What an engine reports for one image, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecognition {
    pub text: String,
    pub confidence: f32,
    /// Number of word-level segments, if the engine reports segmentation.
    pub word_count: Option<usize>,
}

/// A factory for per-request OCR sessions.
///
/// Both methods are called from a blocking thread, never from the async
/// runtime. Implementations must not keep per-request state; anything a
/// request needs lives in the returned session.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Load the engine for `language` (e.g. `eng`, `eng+fra`).
    ///
    /// Unknown or uninstalled language packs fail with
    /// [`TextlensError::OcrInit`](crate::error::TextlensError::OcrInit).
    fn acquire(&self, language: &str) -> Result<Box<dyn OcrSession>>;
}

/// A loaded engine instance. Engine resources are released when the session
/// is dropped.
pub trait OcrSession {
    fn recognize(&mut self, image: &[u8]) -> Result<RawRecognition>;
}
