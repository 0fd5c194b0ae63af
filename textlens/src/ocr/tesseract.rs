use leptess::{capi, LepTess};
use tracing::debug;

use crate::error::{Result, TextlensError};

use super::engine::{OcrEngine, OcrSession, RawRecognition};

/// Local Tesseract engine via leptess.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    tessdata_path: Option<String>,
}

impl TesseractEngine {
    pub fn new(tessdata_path: Option<String>) -> Self {
        Self { tessdata_path }
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn acquire(&self, language: &str) -> Result<Box<dyn OcrSession>> {
        let tesseract = LepTess::new(self.tessdata_path.as_deref(), language).map_err(|e| {
            TextlensError::OcrInit {
                language: language.to_string(),
                reason: e.to_string(),
            }
        })?;
        debug!(language, "Tesseract session acquired");

        Ok(Box::new(TesseractSession { tesseract }))
    }
}

// LepTess ends the Tesseract API and frees its Pix on drop.
struct TesseractSession {
    tesseract: LepTess,
}

impl OcrSession for TesseractSession {
    fn recognize(&mut self, image: &[u8]) -> Result<RawRecognition> {
        self.tesseract
            .set_image_from_mem(image)
            .map_err(|e| TextlensError::OcrRecognition(format!("Failed to load image: {e}")))?;

        let text = self.tesseract.get_utf8_text().map_err(|e| {
            TextlensError::OcrRecognition(format!("Failed to extract text: {e}"))
        })?;
        let confidence = self.tesseract.mean_text_conf() as f32;
        let word_count = self
            .tesseract
            .get_component_boxes(capi::TessPageIteratorLevel_RIL_WORD, true)
            .map(|boxes| (&boxes).into_iter().count());

        Ok(RawRecognition {
            text,
            confidence,
            word_count,
        })
    }
}
