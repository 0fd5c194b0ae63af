use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{Result, TextlensError};

use super::engine::{OcrEngine, RawRecognition};
use super::preprocessing::preprocess_image;
use super::tesseract::TesseractEngine;

/// Runs OCR jobs off the async runtime.
///
/// Every call acquires a fresh engine session on the blocking pool, uses it
/// once and drops it before the blocking closure returns. Nothing is pooled,
/// so clones share only the stateless engine factory.
#[derive(Clone)]
pub struct OcrProvider {
    engine: Arc<dyn OcrEngine>,
    config: OcrConfig,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Self {
        let engine = TesseractEngine::new(config.tessdata_path.clone());
        Self::with_engine(Arc::new(engine), config)
    }

    pub fn with_engine(engine: Arc<dyn OcrEngine>, config: &OcrConfig) -> Self {
        Self {
            engine,
            config: config.clone(),
        }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Load and release the default language once, so startup logs say
    /// whether the engine is usable. Failure is not fatal.
    pub async fn probe(&self) -> bool {
        let engine = Arc::clone(&self.engine);
        let language = self.config.default_language.clone();

        let outcome =
            tokio::task::spawn_blocking(move || engine.acquire(&language).map(drop)).await;

        match outcome {
            Ok(Ok(())) => {
                info!(
                    engine = self.engine.name(),
                    language = %self.config.default_language,
                    "OCR engine ready"
                );
                true
            }
            Ok(Err(e)) => {
                warn!(engine = self.engine.name(), error = %e, "OCR engine probe failed");
                false
            }
            Err(e) => {
                warn!(engine = self.engine.name(), error = %e, "OCR engine probe panicked");
                false
            }
        }
    }

    /// Recognize `image` with the given language pack.
    ///
    /// Applies `OCR_TIMEOUT` when non-zero. On expiry the blocking job keeps
    /// running until the engine returns and still drops its session.
    pub async fn recognize(&self, image: Vec<u8>, language: &str) -> Result<RawRecognition> {
        let job = self.recognize_blocking(image, language.to_string());

        if self.config.timeout_secs == 0 {
            return job.await;
        }

        let deadline = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(deadline, job).await {
            Ok(result) => result,
            Err(_) => Err(TextlensError::OcrTimeout(self.config.timeout_secs)),
        }
    }

    async fn recognize_blocking(&self, image: Vec<u8>, language: String) -> Result<RawRecognition> {
        let engine = Arc::clone(&self.engine);
        let preprocess = self.config.preprocess.then(|| self.config.clone());

        tokio::task::spawn_blocking(move || {
            let mut session = engine.acquire(&language)?;

            let image = match preprocess {
                Some(config) => preprocess_image(&image, &config)?,
                None => image,
            };

            session.recognize(&image)
        })
        .await
        .map_err(|e| TextlensError::OcrEngine(format!("OCR task failed: {e}")))?
    }
}
