//! OCR (Optical Character Recognition) Module
//!
//! Turns validated image bytes into text for the recognize endpoint.
//!
//! # Architecture
//!
//! - `OcrEngine` is a session factory keyed by language pack
//! - `OcrSession` is one loaded engine instance; dropping it releases the
//!   engine's native resources
//! - `TesseractEngine` implements both via leptess
//! - `OcrProvider` runs acquire, recognize and release on the blocking pool,
//!   with an optional deadline and optional preprocessing
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `default_language`: language used when a request names none
//! - `tessdata_path`: directory of `*.traineddata` files
//! - `timeout_secs`: deadline around one recognition, `0` to disable
//! - `preprocess` and `min/max_image_dimension`: grayscale, contrast and size
//!   normalization before recognition
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr);
//! let raw = ocr.recognize(image_bytes, "eng").await?;
//! ```

mod engine;
mod preprocessing;
mod provider;
mod tesseract;

pub use engine::{OcrEngine, OcrSession, RawRecognition};
pub use preprocessing::preprocess_image;
pub use provider::OcrProvider;
pub use tesseract::TesseractEngine;
