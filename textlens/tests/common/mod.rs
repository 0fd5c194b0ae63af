// Shared helpers for the HTTP integration tests
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use axum::body::{Body, Bytes};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use image::{DynamicImage, ImageFormat};

use textlens::api::{create_router, AppState};
use textlens::config::{Config, Environment, OcrConfig, ServerConfig, UploadConfig};
use textlens::error::{Result, TextlensError};
use textlens::ocr::{OcrEngine, OcrProvider, OcrSession, RawRecognition};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Image bytes that make [`FakeEngine`] fail recognition.
pub const CORRUPT_IMAGE: &[u8] = b"CORRUPT";
/// Image bytes that make [`FakeEngine`] panic inside the blocking task.
pub const CRASHING_IMAGE: &[u8] = b"CRASH";

/// Deterministic engine: always reads "HELLO" with fixed confidence.
///
/// Only the language packs it was built with can be acquired. Sessions
/// count themselves in and out so tests can check release, and keep the
/// last bytes they were asked to read.
pub struct FakeEngine {
    languages: Vec<String>,
    pub acquired: AtomicUsize,
    pub released: Arc<AtomicUsize>,
    pub received: Arc<Mutex<Vec<u8>>>,
}

impl FakeEngine {
    pub fn new(languages: &[&str]) -> Self {
        Self {
            languages: languages.iter().map(|l| l.to_string()).collect(),
            acquired: AtomicUsize::new(0),
            released: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

struct FakeSession {
    released: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<u8>>>,
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl OcrEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn acquire(&self, language: &str) -> Result<Box<dyn OcrSession>> {
        let known = language
            .split('+')
            .all(|pack| self.languages.iter().any(|l| l == pack));
        if !known {
            return Err(TextlensError::OcrInit {
                language: language.to_string(),
                reason: format!("Failed loading language '{language}'"),
            });
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            released: Arc::clone(&self.released),
            received: Arc::clone(&self.received),
        }))
    }
}

impl OcrSession for FakeSession {
    fn recognize(&mut self, image: &[u8]) -> Result<RawRecognition> {
        *self.received.lock().unwrap() = image.to_vec();
        if image == CRASHING_IMAGE {
            panic!("tesseract aborted");
        }
        if image == CORRUPT_IMAGE {
            return Err(TextlensError::OcrRecognition(
                "Pix decode failed: unknown format".to_string(),
            ));
        }
        Ok(RawRecognition {
            text: "\n  HELLO \n\n".to_string(),
            confidence: 93.0,
            word_count: Some(1),
        })
    }
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment,
        },
        upload: UploadConfig::default(),
        ocr: OcrConfig::default(),
    }
}

pub fn app_with_engine(engine: Arc<FakeEngine>, config: Config) -> Router {
    init_test_logger();
    let ocr = OcrProvider::with_engine(engine, &config.ocr);
    create_router(AppState::new(config, ocr))
}

pub fn test_app(environment: Environment) -> Router {
    app_with_engine(
        Arc::new(FakeEngine::new(&["eng", "fra"])),
        test_config(environment),
    )
}

pub fn preprocessing_config(environment: Environment) -> Config {
    let mut config = test_config(environment);
    config.ocr.preprocess = true;
    config
}

pub struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    pub fn file(name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            content_type: Some(content_type.to_string()),
            data: data.to_vec(),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }
}

pub fn multipart_request(uri: &str, parts: Vec<Part>) -> Request<Body> {
    let boundary = "----textlens-integration-boundary";
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match &part.file_name {
            Some(file) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file}\"\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(ct) = &part.content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    // Deliver the body in transport-sized chunks, as a real client would.
    let chunks: Vec<std::io::Result<Bytes>> = body
        .chunks(64 * 1024)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from_stream(futures::stream::iter(chunks)))
        .unwrap()
}

pub fn recognize_request(parts: Vec<Part>) -> Request<Body> {
    multipart_request("/api/recognize-text", parts)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::new_rgb8(width, height);
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), format).unwrap();
    output
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, ImageFormat::Png)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, ImageFormat::Jpeg)
}
