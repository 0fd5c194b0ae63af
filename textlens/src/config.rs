use std::env;

/// Largest accepted image upload: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Longest accepted language code, e.g. `chi_sim+eng` is rejected at 11.
pub const MAX_LANGUAGE_LENGTH: usize = 10;

pub const DEFAULT_LANGUAGE: &str = "eng";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Human-readable byte limit: whole megabytes when at least 1 MiB, else
/// whole kilobytes, else bytes. Rounds down so the label never overstates.
pub fn size_label(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

/// Runtime mode. Only `development` exposes raw error detail to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// `APP_ENV` wins over `NODE_ENV`; any value other than `development`
    /// (case-insensitive) means production.
    fn from_env() -> Self {
        let raw = env_non_empty("APP_ENV").or_else(|| env_non_empty("NODE_ENV"));
        match raw {
            Some(value) => Self::parse(&value),
            None => Self::Production,
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Per-file limit in bytes, enforced while the field is streamed.
    pub max_file_size: usize,
    pub max_language_length: usize,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub default_language: String,
    /// Directory holding `*.traineddata`. `None` lets Tesseract use its
    /// compiled-in default or `TESSDATA_PREFIX`.
    pub tessdata_path: Option<String>,
    /// Deadline around a single recognition. `0` disables it.
    pub timeout_secs: u64,
    pub preprocess: bool,
    pub max_image_dimension: u32,
    pub min_image_dimension: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_UPLOAD_SIZE,
            max_language_length: MAX_LANGUAGE_LENGTH,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            tessdata_path: None,
            timeout_secs: 60,
            preprocess: false,
            max_image_dimension: 4096,
            min_image_dimension: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", 3000),
                environment: Environment::from_env(),
            },
            upload: UploadConfig {
                max_file_size: parse_env_or("MAX_UPLOAD_SIZE", DEFAULT_MAX_UPLOAD_SIZE),
                max_language_length: MAX_LANGUAGE_LENGTH,
            },
            ocr: OcrConfig {
                default_language: env_non_empty("OCR_DEFAULT_LANGUAGE")
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                tessdata_path: env_non_empty("OCR_TESSDATA_PATH")
                    .or_else(|| env_non_empty("TESSDATA_PREFIX")),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
                preprocess: parse_env_or("OCR_PREPROCESS", false),
                max_image_dimension: parse_env_or("OCR_MAX_DIMENSION", 4096),
                min_image_dimension: parse_env_or("OCR_MIN_DIMENSION", 50),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Upload limit as shown to clients, e.g. `10MB`.
    pub fn max_upload_label(&self) -> String {
        size_label(self.upload.max_file_size)
    }
}
