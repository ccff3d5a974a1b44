//! Translation to English
//!
//! [`Translator`] decides whether a text needs translating and enforces the
//! request limits; the actual call goes through a [`TranslationService`].

use crate::error::TranslationError;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use sentra_core::LanguageCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Longest text accepted in a single request, in characters
pub const MAX_TRANSLATION_CHARS: usize = 5000;

/// Google-Translate-compatible endpoint used by default
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Source languages the translation service accepts
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "ceb", "co", "cs", "cy", "da", "de",
    "el", "en", "eo", "es", "et", "eu", "fa", "fi", "fr", "fy", "ga", "gd", "gl", "gu", "ha",
    "haw", "he", "hi", "hmn", "hr", "ht", "hu", "hy", "id", "ig", "is", "it", "ja", "jw", "ka",
    "kk", "km", "kn", "ko", "ku", "ky", "la", "lb", "lo", "lt", "lv", "mg", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "ne", "nl", "no", "ny", "pa", "pl", "ps", "pt", "ro", "ru",
    "sd", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "st", "su", "sv", "sw", "ta", "te",
    "tg", "th", "tl", "tr", "uk", "ur", "uz", "vi", "xh", "yi", "yo", "zh-cn", "zh-tw", "zu",
];

/// Whether a normalized code is an accepted source language
pub fn is_supported(code: &LanguageCode) -> bool {
    SUPPORTED_LANGUAGES.contains(&code.as_str())
}

/// Code as the service expects it: region subtags are uppercase (`zh-CN`)
pub fn service_code(code: &LanguageCode) -> String {
    match code.as_str().split_once('-') {
        Some((language, region)) => format!("{language}-{}", region.to_ascii_uppercase()),
        None => code.as_str().to_string(),
    }
}

/// External translation backend
pub trait TranslationService: Send + Sync {
    /// Translate `text` from `source` to `target`
    fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> std::result::Result<String, TranslationError>;
}

/// Normalizes text into English
#[derive(Clone)]
pub struct Translator {
    service: Arc<dyn TranslationService>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator").finish_non_exhaustive()
    }
}

impl Translator {
    /// Translator backed by a service
    pub fn new(service: Arc<dyn TranslationService>) -> Self {
        Self { service }
    }

    /// Return `text` in English
    ///
    /// English and blank text come back unchanged without a service call.
    /// Failures are returned as-is; the original text is never substituted.
    pub fn normalize(
        &self,
        text: &str,
        source: &LanguageCode,
    ) -> std::result::Result<String, TranslationError> {
        if source.is_english() || text.trim().is_empty() {
            return Ok(text.to_string());
        }
        if !is_supported(source) {
            return Err(TranslationError::UnsupportedLanguage {
                code: source.to_string(),
            });
        }

        let len = text.chars().count();
        if len > MAX_TRANSLATION_CHARS {
            return Err(TranslationError::TooLong {
                len,
                max: MAX_TRANSLATION_CHARS,
            });
        }

        tracing::info!(source = %source, chars = len, "translating to English");
        self.service
            .translate(text, source, &LanguageCode::english())
    }
}

/// Blocking HTTP client for a Google-Translate-compatible endpoint
#[derive(Debug, Clone)]
pub struct HttpTranslationService {
    client: Client,
    endpoint: String,
}

impl HttpTranslationService {
    /// Client for the default endpoint, without a request timeout
    pub fn new() -> std::result::Result<Self, TranslationError> {
        Self::with_options(DEFAULT_ENDPOINT, None)
    }

    /// Client for a custom endpoint, optionally with a request timeout
    pub fn with_options(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> std::result::Result<Self, TranslationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TranslationError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TranslationService for HttpTranslationService {
    fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> std::result::Result<String, TranslationError> {
        let source = service_code(source);
        let target = service_code(target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslationError::RateLimited);
        }
        if !status.is_success() {
            return Err(TranslationError::Service {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        let payload: Value = response
            .json()
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
        parse_translation(&payload)
    }
}

/// Concatenate the translated segments of a `translate_a/single` reply
///
/// The reply is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_translation(payload: &Value) -> std::result::Result<String, TranslationError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing translation segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::InvalidResponse(
            "translation segments are empty".into(),
        ));
    }
    Ok(translated)
}
