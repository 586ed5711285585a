use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use lru::LruCache;
use thiserror::Error;

mod google;
mod libre;

pub use google::GoogleFreeTranslator;
pub use libre::LibreTranslator;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

/// One text translated into one target language. Implementations must not
/// mutate shared state without interior mutability; a single translator is
/// shared across a whole fill pass.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;

    fn name(&self) -> &'static str;
}

/// Per-language results of translating one text into several languages.
#[derive(Debug, Default)]
pub struct TranslationResult {
    /// (language, translated text)
    pub translated: Vec<(String, String)>,
    /// (language, what went wrong)
    pub failed: Vec<(String, TranslateError)>,
}

/// Translates `text` into every language of `targets`, sequentially, never
/// giving up on the batch because one language failed.
///
/// The request itself is validated up front: empty text, empty source and an
/// empty or duplicated target list are refused before any provider traffic
/// happens.
pub async fn translate_all(
    translator: &dyn Translator,
    text: &str,
    source: &str,
    targets: &[String],
) -> Result<TranslationResult, TranslateError> {
    if text.is_empty() {
        return Err(TranslateError::MalformedRequest("empty text".into()));
    }
    if source.is_empty() {
        return Err(TranslateError::MalformedRequest(
            "empty source language".into(),
        ));
    }
    if targets.is_empty() {
        return Err(TranslateError::MalformedRequest(
            "no target languages".into(),
        ));
    }
    let mut seen = std::collections::BTreeSet::new();
    if let Some(dup) = targets.iter().find(|t| !seen.insert(t.as_str())) {
        return Err(TranslateError::MalformedRequest(format!(
            "duplicate target language `{dup}`"
        )));
    }

    let mut result = TranslationResult::default();
    for lang in targets {
        match translator.translate(text, source, lang).await {
            Ok(translated) => result.translated.push((lang.clone(), translated)),
            Err(err) => {
                tracing::debug!(provider = translator.name(), lang = %lang, error = %err, "translation failed");
                result.failed.push((lang.clone(), err));
            }
        }
    }
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Dummy,
    GoogleFree,
    LibreTranslate,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dummy" => Ok(Provider::Dummy),
            "google" | "google-free" => Ok(Provider::GoogleFree),
            "libre" | "libretranslate" => Ok(Provider::LibreTranslate),
            other => Err(format!(
                "unknown provider `{other}` (expected dummy, google or libre)"
            )),
        }
    }
}

/// Everything needed to construct a provider. Mirrors the `[translate]`
/// section of locsync.toml plus the CLI overrides.
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub provider: Provider,
    pub timeout_ms: u64,
    /// 0 disables the LRU cache in front of the provider.
    pub cache_size: usize,
    pub google_endpoint: Option<String>,
    pub libre_endpoint: Option<String>,
    pub libre_api_key: Option<String>,
}

/// Builds the configured provider, wrapped in a [`CachingTranslator`] unless
/// the cache is disabled. The LibreTranslate key falls back to the
/// `LIBRETRANSLATE_API_KEY` environment variable.
pub fn make_translator(opts: &ProviderOptions) -> Result<Box<dyn Translator>, TranslateError> {
    let inner: Box<dyn Translator> = match opts.provider {
        Provider::Dummy => Box::new(DummyTranslator),
        Provider::GoogleFree => Box::new(GoogleFreeTranslator::new(
            opts.google_endpoint.clone(),
            opts.timeout_ms,
        )?),
        Provider::LibreTranslate => {
            let api_key = opts
                .libre_api_key
                .clone()
                .or_else(|| std::env::var("LIBRETRANSLATE_API_KEY").ok());
            Box::new(LibreTranslator::new(
                opts.libre_endpoint.clone(),
                api_key,
                opts.timeout_ms,
            )?)
        }
    };
    if opts.cache_size == 0 {
        return Ok(inner);
    }
    Ok(Box::new(CachingTranslator::new(inner, opts.cache_size)))
}

/// Offline provider: echoes the text tagged with the target language.
/// Deterministic, handy for tests and dry runs without network access.
pub struct DummyTranslator;

#[async_trait]
impl Translator for DummyTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        Ok(format!("{text} [{target}]"))
    }

    fn name(&self) -> &'static str {
        "dummy"
    }
}

/// LRU cache in front of any provider, keyed by (text, source, target).
/// Only successful translations are cached.
pub struct CachingTranslator {
    inner: Box<dyn Translator>,
    cache: Mutex<LruCache<(String, String, String), String>>,
}

impl CachingTranslator {
    pub fn new(inner: Box<dyn Translator>, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(cap)),
        }
    }
}

#[async_trait]
impl Translator for CachingTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let key = (text.to_string(), source.to_string(), target.to_string());
        {
            let mut cache = self
                .cache
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }
        let translated = self.inner.translate(text, source, target).await?;
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .put(key, translated.clone());
        Ok(translated)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
