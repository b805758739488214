//! Best-effort translation of user input to the working language.
//!
//! Translation sits in front of the classifier so that non-English input is
//! labelled sensibly. It is strictly fail-open: [`translate_text`] never
//! returns an error, it hands back the original text instead.

use crate::config::TranslationConfig;
use crate::error::{ChatError, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Turns text in any language into the target language.
pub trait Translator: Send + Sync {
    /// Translate `text`. Errors are expected and handled by [`translate_text`].
    fn translate(&self, text: &str) -> Result<String>;
}

/// Returns the input unchanged. Used when translation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_owned())
    }
}

/// Client for the public `translate_a/single` HTTP endpoint.
pub struct HttpTranslator {
    endpoint: String,
    source: String,
    target: String,
    agent: ureq::Agent,
}

impl HttpTranslator {
    #[must_use]
    pub fn new(config: &TranslationConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            endpoint: config.endpoint.clone(),
            source: config.source.clone(),
            target: config.target.clone(),
            agent,
        }
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("client", "gtx")
            .query("sl", &self.source)
            .query("tl", &self.target)
            .query("dt", "t")
            .query("q", text)
            .call()
            .map_err(|e| ChatError::Translation(e.to_string()))?;
        let body = response
            .into_string()
            .map_err(|e| ChatError::Translation(format!("unreadable response: {e}")))?;
        parse_translation(&body)
    }
}

impl std::fmt::Debug for HttpTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranslator")
            .field("endpoint", &self.endpoint)
            .field("source", &self.source)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Build the translator selected in config.
#[must_use]
pub fn build_translator(config: &TranslationConfig) -> Box<dyn Translator> {
    if config.enabled {
        Box::new(HttpTranslator::new(config))
    } else {
        Box::new(PassthroughTranslator)
    }
}

/// Extract the translated text from a `translate_a/single` reply.
///
/// The reply is a nested JSON array whose first element lists translated
/// segments; the first string of each segment is the translation.
fn parse_translation(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ChatError::Translation(format!("invalid response JSON: {e}")))?;
    let segments = value
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ChatError::Translation("response has no segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(serde_json::Value::as_str))
        .collect();
    if let Some(detected) = value.get(2).and_then(serde_json::Value::as_str) {
        debug!(detected, "translation source language");
    }
    Ok(translated)
}

/// Translate `text`, falling back to `text` itself on any failure or on an
/// empty translation.
pub fn translate_text(translator: &dyn Translator, text: &str) -> String {
    match translator.translate(text) {
        Ok(translated) if !translated.trim().is_empty() => translated,
        Ok(_) => {
            debug!("empty translation, keeping original text");
            text.to_owned()
        }
        Err(e) => {
            warn!(error = %e, "translation failed, keeping original text");
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        fn translate(&self, _text: &str) -> Result<String> {
            Err(ChatError::Translation("service unavailable".into()))
        }
    }

    struct BlankTranslator;

    impl Translator for BlankTranslator {
        fn translate(&self, _text: &str) -> Result<String> {
            Ok("   ".into())
        }
    }

    struct UppercaseTranslator;

    impl Translator for UppercaseTranslator {
        fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn failure_returns_input_unchanged() {
        assert_eq!(translate_text(&FailingTranslator, "estoy triste"), "estoy triste");
    }

    #[test]
    fn blank_translation_returns_input_unchanged() {
        assert_eq!(translate_text(&BlankTranslator, "hola"), "hola");
    }

    #[test]
    fn successful_translation_is_used() {
        assert_eq!(translate_text(&UppercaseTranslator, "hi"), "HI");
    }

    #[test]
    fn passthrough_is_identity() {
        assert_eq!(translate_text(&PassthroughTranslator, "bonjour"), "bonjour");
    }

    #[test]
    fn parse_concatenates_segments() {
        let body = r#"[[["I am sad. ","Estoy triste. ",null,null,10],["Help me.","Ayúdame.",null,null,10]],null,"es"]"#;
        assert_eq!(parse_translation(body).unwrap(), "I am sad. Help me.");
    }

    #[test]
    fn parse_rejects_unexpected_shapes() {
        assert!(parse_translation("<html>rate limited</html>").is_err());
        assert!(parse_translation(r#"{"error": "quota"}"#).is_err());
        assert!(parse_translation("[null]").is_err());
    }

    #[test]
    fn unreachable_endpoint_falls_back() {
        let config = TranslationConfig {
            endpoint: "http://127.0.0.1:9/translate_a/single".into(),
            timeout_secs: 1,
            ..TranslationConfig::default()
        };
        let translator = HttpTranslator::new(&config);
        assert_eq!(translate_text(&translator, "hola amigo"), "hola amigo");
    }

    #[test]
    fn disabled_config_builds_passthrough() {
        let config = TranslationConfig {
            enabled: false,
            ..TranslationConfig::default()
        };
        let translator = build_translator(&config);
        assert_eq!(translator.translate("guten tag").unwrap(), "guten tag");
    }
}
