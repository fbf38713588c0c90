//! Scripted intent extractor for tests and offline development.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{Language, SetupSessionId};
use crate::ports::{ExtractorError, ExtractorReply, IntentExtractor};

/// An extractor that replays scripted replies.
///
/// Replies are consumed in order; when the script runs out the extractor
/// echoes the utterance. A scripted error simulates a transport failure.
pub struct MockIntentExtractor {
    script: Mutex<Vec<Result<ExtractorReply, ExtractorError>>>,
}

impl MockIntentExtractor {
    /// An extractor that always echoes.
    pub fn echoing() -> Self {
        Self {
            script: Mutex::new(Vec::new()),
        }
    }

    /// An extractor that replays the given outcomes, then echoes.
    pub fn scripted(script: Vec<Result<ExtractorReply, ExtractorError>>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }

    /// An extractor that fails every call at the transport level.
    pub fn failing() -> Self {
        Self::scripted(vec![Err(ExtractorError::Network(
            "scripted failure".to_string(),
        ))])
    }
}

#[async_trait]
impl IntentExtractor for MockIntentExtractor {
    async fn extract(
        &self,
        message: &str,
        _session_id: &SetupSessionId,
        _language: Language,
    ) -> Result<ExtractorReply, ExtractorError> {
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            Ok(ExtractorReply::plain(format!("You said: {}", message)))
        } else {
            script.remove(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::MessageMetadata;

    #[tokio::test]
    async fn echoes_when_script_is_empty() {
        let extractor = MockIntentExtractor::echoing();
        let reply = extractor
            .extract("hello", &SetupSessionId::new(), Language::En)
            .await
            .unwrap();
        assert_eq!(reply.response, "You said: hello");
        assert_eq!(reply.action, MessageMetadata::None);
    }

    #[tokio::test]
    async fn replays_script_in_order_then_echoes() {
        let extractor = MockIntentExtractor::scripted(vec![
            Ok(ExtractorReply::plain("first")),
            Err(ExtractorError::Network("down".to_string())),
        ]);

        let id = SetupSessionId::new();
        assert_eq!(
            extractor
                .extract("a", &id, Language::En)
                .await
                .unwrap()
                .response,
            "first"
        );
        assert!(extractor.extract("b", &id, Language::En).await.is_err());
        assert_eq!(
            extractor
                .extract("c", &id, Language::En)
                .await
                .unwrap()
                .response,
            "You said: c"
        );
    }
}
