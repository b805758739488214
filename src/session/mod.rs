//! Turn processing for one conversation.
//!
//! [`ChatEngine`] owns the collaborators (classifier, translator, response
//! selector); [`SessionContext`] owns the mutable conversation state. The
//! context is passed explicitly into every turn so the engine itself holds no
//! per-conversation state.
//!
//! One turn runs strictly in order:
//! translate → classify → extend trend → resolve intensity → select reply →
//! record exchange.

pub mod console;

pub use console::{Console, Outcome};

use crate::history::{Exchange, HistoryBuffer, HistoryStore, SentimentTrend};
use crate::intensity::Intensity;
use crate::responses::{Reply, ResponseSelector};
use crate::sentiment::{Classifier, Sentiment};
use crate::translate::{Translator, translate_text};
use tracing::debug;

/// Mutable state of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub history: HistoryBuffer,
    pub trend: SentimentTrend,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the persisted history and seed the trend from it.
    #[must_use]
    pub fn restore(store: &HistoryStore) -> Self {
        let history = store.load();
        let trend = SentimentTrend::from_history(&history);
        Self { history, trend }
    }
}

/// Result of processing one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Translated text, present only when it differs (ignoring case) from the input.
    pub translated: Option<String>,
    pub sentiment: Sentiment,
    pub intensity: Intensity,
    pub reply: Reply,
}

impl Turn {
    #[must_use]
    pub fn response(&self) -> &str {
        self.reply.text()
    }
}

/// Runs turns against a [`SessionContext`].
pub struct ChatEngine {
    classifier: Box<dyn Classifier>,
    translator: Box<dyn Translator>,
    selector: ResponseSelector,
}

impl ChatEngine {
    #[must_use]
    pub fn new(
        classifier: Box<dyn Classifier>,
        translator: Box<dyn Translator>,
        selector: ResponseSelector,
    ) -> Self {
        Self {
            classifier,
            translator,
            selector,
        }
    }

    /// Process one non-empty utterance and record the exchange in `ctx`.
    ///
    /// The exchange stores the translated utterance, the text that was
    /// actually classified and that later turns are recalled against.
    pub fn respond(&mut self, ctx: &mut SessionContext, utterance: &str) -> Turn {
        let normalized = translate_text(self.translator.as_ref(), utterance);
        let translated = (normalized.to_lowercase() != utterance.to_lowercase())
            .then(|| normalized.clone());

        let sentiment = self.classifier.classify(&normalized);
        ctx.trend.push(sentiment);
        let intensity = ctx.trend.intensity();

        let reply = self
            .selector
            .select_response(&normalized, sentiment, intensity, &ctx.history);
        debug!(
            %sentiment,
            %intensity,
            recalled = reply.is_recall(),
            "turn processed"
        );

        ctx.history.push(Exchange::new(normalized, reply.text(), sentiment));

        Turn {
            translated,
            sentiment,
            intensity,
            reply,
        }
    }
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::history::MAX_HISTORY;
    use crate::responses::{Picker, ResponseTable};
    use crate::sentiment::LexiconClassifier;
    use crate::translate::PassthroughTranslator;

    struct FirstPicker;

    impl Picker for FirstPicker {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    /// Classifies everything with the same label.
    struct Constant(Sentiment);

    impl Classifier for Constant {
        fn classify(&self, _utterance: &str) -> Sentiment {
            self.0
        }
    }

    /// Pretends every input was Spanish for "hello friend".
    struct ToEnglish;

    impl Translator for ToEnglish {
        fn translate(&self, _text: &str) -> crate::error::Result<String> {
            Ok("hello friend".into())
        }
    }

    fn engine(classifier: Box<dyn Classifier>) -> ChatEngine {
        ChatEngine::new(
            classifier,
            Box::new(PassthroughTranslator),
            ResponseSelector::new(ResponseTable::builtin(), Box::new(FirstPicker)),
        )
    }

    #[test]
    fn consecutive_positive_turns_escalate() {
        let mut engine = engine(Box::new(Constant(Sentiment::Positive)));
        let mut ctx = SessionContext::new();

        let levels: Vec<Intensity> = ["one", "two", "three"]
            .iter()
            .map(|u| engine.respond(&mut ctx, u).intensity)
            .collect();
        assert_eq!(
            levels,
            [Intensity::Mild, Intensity::Moderate, Intensity::Strong]
        );
    }

    #[test]
    fn turn_records_exchange_with_classified_sentiment() {
        let mut engine = engine(Box::new(LexiconClassifier::new()));
        let mut ctx = SessionContext::new();

        let turn = engine.respond(&mut ctx, "I am sad");
        assert_eq!(turn.sentiment, Sentiment::Negative);
        assert_eq!(turn.response(), "I understand. 🤗");
        assert!(turn.translated.is_none());

        let recorded = ctx.history.iter().next().unwrap();
        assert_eq!(
            recorded,
            &Exchange::new("I am sad", "I understand. 🤗", Sentiment::Negative)
        );
        assert_eq!(ctx.trend.labels(), [Sentiment::Negative]);
    }

    #[test]
    fn repeated_utterance_is_recalled() {
        let mut engine = engine(Box::new(LexiconClassifier::new()));
        let mut ctx = SessionContext::new();

        engine.respond(&mut ctx, "I am sad");
        let turn = engine.respond(&mut ctx, "I am sad today");
        assert!(turn.reply.is_recall());
        assert_eq!(
            turn.response(),
            "I remember you said: 'I am sad'. My response was: 'I understand. 🤗'"
        );
        assert_eq!(ctx.history.len(), 2);
    }

    #[test]
    fn history_and_trend_stay_bounded() {
        let mut engine = engine(Box::new(Constant(Sentiment::Neutral)));
        let mut ctx = SessionContext::new();
        for n in 0..12 {
            engine.respond(&mut ctx, &format!("distinct message {n:02}"));
        }
        assert_eq!(ctx.history.len(), MAX_HISTORY);
        assert_eq!(ctx.trend.len(), MAX_HISTORY);
    }

    #[test]
    fn translation_is_reported_and_recorded() {
        let mut engine = ChatEngine::new(
            Box::new(LexiconClassifier::new()),
            Box::new(ToEnglish),
            ResponseSelector::new(ResponseTable::builtin(), Box::new(FirstPicker)),
        );
        let mut ctx = SessionContext::new();

        let turn = engine.respond(&mut ctx, "hola amigo");
        assert_eq!(turn.translated.as_deref(), Some("hello friend"));
        assert_eq!(ctx.history.iter().next().unwrap().user_utterance, "hello friend");
    }

    #[test]
    fn restore_seeds_trend_from_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = HistoryStore::new(dir.path().join("history.json"));
        let mut history = HistoryBuffer::new();
        history.push(Exchange::new("a", "x", Sentiment::Negative));
        history.push(Exchange::new("b", "y", Sentiment::Negative));
        store.save(&history).unwrap();

        let ctx = SessionContext::restore(&store);
        assert_eq!(ctx.history, history);
        assert_eq!(ctx.trend.intensity(), Intensity::Moderate);

        let mut engine = engine(Box::new(Constant(Sentiment::Negative)));
        let mut ctx = ctx;
        let turn = engine.respond(&mut ctx, "still not great");
        assert_eq!(turn.intensity, Intensity::Strong);
    }
}
