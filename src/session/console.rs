//! Interactive text loop around [`ChatEngine`].
//!
//! Generic over the input reader and output writer so the whole conversation
//! can be driven from in-memory buffers.

use super::{ChatEngine, SessionContext};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::history::HistoryStore;
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{info, warn};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user confirmed an exit keyword; history was saved.
    Exited,
    /// Input ended without a confirmed exit; history was not saved.
    Aborted,
}

/// Line-oriented chat front end.
pub struct Console<R, W> {
    input: R,
    output: W,
    settings: SessionConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    #[must_use]
    pub fn new(input: R, output: W, settings: SessionConfig) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Give back the writer, e.g. to inspect a captured transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the conversation until a confirmed exit or end of input.
    ///
    /// On a confirmed exit the history in `ctx` is written to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written, or if the
    /// history cannot be saved.
    pub fn run(
        &mut self,
        engine: &mut ChatEngine,
        ctx: &mut SessionContext,
        store: &HistoryStore,
    ) -> Result<Outcome> {
        self.say("Hello! What's your name?")?;
        let Some(raw_name) = self.ask("You")? else {
            return Ok(Outcome::Aborted);
        };
        let name = match title_case(raw_name.trim()) {
            n if n.is_empty() => self.settings.default_user_name.clone(),
            n => n,
        };
        self.say(&format!("Nice to meet you, {name}! How are you feeling today?"))?;

        loop {
            let Some(line) = self.ask(&name)? else {
                info!("input closed, leaving without saving history");
                return Ok(Outcome::Aborted);
            };
            let utterance = line.trim();

            if self.is_exit_keyword(utterance) {
                self.say("Are you sure you want to exit? (yes/no)")?;
                let Some(answer) = self.ask(&name)? else {
                    return Ok(Outcome::Aborted);
                };
                if self.is_confirmation(answer.trim()) {
                    self.say(&format!("Goodbye, {name}! Take care! 👋"))?;
                    store.save(&ctx.history)?;
                    return Ok(Outcome::Exited);
                }
                self.say("Great! Let's continue our chat.")?;
                continue;
            }

            if utterance.is_empty() {
                self.say("Could you say that again?")?;
                continue;
            }

            let turn = engine.respond(ctx, utterance);
            if let Some(translated) = &turn.translated {
                self.say(&format!("(Translated) {translated}"))?;
            }
            self.say(turn.response())?;
        }
    }

    fn is_exit_keyword(&self, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        self.settings.exit_keywords.iter().any(|k| k.to_lowercase() == lower)
    }

    fn is_confirmation(&self, answer: &str) -> bool {
        let lower = answer.to_lowercase();
        self.settings.confirm_words.iter().any(|w| w.to_lowercase() == lower)
    }

    /// Print a prompt and read one line. `None` at end of input.
    ///
    /// A line that is not valid UTF-8 comes back empty, so callers treat it
    /// like blank input.
    fn ask(&mut self, speaker: &str) -> Result<Option<String>> {
        write!(self.output, "{speaker}: ")?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Some(line)),
            Err(e) => {
                warn!(error = %e, "discarding input line that is not valid UTF-8");
                Ok(Some(String::new()))
            }
        }
    }

    /// Print one bot line with the typing effect.
    fn say(&mut self, text: &str) -> Result<()> {
        let line = format!("{}: {text}", self.settings.bot_name);
        if self.settings.typing_delay_ms == 0 {
            writeln!(self.output, "{line}")?;
            return Ok(());
        }
        let delay = Duration::from_millis(self.settings.typing_delay_ms);
        for ch in line.chars() {
            write!(self.output, "{ch}")?;
            self.output.flush()?;
            std::thread::sleep(delay);
        }
        writeln!(self.output)?;
        Ok(())
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}
