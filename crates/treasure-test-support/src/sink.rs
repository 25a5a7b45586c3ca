//! Test sinks — scripted `PresentationSink` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use treasure_core::error::DomainError;
use treasure_core::presentation::PresentationSink;
use treasure_core::stage::Stage;

/// A sink that records everything shown and answers prompts from a script.
///
/// Choice prompts take the next scripted label, or the first offered option
/// once the script runs out. Text prompts take the next scripted answer and
/// fail with `DomainError::Presentation` once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedSink {
    rejected_prefix: Option<String>,
    texts: Mutex<Vec<String>>,
    images: Mutex<Vec<Stage>>,
    prompts: Mutex<Vec<Vec<String>>>,
    choices: Mutex<VecDeque<String>>,
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedSink {
    /// A sink that always picks the first option and has no text answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue labels to select at the next choice prompts, in order.
    #[must_use]
    pub fn with_choices<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices
            .lock()
            .unwrap()
            .extend(labels.into_iter().map(Into::into));
        self
    }

    /// Queue answers to confirm at the next text prompts, in order.
    #[must_use]
    pub fn with_answers<I, S>(self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers
            .lock()
            .unwrap()
            .extend(answers.into_iter().map(Into::into));
        self
    }

    /// Fail `show_text` for any line starting with `prefix`, as if the page
    /// had gone away at that moment.
    #[must_use]
    pub fn rejecting_texts_starting_with(mut self, prefix: impl Into<String>) -> Self {
        self.rejected_prefix = Some(prefix.into());
        self
    }

    /// Every narration line shown so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    /// Every scenery switch so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn images(&self) -> Vec<Stage> {
        self.images.lock().unwrap().clone()
    }

    /// The option lists of every choice prompt so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<Vec<String>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PresentationSink for ScriptedSink {
    async fn show_text(&self, message: &str) -> Result<(), DomainError> {
        if self
            .rejected_prefix
            .as_deref()
            .is_some_and(|prefix| message.starts_with(prefix))
        {
            return Err(DomainError::Presentation("text rejected".into()));
        }
        self.texts.lock().unwrap().push(message.to_owned());
        Ok(())
    }

    async fn show_image(&self, stage: Stage) -> Result<(), DomainError> {
        self.images.lock().unwrap().push(stage);
        Ok(())
    }

    async fn present_choices(&self, options: &[&str]) -> Result<String, DomainError> {
        self.prompts
            .lock()
            .unwrap()
            .push(options.iter().map(|o| (*o).to_owned()).collect());
        if let Some(label) = self.choices.lock().unwrap().pop_front() {
            return Ok(label);
        }
        options
            .first()
            .map(|o| (*o).to_owned())
            .ok_or_else(|| DomainError::Presentation("no options offered".into()))
    }

    async fn present_text_input(&self) -> Result<String, DomainError> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| DomainError::Presentation("no scripted text input".into()))
    }
}

/// A sink whose player has left: output is dropped and every prompt fails.
#[derive(Debug)]
pub struct ClosedSink;

#[async_trait]
impl PresentationSink for ClosedSink {
    async fn show_text(&self, _message: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn show_image(&self, _stage: Stage) -> Result<(), DomainError> {
        Ok(())
    }

    async fn present_choices(&self, _options: &[&str]) -> Result<String, DomainError> {
        Err(DomainError::Presentation("sink closed".into()))
    }

    async fn present_text_input(&self) -> Result<String, DomainError> {
        Err(DomainError::Presentation("sink closed".into()))
    }
}
