//! Mock completion model for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use finsight_core::{CompletionModel, FinsightError, Result};

/// A [`CompletionModel`] that replays scripted responses in order.
///
/// Each `complete` call records the prompt it received and consumes the
/// next scripted response; calls beyond the script fail with a completion
/// error, which doubles as a way to exercise failure paths.
pub struct MockCompletionModel {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionModel {
    /// Create a mock that replays `responses` in order.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call fails.
    pub fn failing() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl CompletionModel for MockCompletionModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str, _temperature: f32) -> Result<String> {
        self.prompts.lock().expect("mock lock poisoned").push(prompt.to_string());
        let mut responses = self.responses.lock().expect("mock lock poisoned");
        responses.pop_front().ok_or_else(|| FinsightError::Completion {
            provider: "Mock".into(),
            message: "no scripted response left".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_responses_in_order_and_records_prompts() {
        let mock = MockCompletionModel::new(["first", "second"]);

        assert_eq!(mock.complete("p1", 0.2).await.unwrap(), "first");
        assert_eq!(mock.complete("p2", 0.3).await.unwrap(), "second");
        assert!(mock.complete("p3", 0.2).await.is_err());

        assert_eq!(mock.prompts(), ["p1", "p2", "p3"]);
    }
}
