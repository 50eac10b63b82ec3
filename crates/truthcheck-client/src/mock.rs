//! Mock quiz service for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use truthcheck_core::model::{Answer, QuizDocument};
use truthcheck_core::traits::QuizService;

/// An in-memory quiz service for driving the flow without a server.
pub struct MockQuizService {
    document: QuizDocument,
    fail_submission: bool,
    submit_count: AtomicU32,
    last_answer: Mutex<Option<Answer>>,
}

impl MockQuizService {
    /// Create a mock serving the given quiz document.
    pub fn new(document: QuizDocument) -> Self {
        Self {
            document,
            fail_submission: false,
            submit_count: AtomicU32::new(0),
            last_answer: Mutex::new(None),
        }
    }

    /// Create a mock whose submissions always fail.
    pub fn with_failing_submission(document: QuizDocument) -> Self {
        Self {
            fail_submission: true,
            ..Self::new(document)
        }
    }

    /// Number of submissions received.
    pub fn submit_count(&self) -> u32 {
        self.submit_count.load(Ordering::Relaxed)
    }

    /// The most recent submitted answer.
    pub fn last_answer(&self) -> Option<Answer> {
        self.last_answer.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizService for MockQuizService {
    async fn fetch_quiz(&self) -> anyhow::Result<QuizDocument> {
        Ok(self.document.clone())
    }

    async fn submit_answer(&self, answer: &Answer) -> anyhow::Result<()> {
        self.submit_count.fetch_add(1, Ordering::Relaxed);
        *self.last_answer.lock().unwrap() = Some(answer.clone());

        if self.fail_submission {
            anyhow::bail!("mock submission failure");
        }
        Ok(())
    }
}
