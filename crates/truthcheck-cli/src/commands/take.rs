//! The `truthcheck take` command: the interactive quiz flow.

use anyhow::Result;

use truthcheck_client::{ClientConfig, QuizClient};
use truthcheck_core::cache::AnswerCache;
use truthcheck_core::flow::{QuizFlow, SubmitOutcome};
use truthcheck_core::form::DemographicForm;
use truthcheck_core::model::ANIMATION_DELAY;
use truthcheck_core::traits::QuizService;

use crate::banner;
use crate::view::{TerminalView, View};

pub async fn execute(config: &ClientConfig) -> Result<()> {
    let client = QuizClient::new(config.server_url.clone());
    let cache = AnswerCache::default_path().map(AnswerCache::new);
    let mut view = TerminalView::new();
    run_flow(&client, &mut view, cache.as_ref()).await
}

/// Drive the quiz flow over a view: intro, one verdict per page, the outro
/// form pre-filled from the cache, and the final submission.
pub async fn run_flow(
    service: &dyn QuizService,
    view: &mut dyn View,
    cache: Option<&AnswerCache>,
) -> Result<()> {
    let document = match service.fetch_quiz().await {
        Ok(document) => document,
        Err(e) => {
            banner::show("Failed to load questions.");
            return Err(e);
        }
    };

    let count = document.pages.len();
    let mut flow = QuizFlow::new(document.seed, document.pages);

    view.intro(count)?;
    tokio::time::sleep(ANIMATION_DELAY).await;
    flow.advance();

    let mut index = 0;
    while let Some(page) = flow.current_page().cloned() {
        let choice = view.ask(index, count, &page)?;
        flow.choose(choice);
        tokio::time::sleep(ANIMATION_DELAY).await;
        flow.advance();
        index += 1;
    }

    // Pre-fill from the last cached answer; a malformed cache already fell
    // back to None inside the cache.
    let mut form = cache
        .and_then(|c| c.load())
        .map(|answer| DemographicForm::from_cached(&answer))
        .unwrap_or_else(DemographicForm::empty);

    let mut invalid = Vec::new();
    let answer = loop {
        form = view.outro(&form, &invalid)?;
        match flow.submit(&form) {
            SubmitOutcome::Accepted(answer) => break answer,
            SubmitOutcome::Invalid(fields) => invalid = fields,
            SubmitOutcome::NotReady => anyhow::bail!("quiz flow is not ready to submit"),
        }
    };

    if let Some(cache) = cache {
        if let Err(e) = cache.store(&answer) {
            tracing::warn!("failed to cache answer: {e:#}");
        }
    }

    view.submitting();
    if let Err(e) = service.submit_answer(&answer).await {
        banner::show("Failed to submit results.");
        return Err(e);
    }
    view.submitted();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use truthcheck_client::mock::MockQuizService;
    use truthcheck_core::flow::Choice;
    use truthcheck_core::form::{Field, Selection};
    use truthcheck_core::model::{Answer, QuizDocument, QuizPage};

    /// A view that replays scripted choices and forms, recording what the
    /// driver showed it.
    struct ScriptedView {
        choices: Vec<Choice>,
        forms: Vec<DemographicForm>,
        asked_pages: Vec<u32>,
        invalid_seen: Vec<Vec<Field>>,
        prefill: Option<DemographicForm>,
    }

    impl ScriptedView {
        fn new(choices: Vec<Choice>, forms: Vec<DemographicForm>) -> Self {
            Self {
                choices,
                forms,
                asked_pages: Vec::new(),
                invalid_seen: Vec::new(),
                prefill: None,
            }
        }
    }

    impl View for ScriptedView {
        fn intro(&mut self, _count: usize) -> Result<()> {
            Ok(())
        }

        fn ask(&mut self, _index: usize, _count: usize, page: &QuizPage) -> Result<Choice> {
            self.asked_pages.push(page.id);
            Ok(self.choices.remove(0))
        }

        fn outro(
            &mut self,
            previous: &DemographicForm,
            invalid: &[Field],
        ) -> Result<DemographicForm> {
            if self.prefill.is_none() {
                self.prefill = Some(previous.clone());
            }
            self.invalid_seen.push(invalid.to_vec());
            Ok(self.forms.remove(0))
        }

        fn submitting(&mut self) {}
        fn submitted(&mut self) {}
    }

    fn document() -> QuizDocument {
        QuizDocument {
            seed: "77".into(),
            pages: vec![
                QuizPage {
                    id: 9,
                    text: "first claim".into(),
                },
                QuizPage {
                    id: 4,
                    text: "second claim".into(),
                },
            ],
        }
    }

    fn valid_form() -> DemographicForm {
        DemographicForm {
            in_us: Selection::chosen("no"),
            country: Selection::chosen("Romania"),
            side: Selection::chosen("left"),
            age: "30".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn walks_every_page_and_submits_once() {
        let service = MockQuizService::new(document());
        let mut view = ScriptedView::new(vec![Choice::Fake, Choice::Real], vec![valid_form()]);

        run_flow(&service, &mut view, None).await.unwrap();

        assert_eq!(view.asked_pages, vec![9, 4]);
        assert_eq!(service.submit_count(), 1);
        let answer = service.last_answer().unwrap();
        assert_eq!(answer.seed, "77");
        assert_eq!(answer.fake, vec![9]);
        assert_eq!(answer.real, vec![4]);
        assert_eq!(answer.country, "Romania");
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_is_remarked_and_blocks_submission() {
        let service = MockQuizService::new(document());
        let mut bad_form = valid_form();
        bad_form.side = Selection::Placeholder;
        bad_form.age = "abc".into();

        let mut view = ScriptedView::new(
            vec![Choice::Real, Choice::Real],
            vec![bad_form, valid_form()],
        );

        run_flow(&service, &mut view, None).await.unwrap();

        // First pass has no marks; the retry marks exactly the bad fields.
        assert_eq!(view.invalid_seen, vec![vec![], vec![Field::Side, Field::Age]]);
        // The invalid attempt performed no network submission.
        assert_eq!(service.submit_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn outro_is_prefilled_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnswerCache::new(dir.path().join("answer.json"));
        cache
            .store(&Answer::new(
                "old",
                vec![1],
                vec![2],
                "Romania",
                "right",
                "52",
            ))
            .unwrap();

        let service = MockQuizService::new(document());
        let mut view = ScriptedView::new(vec![Choice::Fake, Choice::Fake], vec![valid_form()]);

        run_flow(&service, &mut view, Some(&cache)).await.unwrap();

        let prefill = view.prefill.unwrap();
        assert_eq!(prefill.in_us.value(), Some("no"));
        assert_eq!(prefill.country.value(), Some("Romania"));
        assert_eq!(prefill.side.value(), Some("right"));
        assert_eq!(prefill.age, "52");
    }

    #[tokio::test(start_paused = true)]
    async fn submission_overwrites_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AnswerCache::new(dir.path().join("answer.json"));

        let service = MockQuizService::new(document());
        let mut view = ScriptedView::new(vec![Choice::Real, Choice::Fake], vec![valid_form()]);

        run_flow(&service, &mut view, Some(&cache)).await.unwrap();

        let cached = cache.load().unwrap();
        assert_eq!(cached.real, vec![9]);
        assert_eq!(cached.fake, vec![4]);
        assert_eq!(cached.country, "Romania");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submission_surfaces_the_error() {
        let service = MockQuizService::with_failing_submission(document());
        let mut view = ScriptedView::new(vec![Choice::Real, Choice::Real], vec![valid_form()]);

        let err = run_flow(&service, &mut view, None).await.unwrap_err();
        assert!(err.to_string().contains("mock submission failure"));
    }
}
