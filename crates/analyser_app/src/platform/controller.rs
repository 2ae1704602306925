use std::time::{Duration, Instant};

use analyser_core::{
    escape_html, update, AlertId, AppState, AppViewModel, InputError, Msg, SelectedFile, Severity,
};
use analyser_engine::EngineHandle;
use analyser_logging::analyser_debug;

use super::effects::{map_event, EffectRunner};
use super::ui::page::{ElementId, Page, PageCommand};
use super::ui::render::render;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttachError {
    #[error("host page is missing required element #{}", .0.dom_id())]
    MissingElement(ElementId),
}

/// The resume form: owns the core state, drives the page and forwards IO to
/// the engine.
///
/// Each method corresponds to a user action or a host call; the event wiring
/// lives outside. Engine results arrive asynchronously and are applied by
/// [`FormController::pump`] or [`FormController::wait_for_submission`].
pub struct FormController<P: Page> {
    page: P,
    state: AppState,
    effects: EffectRunner,
}

impl<P: Page> FormController<P> {
    pub fn attach(page: P, engine: EngineHandle) -> Result<Self, AttachError> {
        if let Some(missing) = ElementId::REQUIRED
            .into_iter()
            .find(|id| !page.has_element(*id))
        {
            return Err(AttachError::MissingElement(missing));
        }

        let mut controller = Self {
            page,
            state: AppState::new(),
            effects: EffectRunner::new(engine),
        };
        let view = controller.state.view();
        controller.apply(render(&view));
        Ok(controller)
    }

    pub fn with_success_alert_ttl(mut self, ttl: Duration) -> Self {
        self.state = std::mem::take(&mut self.state).with_success_alert_ttl(ttl);
        self
    }

    /// The resume input changed; `None` means the selection was cleared.
    pub fn validate_resume_file(&mut self, file: Option<SelectedFile>) {
        self.dispatch(Msg::ResumeSelected(file));
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::JobDescriptionChanged(text.into()));
    }

    /// Form submit. Dropped while a submission is in flight.
    pub fn handle_submit(&mut self) {
        self.dispatch(Msg::SubmitClicked);
    }

    pub fn validate_form_inputs(&self) -> Result<(), InputError> {
        self.state.validate_inputs()
    }

    pub fn show_alert(&mut self, message: impl Into<String>, severity: Severity) -> AlertId {
        self.dispatch(Msg::ShowAlert {
            message: message.into(),
            severity,
        });
        self.state
            .alerts()
            .iter()
            .last()
            .map(|alert| alert.id)
            .unwrap_or_default()
    }

    /// The close control of one banner was clicked.
    pub fn dismiss_alert(&mut self, id: AlertId) {
        self.dispatch(Msg::AlertDismissed(id));
    }

    pub fn clear_alert(&mut self) {
        self.dispatch(Msg::ClearAlerts);
    }

    pub fn clear_results(&mut self) {
        self.dispatch(Msg::ClearResults);
    }

    pub fn escape_html(text: &str) -> String {
        escape_html(text)
    }

    /// Applies engine events that are already waiting. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.effects.engine().try_recv() {
            self.dispatch(map_event(event));
            handled += 1;
        }
        handled
    }

    /// Blocks until the in-flight submission settles or `timeout` passes.
    /// Returns whether nothing is in flight anymore. Other events that
    /// arrive meanwhile (alert expiries) are applied as well.
    pub fn wait_for_submission(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.is_submitting() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.effects.engine().recv_timeout(remaining) {
                Some(event) => self.dispatch(map_event(event)),
                None => break,
            }
        }
        !self.state.is_submitting()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        // Render first so a scroll lands on the new results.
        if was_dirty {
            let view = self.state.view();
            self.apply(render(&view));
        }
        let commands = self.effects.run(effects);
        self.apply(commands);
    }

    fn apply(&mut self, commands: Vec<PageCommand>) {
        for command in commands {
            if self.page.has_element(command.target()) {
                self.page.apply(command);
            } else {
                analyser_debug!("skipping {:?}: element not on page", command);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use analyser_core::{AnalysisResult, SectionKind, ANALYSIS_SUCCEEDED, MAX_RESUME_BYTES};
    use analyser_engine::{AnalysisClient, AnalysisRequest, FailureKind, SubmitError};

    use super::*;
    use crate::platform::ui::page::{ElementState, HeadlessPage};

    const WAIT: Duration = Duration::from_secs(5);

    /// Answers every request with the same canned outcome after an optional gate.
    struct FakeClient {
        outcome: Result<AnalysisResult, SubmitError>,
        calls: AtomicUsize,
        requests: Mutex<Vec<AnalysisRequest>>,
        gate: Mutex<Option<std::sync::mpsc::Receiver<()>>>,
    }

    impl FakeClient {
        fn new(outcome: Result<AnalysisResult, SubmitError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
                gate: Mutex::new(None),
            })
        }

        fn gated(
            outcome: Result<AnalysisResult, SubmitError>,
        ) -> (Arc<Self>, std::sync::mpsc::Sender<()>) {
            let (tx, rx) = std::sync::mpsc::channel();
            let client = Self::new(outcome);
            *client.gate.lock().unwrap() = Some(rx);
            (client, tx)
        }
    }

    #[async_trait::async_trait]
    impl AnalysisClient for FakeClient {
        async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.recv_timeout(WAIT);
            }
            self.outcome.clone()
        }
    }

    fn controller(client: Arc<FakeClient>) -> FormController<HeadlessPage> {
        let engine = EngineHandle::with_client(client).expect("engine");
        FormController::attach(HeadlessPage::with_all_elements(), engine).expect("attach")
    }

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn element(controller: &FormController<HeadlessPage>, id: ElementId) -> &ElementState {
        controller.page().element(id).expect("element present")
    }

    #[test]
    fn attach_requires_form_and_both_inputs() {
        for missing in ElementId::REQUIRED {
            let ids: Vec<_> = ElementId::ALL
                .into_iter()
                .filter(|id| *id != missing)
                .collect();
            let engine = EngineHandle::with_client(FakeClient::new(Ok(AnalysisResult::default())))
                .expect("engine");
            let err = FormController::attach(HeadlessPage::with_elements(&ids), engine)
                .err()
                .expect("attach should fail");
            assert_eq!(err, AttachError::MissingElement(missing));
        }
    }

    #[test]
    fn attach_hides_spinner_and_results() {
        let controller = controller(FakeClient::new(Ok(AnalysisResult::default())));
        assert!(!element(&controller, ElementId::LoadingSpinner).visible);
        assert!(!element(&controller, ElementId::ResultsContainer).visible);
        assert!(element(&controller, ElementId::SubmitButton).enabled);
    }

    #[test]
    fn rejected_file_clears_the_input() {
        let mut controller = controller(FakeClient::new(Ok(AnalysisResult::default())));
        controller.validate_resume_file(Some(SelectedFile::new("cv.rtf", "application/rtf", vec![1])));

        assert_eq!(element(&controller, ElementId::ResumeInput).value_clears, 1);
        let alerts = &element(&controller, ElementId::AlertContainer).html;
        assert!(alerts.contains("alert-error"));
        assert!(alerts.contains("Invalid file type."));
        assert!(controller.state().resume().is_none());
    }

    #[test]
    fn oversized_file_clears_the_input() {
        let mut controller = controller(FakeClient::new(Ok(AnalysisResult::default())));
        let mut file = pdf("big.pdf");
        file.size = MAX_RESUME_BYTES + 1;
        controller.validate_resume_file(Some(file));
        assert_eq!(element(&controller, ElementId::ResumeInput).value_clears, 1);
        assert!(element(&controller, ElementId::AlertContainer)
            .html
            .contains("File size exceeds 5MB limit."));
    }

    #[test]
    fn successful_submission_renders_results() {
        let result = AnalysisResult {
            match_score: Some(72.0),
            missing_keywords: Some(vec!["Kubernetes".to_string(), "SQL".to_string()]),
            ..AnalysisResult::default()
        };
        let client = FakeClient::new(Ok(result));
        let mut controller = controller(client.clone());

        controller.validate_resume_file(Some(pdf("cv.pdf")));
        controller.set_job_description("Rust developer for payments platform");
        assert_eq!(controller.validate_form_inputs(), Ok(()));
        controller.handle_submit();
        assert!(controller.wait_for_submission(WAIT));

        let results = element(&controller, ElementId::ResultsContainer);
        assert!(results.visible);
        assert_eq!(results.scrolls, 1);
        assert!(results.html.contains("72%"));
        assert!(results.html.contains("<span class=\"keyword-badge\">SQL</span>"));
        assert!(!results.html.contains("Skills Analysis"));
        assert_eq!(
            controller.view().results.unwrap().kinds(),
            vec![SectionKind::Score, SectionKind::MissingKeywords]
        );

        let alerts = &element(&controller, ElementId::AlertContainer).html;
        assert!(alerts.contains(ANALYSIS_SUCCEEDED));
        assert!(!element(&controller, ElementId::LoadingSpinner).visible);
        assert!(element(&controller, ElementId::SubmitButton).enabled);

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].file_name, "cv.pdf");
        assert_eq!(requests[0].mime_type, "application/pdf");
        assert_eq!(requests[0].job_description, "Rust developer for payments platform");
    }

    #[test]
    fn server_error_message_reaches_the_alert() {
        let client = FakeClient::new(Err(SubmitError {
            kind: FailureKind::HttpStatus(400),
            message: "Unsupported file".to_string(),
        }));
        let mut controller = controller(client);
        controller.validate_resume_file(Some(pdf("cv.pdf")));
        controller.set_job_description("A long enough job description");
        controller.handle_submit();
        assert!(controller.wait_for_submission(WAIT));

        let alerts: Vec<_> = controller
            .state()
            .alerts()
            .iter()
            .map(|alert| (alert.message.clone(), alert.severity))
            .collect();
        assert_eq!(alerts, vec![("Unsupported file".to_string(), Severity::Error)]);
        assert!(!element(&controller, ElementId::ResultsContainer).visible);
        assert!(element(&controller, ElementId::SubmitButton).enabled);
    }

    #[test]
    fn second_submit_while_pending_makes_no_second_call() {
        let (client, release) = FakeClient::gated(Ok(AnalysisResult::default()));
        let mut controller = controller(client.clone());
        controller.validate_resume_file(Some(pdf("cv.pdf")));
        controller.set_job_description("Backend engineer, Rust, Postgres");

        controller.handle_submit();
        assert!(!element(&controller, ElementId::SubmitButton).enabled);
        assert!(element(&controller, ElementId::LoadingSpinner).visible);
        controller.handle_submit();

        release.send(()).unwrap();
        assert!(controller.wait_for_submission(WAIT));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_inputs_never_reach_the_engine() {
        let client = FakeClient::new(Ok(AnalysisResult::default()));
        let mut controller = controller(client.clone());
        controller.set_job_description("too short");
        controller.handle_submit();

        assert_eq!(
            controller.validate_form_inputs(),
            Err(InputError::MissingResume)
        );
        assert!(element(&controller, ElementId::AlertContainer)
            .html
            .contains("Please upload a resume file."));
        assert!(!element(&controller, ElementId::LoadingSpinner).visible);
        assert!(controller.wait_for_submission(Duration::ZERO));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn success_alert_expires_and_close_removes_one() {
        let client = FakeClient::new(Ok(AnalysisResult::default()));
        let mut controller =
            controller(client).with_success_alert_ttl(Duration::from_millis(20));

        let warning = controller.show_alert("heads up", Severity::Warning);
        let success = controller.show_alert("done", Severity::Success);
        assert!(success > warning);

        let deadline = Instant::now() + WAIT;
        while controller.state().alerts().len() > 1 && Instant::now() < deadline {
            controller.pump();
            std::thread::sleep(Duration::from_millis(5));
        }
        let ids: Vec<_> = controller.state().alerts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![warning]);

        controller.dismiss_alert(warning);
        assert!(element(&controller, ElementId::AlertContainer).html.is_empty());
    }

    #[test]
    fn optional_elements_may_be_missing() {
        let engine = EngineHandle::with_client(FakeClient::new(Ok(AnalysisResult {
            match_score: Some(50.0),
            ..AnalysisResult::default()
        })))
        .expect("engine");
        let mut controller =
            FormController::attach(HeadlessPage::with_elements(&ElementId::REQUIRED), engine)
                .expect("attach");

        controller.validate_resume_file(Some(pdf("cv.pdf")));
        controller.set_job_description("Data engineer with Spark");
        controller.handle_submit();
        assert!(controller.wait_for_submission(WAIT));
        assert!(controller.view().results_visible);
        assert!(controller.page().element(ElementId::ResultsContainer).is_none());
    }

    #[test]
    fn clear_helpers_reset_page_areas() {
        let mut controller = controller(FakeClient::new(Ok(AnalysisResult {
            match_score: Some(91.0),
            ..AnalysisResult::default()
        })));
        controller.validate_resume_file(Some(pdf("cv.pdf")));
        controller.set_job_description("Staff engineer, observability");
        controller.handle_submit();
        assert!(controller.wait_for_submission(WAIT));

        controller.clear_results();
        let results = element(&controller, ElementId::ResultsContainer);
        assert!(!results.visible);
        assert!(results.html.is_empty());

        controller.clear_alert();
        assert!(element(&controller, ElementId::AlertContainer).html.is_empty());
        assert_eq!(
            FormController::<HeadlessPage>::escape_html("<a href='x'>"),
            "&lt;a href=&#039;x&#039;&gt;"
        );
    }
}
