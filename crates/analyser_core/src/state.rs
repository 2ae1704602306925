use std::time::Duration;

use crate::view_model::AppViewModel;
use crate::{
    validate_form_inputs, AlertId, AlertList, Effect, InputError, ResultsView, SelectedFile,
    Severity, SUCCESS_ALERT_TTL,
};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    resume: Option<SelectedFile>,
    job_description: String,
    alerts: AlertList,
    results: Option<ResultsView>,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    success_alert_ttl: Duration,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            resume: None,
            job_description: String::new(),
            alerts: AlertList::default(),
            results: None,
            in_flight: None,
            next_request_id: 0,
            success_alert_ttl: SUCCESS_ALERT_TTL,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override how long success banners stay up.
    pub fn with_success_alert_ttl(mut self, ttl: Duration) -> Self {
        self.success_alert_ttl = ttl;
        self
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            alerts: self.alerts.iter().cloned().collect(),
            results: self.results.clone(),
            results_visible: self.results.is_some(),
            spinner_visible: self.in_flight.is_some(),
            submit_enabled: self.in_flight.is_none(),
            resume_name: self.resume.as_ref().map(|file| file.name.clone()),
            dirty: self.dirty,
        }
    }

    pub fn validate_inputs(&self) -> Result<(), InputError> {
        validate_form_inputs(self.resume.as_ref(), &self.job_description)
    }

    pub fn resume(&self) -> Option<&SelectedFile> {
        self.resume.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn alerts(&self) -> &AlertList {
        &self.alerts
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_resume(&mut self, resume: Option<SelectedFile>) {
        if self.resume != resume {
            self.resume = resume;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.mark_dirty();
        }
    }

    /// Appends a banner and returns the expiry effect for success alerts.
    pub(crate) fn push_alert(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
    ) -> Option<Effect> {
        let alert_id = self.alerts.push(message, severity);
        self.mark_dirty();
        (severity == Severity::Success).then_some(Effect::ScheduleAlertExpiry {
            alert_id,
            after: self.success_alert_ttl,
        })
    }

    pub(crate) fn remove_alert(&mut self, id: AlertId) {
        if self.alerts.remove(id) {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_alerts(&mut self) {
        if self.alerts.clear() {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_results(&mut self) {
        if self.results.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_results(&mut self, results: ResultsView) {
        self.results = Some(results);
        self.mark_dirty();
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        self.mark_dirty();
        self.next_request_id
    }

    pub(crate) fn finish_request(&mut self) {
        self.in_flight = None;
        self.mark_dirty();
    }
}
