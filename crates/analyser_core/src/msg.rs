use crate::{AlertId, AnalysisResult, RequestId, SelectedFile, Severity};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The resume input changed. `None` means the selection was cleared.
    ResumeSelected(Option<SelectedFile>),
    /// User edited the job description text.
    JobDescriptionChanged(String),
    /// User submitted the form.
    SubmitClicked,
    /// The engine finished a submission. `Err` carries the alert text.
    AnalysisFinished {
        request_id: RequestId,
        outcome: Result<AnalysisResult, String>,
    },
    /// Host code asked for a banner directly.
    ShowAlert { message: String, severity: Severity },
    /// User clicked a banner's close control.
    AlertDismissed(AlertId),
    /// A success banner's timer fired.
    AlertExpired(AlertId),
    ClearAlerts,
    ClearResults,
    /// Fallback for placeholder wiring.
    NoOp,
}
