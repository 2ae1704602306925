use std::time::Duration;

use crate::{AlertId, RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reset the file input so the rejected file is no longer selected.
    ClearResumeInput,
    /// POST the resume and job description to the analysis endpoint.
    SubmitAnalysis {
        request_id: RequestId,
        resume: SelectedFile,
        job_description: String,
    },
    /// Send `Msg::AlertExpired(alert_id)` back after `after`.
    ScheduleAlertExpiry { alert_id: AlertId, after: Duration },
    ScrollResultsIntoView,
}
