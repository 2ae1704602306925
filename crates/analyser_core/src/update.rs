use crate::{check_resume_file, render_results, AppState, Effect, Msg, Severity};

pub const ANALYSIS_SUCCEEDED: &str = "Resume analysis completed successfully!";
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match msg {
        Msg::ResumeSelected(None) => {
            state.set_resume(None);
            state.clear_alerts();
        }
        Msg::ResumeSelected(Some(file)) => match check_resume_file(&file) {
            Ok(()) => {
                let message = format!("File \"{}\" selected successfully.", file.name);
                state.set_resume(Some(file));
                effects.extend(state.push_alert(message, Severity::Success));
            }
            Err(rejection) => {
                state.set_resume(None);
                effects.extend(state.push_alert(rejection.message(), Severity::Error));
                effects.push(Effect::ClearResumeInput);
            }
        },
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
        }
        Msg::SubmitClicked => {
            // The submit control is disabled while a request is in flight,
            // so the click never reaches the form.
            if state.is_submitting() {
                return (state, effects);
            }
            state.clear_alerts();
            state.clear_results();

            if let Err(invalid) = state.validate_inputs() {
                effects.extend(state.push_alert(invalid.message(), Severity::Error));
                return (state, effects);
            }

            let Some(resume) = state.resume().cloned() else {
                return (state, effects);
            };
            let job_description = state.job_description().to_owned();
            let request_id = state.begin_request();
            effects.push(Effect::SubmitAnalysis {
                request_id,
                resume,
                job_description,
            });
        }
        Msg::AnalysisFinished {
            request_id,
            outcome,
        } => {
            if state.in_flight() != Some(request_id) {
                return (state, effects);
            }
            state.finish_request();
            match outcome {
                Ok(result) => {
                    state.set_results(render_results(&result));
                    effects.push(Effect::ScrollResultsIntoView);
                    effects.extend(state.push_alert(ANALYSIS_SUCCEEDED, Severity::Success));
                }
                Err(message) => {
                    let message = if message.trim().is_empty() {
                        GENERIC_FAILURE.to_owned()
                    } else {
                        message
                    };
                    effects.extend(state.push_alert(message, Severity::Error));
                }
            }
        }
        Msg::ShowAlert { message, severity } => {
            effects.extend(state.push_alert(message, severity));
        }
        Msg::AlertDismissed(id) | Msg::AlertExpired(id) => {
            state.remove_alert(id);
        }
        Msg::ClearAlerts => state.clear_alerts(),
        Msg::ClearResults => state.clear_results(),
        Msg::NoOp => {}
    }

    (state, effects)
}
