use analyser_core::{Effect, Msg, SelectedFile};
use analyser_engine::{AnalysisRequest, EngineEvent, EngineHandle};
use analyser_logging::{analyser_error, analyser_info};

use super::ui::page::{ElementId, PageCommand};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands IO effects to the engine and returns the page-side ones as commands.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<PageCommand> {
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis {
                    request_id,
                    resume,
                    job_description,
                } => {
                    analyser_info!(
                        "SubmitAnalysis request_id={} file={} size={} text_len={}",
                        request_id,
                        resume.name,
                        resume.size,
                        job_description.chars().count()
                    );
                    self.engine
                        .submit(request_id, to_request(resume, job_description));
                }
                Effect::ScheduleAlertExpiry { alert_id, after } => {
                    self.engine.schedule_alert_expiry(alert_id, after);
                }
                Effect::ClearResumeInput => commands.push(PageCommand::ClearValue {
                    element: ElementId::ResumeInput,
                }),
                Effect::ScrollResultsIntoView => commands.push(PageCommand::ScrollIntoView {
                    element: ElementId::ResultsContainer,
                }),
            }
        }
        commands
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }
}

fn to_request(resume: SelectedFile, job_description: String) -> AnalysisRequest {
    AnalysisRequest {
        file_name: resume.name,
        mime_type: resume.mime_type,
        content: resume.content,
        job_description,
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted { request_id, result } => Msg::AnalysisFinished {
            request_id,
            outcome: result.map_err(|err| {
                analyser_error!("request {} failed ({}): {}", request_id, err.kind, err);
                err.message
            }),
        },
        EngineEvent::AlertExpired { alert_id } => Msg::AlertExpired(alert_id),
    }
}
