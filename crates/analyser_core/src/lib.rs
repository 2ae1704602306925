//! Resume analyser core: pure state machine, validation and result rendering.
mod alerts;
mod analysis;
mod effect;
mod escape;
mod msg;
mod render;
mod state;
mod update;
mod validation;
mod view_model;

pub use alerts::{Alert, AlertId, AlertList, Severity, SUCCESS_ALERT_TTL};
pub use analysis::{AnalysisResult, EducationAnalysis, ExperienceAnalysis, SkillsAnalysis, Years};
pub use effect::Effect;
pub use escape::escape_html;
pub use msg::Msg;
pub use render::{
    display_score, render_results, ResultSection, ResultsView, ScoreBucket, SectionKind,
};
pub use state::{AppState, RequestId};
pub use update::{update, ANALYSIS_SUCCEEDED, GENERIC_FAILURE};
pub use validation::{
    check_resume_file, validate_form_inputs, FileRejection, InputError, SelectedFile,
    ACCEPTED_MIME_TYPES, MAX_JOB_DESCRIPTION_CHARS, MAX_RESUME_BYTES, MIN_JOB_DESCRIPTION_CHARS,
};
pub use view_model::AppViewModel;
