use crate::{Alert, ResultsView};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub alerts: Vec<Alert>,
    pub results: Option<ResultsView>,
    pub results_visible: bool,
    pub spinner_visible: bool,
    pub submit_enabled: bool,
    pub resume_name: Option<String>,
    pub dirty: bool,
}
