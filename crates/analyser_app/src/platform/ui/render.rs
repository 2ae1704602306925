use analyser_core::{Alert, AppViewModel};

use super::page::{ElementId, PageCommand};

pub fn render(view: &AppViewModel) -> Vec<PageCommand> {
    let alerts_html: String = view.alerts.iter().map(Alert::to_html).collect();
    let results_html = view
        .results
        .as_ref()
        .map(|results| results.to_html())
        .unwrap_or_default();

    vec![
        PageCommand::SetInnerHtml {
            element: ElementId::AlertContainer,
            html: alerts_html,
        },
        PageCommand::SetInnerHtml {
            element: ElementId::ResultsContainer,
            html: results_html,
        },
        PageCommand::SetVisible {
            element: ElementId::ResultsContainer,
            visible: view.results_visible,
        },
        PageCommand::SetVisible {
            element: ElementId::LoadingSpinner,
            visible: view.spinner_visible,
        },
        PageCommand::SetEnabled {
            element: ElementId::SubmitButton,
            enabled: view.submit_enabled,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyser_core::{update, AppState, Msg, Severity};

    #[test]
    fn initial_view_hides_spinner_and_results() {
        let commands = render(&AppState::new().view());
        assert!(commands.contains(&PageCommand::SetVisible {
            element: ElementId::LoadingSpinner,
            visible: false,
        }));
        assert!(commands.contains(&PageCommand::SetVisible {
            element: ElementId::ResultsContainer,
            visible: false,
        }));
        assert!(commands.contains(&PageCommand::SetEnabled {
            element: ElementId::SubmitButton,
            enabled: true,
        }));
    }

    #[test]
    fn alerts_render_in_order() {
        let (state, _) = update(
            AppState::new(),
            Msg::ShowAlert {
                message: "first".to_string(),
                severity: Severity::Warning,
            },
        );
        let (state, _) = update(
            state,
            Msg::ShowAlert {
                message: "second".to_string(),
                severity: Severity::Info,
            },
        );
        let html = match &render(&state.view())[0] {
            PageCommand::SetInnerHtml { html, .. } => html.clone(),
            other => panic!("unexpected command {other:?}"),
        };
        let first = html.find("alert-warning").unwrap();
        let second = html.find("alert-info").unwrap();
        assert!(first < second);
    }
}
