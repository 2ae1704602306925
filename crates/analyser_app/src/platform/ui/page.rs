//! The host page as the controller sees it.
//!
//! A browser host maps [`PageCommand`]s onto DOM calls; [`HeadlessPage`]
//! records them in memory for the command-line adapter and for tests.
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    Form,
    ResumeInput,
    JobDescriptionInput,
    SubmitButton,
    ResultsContainer,
    AlertContainer,
    LoadingSpinner,
}

impl ElementId {
    pub const ALL: [ElementId; 7] = [
        ElementId::Form,
        ElementId::ResumeInput,
        ElementId::JobDescriptionInput,
        ElementId::SubmitButton,
        ElementId::ResultsContainer,
        ElementId::AlertContainer,
        ElementId::LoadingSpinner,
    ];

    /// Without these the controller cannot attach.
    pub const REQUIRED: [ElementId; 3] = [
        ElementId::Form,
        ElementId::ResumeInput,
        ElementId::JobDescriptionInput,
    ];

    /// Element id in the stock host page markup.
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::Form => "resumeForm",
            ElementId::ResumeInput => "resumeInput",
            ElementId::JobDescriptionInput => "jobDescriptionInput",
            ElementId::SubmitButton => "submitBtn",
            ElementId::ResultsContainer => "resultsContainer",
            ElementId::AlertContainer => "alertContainer",
            ElementId::LoadingSpinner => "loadingSpinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    SetInnerHtml { element: ElementId, html: String },
    SetVisible { element: ElementId, visible: bool },
    SetEnabled { element: ElementId, enabled: bool },
    ClearValue { element: ElementId },
    /// Smooth scroll so the element's top is in view.
    ScrollIntoView { element: ElementId },
}

impl PageCommand {
    pub fn target(&self) -> ElementId {
        match self {
            PageCommand::SetInnerHtml { element, .. }
            | PageCommand::SetVisible { element, .. }
            | PageCommand::SetEnabled { element, .. }
            | PageCommand::ClearValue { element }
            | PageCommand::ScrollIntoView { element } => *element,
        }
    }
}

pub trait Page {
    fn has_element(&self, element: ElementId) -> bool;

    /// Only called for elements `has_element` reports as present.
    fn apply(&mut self, command: PageCommand);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub html: String,
    pub visible: bool,
    pub enabled: bool,
    pub value_clears: usize,
    pub scrolls: usize,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            html: String::new(),
            visible: true,
            enabled: true,
            value_clears: 0,
            scrolls: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    elements: BTreeMap<ElementId, ElementState>,
}

impl HeadlessPage {
    pub fn with_all_elements() -> Self {
        Self::with_elements(&ElementId::ALL)
    }

    pub fn with_elements(ids: &[ElementId]) -> Self {
        Self {
            elements: ids
                .iter()
                .map(|id| (*id, ElementState::default()))
                .collect(),
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }
}

impl Page for HeadlessPage {
    fn has_element(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    fn apply(&mut self, command: PageCommand) {
        let Some(state) = self.elements.get_mut(&command.target()) else {
            return;
        };
        match command {
            PageCommand::SetInnerHtml { html, .. } => state.html = html,
            PageCommand::SetVisible { visible, .. } => state.visible = visible,
            PageCommand::SetEnabled { enabled, .. } => state.enabled = enabled,
            PageCommand::ClearValue { .. } => state.value_clears += 1,
            PageCommand::ScrollIntoView { .. } => state.scrolls += 1,
        }
    }
}
