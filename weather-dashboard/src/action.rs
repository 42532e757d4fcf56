//! UI actions emitted by components

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Search text changed (an empty string clears the search)
    SearchInput(String),
    /// Search box submitted; moves focus to the candidate list
    SearchSubmit,
    /// Highlight a candidate
    ListSelect(usize),
    /// Switch the dashboard to a candidate's coordinates
    CityConfirm(usize),
    /// Cycle focus between search box and list
    FocusNext,
    Quit,
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::SearchInput(_) => "SearchInput",
            UiAction::SearchSubmit => "SearchSubmit",
            UiAction::ListSelect(_) => "ListSelect",
            UiAction::CityConfirm(_) => "CityConfirm",
            UiAction::FocusNext => "FocusNext",
            UiAction::Quit => "Quit",
        }
    }
}
