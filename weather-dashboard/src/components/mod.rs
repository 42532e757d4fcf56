//! Dashboard components

mod city_list;
mod help_bar;
mod search_input;
mod slice_panel;

pub use city_list::{CityList, CityListProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use search_input::{SearchInput, SearchInputProps};
pub use slice_panel::{SlicePanel, SlicePanelProps};

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A pure UI component that renders based on props and emits actions
///
/// Props carry everything needed to render, including focus. `handle_event`
/// returns actions and never touches the provider; the app decides what an
/// action means. Local UI state such as a cursor position may live in
/// `&mut self`.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to apply
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)` or a
    /// `Vec`. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
