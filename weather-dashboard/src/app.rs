//! Dashboard app: maps input to provider calls and draws snapshots
//!
//! The app is a descendant consumer of the provider. It reads through a
//! [`WeatherContext`] and changes cities through a [`WeatherContextUpdate`],
//! so the list never needs more than the navigation handle.
//!
//! Loop:
//! 1. Key event -> focused component -> [`UiAction`]s
//! 2. `UiAction` -> local UI state or a provider call
//! 3. Provider publishes a snapshot -> redraw

use std::io;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use weather_context::{
    ContextError, CoordsSetter, Middleware, Slice, WeatherContext, WeatherContextUpdate,
    WeatherProvider, WeatherState,
};

use crate::action::UiAction;
use crate::components::{
    CityList, CityListProps, Component, HelpBar, HelpBarProps, SearchInput, SearchInputProps,
    SlicePanel, SlicePanelProps,
};
use crate::event::{spawn_event_poller, EventKind, PollerConfig};
use crate::summary::summarize;

const HINTS: &[(&str, &str)] = &[
    ("Tab", "focus"),
    ("Enter", "select"),
    ("Ctrl+U", "clear"),
    ("Esc", "quit"),
];

/// Which component receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::List,
            Focus::List => Focus::Search,
        }
    }
}

pub fn panel_title(slice: Slice) -> &'static str {
    match slice {
        Slice::Forecast => "Forecast",
        Slice::AirQuality => "Air Quality",
        Slice::FiveDayForecast => "Five-Day Forecast",
        Slice::UvIndex => "UV Index",
    }
}

pub struct App {
    ctx: WeatherContext,
    nav: WeatherContextUpdate,
    /// Text in the search box; the provider's copy can lag a keystroke behind
    query: String,
    focus: Focus,
    selected: usize,
    should_quit: bool,
    search: SearchInput,
    list: CityList,
    panel: SlicePanel,
    help: HelpBar,
}

impl App {
    pub fn new(ctx: WeatherContext) -> Self {
        let nav = ctx.update_context();
        let query = ctx.input_value();
        Self {
            ctx,
            nav,
            query,
            focus: Focus::default(),
            selected: 0,
            should_quit: false,
            search: SearchInput::new(),
            list: CityList::new(),
            panel: SlicePanel,
            help: HelpBar,
        }
    }

    pub fn context(&self) -> &WeatherContext {
        &self.ctx
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn candidate_names(&self) -> Vec<String> {
        self.ctx
            .locations()
            .iter()
            .map(|location| location.display_name())
            .collect()
    }

    /// Turn an input event into UI actions
    pub fn map_event(&mut self, event: &EventKind) -> Vec<UiAction> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![UiAction::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![UiAction::Quit]
            }
            KeyCode::Tab | KeyCode::BackTab => return vec![UiAction::FocusNext],
            _ => {}
        }

        match self.focus {
            Focus::Search => {
                let props = SearchInputProps {
                    value: &self.query,
                    placeholder: "",
                    is_focused: true,
                    on_change: UiAction::SearchInput,
                    on_submit: |_| UiAction::SearchSubmit,
                };
                self.search.handle_event(event, props).into_iter().collect()
            }
            Focus::List => {
                let items = self.candidate_names();
                let props = CityListProps {
                    items: &items,
                    selected: self.selected,
                    is_focused: true,
                    on_select: UiAction::ListSelect,
                    on_confirm: UiAction::CityConfirm,
                };
                self.list.handle_event(event, props).into_iter().collect()
            }
        }
    }

    /// Apply one UI action
    ///
    /// Returns whether local UI state changed. Provider-side changes show
    /// up later as a new snapshot.
    pub fn apply(&mut self, action: UiAction) -> Result<bool, ContextError> {
        tracing::debug!(action = action.name(), "UI action");

        match action {
            UiAction::SearchInput(value) => {
                self.ctx.handle_input(value.clone())?;
                self.query = value;
                self.selected = 0;
                Ok(true)
            }
            UiAction::SearchSubmit => {
                self.focus = Focus::List;
                Ok(true)
            }
            UiAction::ListSelect(index) => {
                self.selected = index;
                Ok(true)
            }
            UiAction::CityConfirm(index) => {
                let Some(location) = self.ctx.locations().into_iter().nth(index) else {
                    return Ok(false);
                };
                tracing::info!(city = %location.display_name(), coords = %location.coords(), "Switching city");
                self.nav.set_active_city_coords(location.coords())?;
                self.selected = index;
                Ok(true)
            }
            UiAction::FocusNext => {
                self.focus = self.focus.next();
                Ok(true)
            }
            UiAction::Quit => {
                self.should_quit = true;
                Ok(false)
            }
        }
    }

    /// Map and apply an event; returns whether a redraw is needed
    pub fn handle_event(&mut self, event: &EventKind) -> Result<bool, ContextError> {
        let mut needs_render = matches!(event, EventKind::Resize(..));
        for action in self.map_event(event) {
            needs_render |= self.apply(action)?;
        }
        Ok(needs_render)
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let state = self.ctx.snapshot();
        let area = frame.area();

        let [search_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let search_props = SearchInputProps {
            value: &self.query,
            placeholder: "Search for a city...",
            is_focused: self.focus == Focus::Search,
            on_change: UiAction::SearchInput,
            on_submit: |_| UiAction::SearchSubmit,
        };
        self.search.render(frame, search_area, search_props);

        let [list_area, panels_area] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .areas(body_area);

        let items: Vec<String> = state
            .locations()
            .iter()
            .map(|location| location.display_name())
            .collect();
        let list_props = CityListProps {
            items: &items,
            selected: self.selected,
            is_focused: self.focus == Focus::List,
            on_select: UiAction::ListSelect,
            on_confirm: UiAction::CityConfirm,
        };
        self.list.render(frame, list_area, list_props);

        self.render_panels(frame, panels_area, &state);

        let status = state.active_city_coords.to_string();
        let help_props = HelpBarProps {
            hints: HINTS,
            status: &status,
        };
        self.help.render(frame, help_area, help_props);
    }

    fn render_panels(&mut self, frame: &mut Frame, area: Rect, state: &WeatherState) {
        let [top, bottom] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
        let halves = [Constraint::Percentage(50), Constraint::Percentage(50)];
        let [a, b] = Layout::horizontal(halves).areas(top);
        let [c, d] = Layout::horizontal(halves).areas(bottom);

        for (slice, panel_area) in Slice::ALL.into_iter().zip([a, b, c, d]) {
            let lines = summarize(slice, state.slice(slice));
            let props = SlicePanelProps {
                title: panel_title(slice),
                lines: &lines,
            };
            self.panel.render(frame, panel_area, props);
        }
    }
}

/// Run the provider and the dashboard until the user quits
///
/// The provider is spawned onto the runtime and shut down (pending fetches
/// aborted) before this returns.
pub async fn run_app<B, M>(
    terminal: &mut Terminal<B>,
    provider: WeatherProvider<M>,
    poller: PollerConfig,
) -> io::Result<WeatherState>
where
    B: Backend,
    M: Middleware + 'static,
{
    let mut app = App::new(provider.context());
    let mut updates = provider.context();
    let shutdown = provider.shutdown_token();
    let provider_handle = tokio::spawn(provider.run());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(event_tx, poller, cancel_token.clone());

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| app.render(frame))?;
            should_render = false;
        }

        tokio::select! {
            Some(event) = event_rx.recv() => {
                match app.handle_event(&event) {
                    Ok(needs_render) => should_render = needs_render,
                    Err(e) => {
                        tracing::error!(error = %e, "Provider stopped unexpectedly");
                        break;
                    }
                }
                if app.should_quit() {
                    break;
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    tracing::error!("Provider stopped unexpectedly");
                    break;
                }
                should_render = true;
            }

            else => break,
        }
    }

    cancel_token.cancel();
    shutdown.cancel();
    provider_handle.await.map_err(io::Error::other)
}
