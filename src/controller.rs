//! Query-lifecycle state machine.
//!
//! The controller never performs I/O. A successful submit hands back a
//! [`SearchTicket`]; whoever runs the request reports the outcome through
//! [`SearchController::on_complete`].

use crate::data_models::{Query, SearchResult};
use crate::error::{Result, SearchError};
use crate::render;
use crate::shortcut::{self, KeyPress};
use crate::view::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading { query: Query },
    Results { query: Query, results: Vec<SearchResult> },
    NoResults { query: Query },
    Error { query: Query },
}

/// Proof that a search was started. Carries the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: Query,
}

impl SearchTicket {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Drop a response when the search it belongs to was cleared while the
    /// request was in flight. When false the late response is rendered.
    pub discard_superseded: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            discard_superseded: true,
        }
    }
}

pub struct SearchController<V: View> {
    state: SearchState,
    view: V,
    input: String,
    focused: bool,
    in_flight: Option<u64>,
    generation: u64,
    options: ControllerOptions,
}

impl<V: View> SearchController<V> {
    pub fn new(mut view: V, options: ControllerOptions) -> SearchController<V> {
        view.replace_results(render::Fragment::empty());
        view.set_welcome_visible(true);
        view.set_spinner_visible(false);
        view.set_input_focused(false);
        SearchController {
            state: SearchState::Idle,
            view,
            input: String::new(),
            focused: false,
            in_flight: None,
            generation: 0,
            options,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Starts a search cycle. Blank queries and submits while a request is
    /// pending are rejected without touching state.
    pub fn on_submit(&mut self, raw: &str) -> Result<SearchTicket> {
        let query = Query::parse(raw)?;
        if self.in_flight.is_some() {
            return Err(SearchError::Busy);
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.state = SearchState::Loading {
            query: query.clone(),
        };
        self.view.set_spinner_visible(true);
        self.view.replace_results(render::render(&self.state));
        self.view.set_welcome_visible(false);

        tracing::debug!(query = %query, generation = self.generation, "search started");
        Ok(SearchTicket {
            generation: self.generation,
            query,
        })
    }

    /// Enter submits whatever is currently typed.
    pub fn on_key_down(&mut self, key: &KeyPress) -> Option<SearchTicket> {
        if !shortcut::is_submit_key(key) {
            return None;
        }
        let input = self.input.clone();
        match self.on_submit(&input) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                tracing::debug!("submit ignored: {e}");
                None
            }
        }
    }

    pub fn on_input_changed(&mut self, value: &str) {
        self.input = value.to_string();
        if value.trim().is_empty() && !self.region_is_empty() {
            self.clear();
        }
    }

    pub fn on_focus(&mut self) {
        self.focused = true;
        self.view.set_input_focused(true);
    }

    pub fn on_blur(&mut self) {
        self.focused = false;
        self.view.set_input_focused(false);
    }

    pub fn focus_input(&mut self) {
        self.view.focus_input();
    }

    /// Finishes the cycle the ticket belongs to. Loading always ends here,
    /// whatever the outcome.
    pub fn on_complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<SearchResult>>,
    ) {
        if self.in_flight != Some(ticket.generation) {
            tracing::warn!(
                generation = ticket.generation,
                "completion for a search that is not in flight"
            );
            return;
        }
        self.in_flight = None;
        self.view.set_spinner_visible(false);

        let superseded = ticket.generation != self.generation;
        if superseded && self.options.discard_superseded {
            tracing::debug!(query = %ticket.query, "discarding superseded response");
            if let Err(e) = outcome {
                tracing::error!(query = %ticket.query, "search error: {e}");
            }
            return;
        }

        let query = ticket.query;
        self.state = match outcome {
            Ok(results) if results.is_empty() => SearchState::NoResults { query },
            Ok(results) => SearchState::Results { query, results },
            Err(e) => {
                tracing::error!(query = %query, "search error: {e}");
                SearchState::Error { query }
            }
        };
        self.view.replace_results(render::render(&self.state));
        // Results and the welcome panel are never shown together.
        self.view.set_welcome_visible(false);
    }

    pub fn clear(&mut self) {
        if self.in_flight.is_some() {
            // Supersede the pending request.
            self.generation += 1;
        }
        self.state = SearchState::Idle;
        self.view.replace_results(render::Fragment::empty());
        self.view.set_welcome_visible(true);
    }

    fn region_is_empty(&self) -> bool {
        matches!(self.state, SearchState::Idle)
    }
}
