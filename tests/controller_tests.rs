use wikisearch::controller::{ControllerOptions, SearchController, SearchState};
use wikisearch::data_models::{Query, SearchResult};
use wikisearch::error::SearchError;
use wikisearch::render::{error_panel, loading_skeletons, no_results_panel};
use wikisearch::shortcut::KeyPress;
use wikisearch::view::HtmlView;

mod test_helpers {
    use super::*;

    pub fn controller() -> SearchController<HtmlView> {
        SearchController::new(HtmlView::default(), ControllerOptions::default())
    }

    pub fn controller_keeping_superseded() -> SearchController<HtmlView> {
        SearchController::new(
            HtmlView::default(),
            ControllerOptions {
                discard_superseded: false,
            },
        )
    }

    pub fn results(count: usize) -> Vec<SearchResult> {
        (0..count)
            .map(|i| {
                SearchResult::new(
                    format!("Article {i}"),
                    format!("https://en.wikipedia.org/wiki/Article_{i}"),
                    format!("Description number {i}"),
                )
            })
            .collect()
    }
}

use test_helpers::*;

#[test]
fn test_initial_state_shows_welcome() {
    let controller = controller();
    assert_eq!(controller.state(), &SearchState::Idle);
    assert!(!controller.is_loading());

    let view = controller.view();
    assert!(view.welcome_visible);
    assert!(!view.spinner_visible);
    assert!(view.results_html.is_empty());
}

#[test]
fn test_submit_enters_loading() {
    let mut controller = controller();
    let ticket = controller.on_submit("  rust  ").unwrap();

    assert_eq!(ticket.query().as_str(), "rust");
    assert!(controller.is_loading());
    assert_eq!(
        controller.state(),
        &SearchState::Loading {
            query: Query::parse("rust").unwrap()
        }
    );

    let view = controller.view();
    assert!(view.spinner_visible);
    assert!(!view.welcome_visible);
    assert_eq!(view.results_html, loading_skeletons());
}

#[test]
fn test_blank_submit_is_ignored() {
    let mut controller = controller();
    let renders = controller.view().renders;

    assert!(matches!(
        controller.on_submit("   "),
        Err(SearchError::InvalidInput)
    ));
    assert_eq!(controller.state(), &SearchState::Idle);
    assert!(!controller.is_loading());
    assert_eq!(controller.view().renders, renders);
}

#[test]
fn test_second_submit_while_pending_is_busy() {
    let mut controller = controller();
    let first = controller.on_submit("rust").unwrap();
    let renders = controller.view().renders;

    assert!(matches!(controller.on_submit("python"), Err(SearchError::Busy)));
    assert_eq!(
        controller.state(),
        &SearchState::Loading {
            query: first.query().clone()
        }
    );
    assert_eq!(controller.view().renders, renders);
}

#[test]
fn test_success_shows_results() {
    let mut controller = controller();
    let ticket = controller.on_submit("rust").unwrap();
    controller.on_complete(ticket, Ok(results(3)));

    assert!(!controller.is_loading());
    match controller.state() {
        SearchState::Results { query, results } => {
            assert_eq!(query.as_str(), "rust");
            assert_eq!(results.len(), 3);
            assert_eq!(results[0].title, "Article 0");
        }
        other => panic!("unexpected state {other:?}"),
    }

    let view = controller.view();
    assert!(!view.spinner_visible);
    assert!(!view.welcome_visible);
    assert!(view.results_html.as_str().contains("Found <strong>3</strong> results"));
}

#[test]
fn test_empty_success_shows_no_results() {
    let mut controller = controller();
    let ticket = controller.on_submit("qwertyuiop").unwrap();
    controller.on_complete(ticket, Ok(Vec::new()));

    let query = Query::parse("qwertyuiop").unwrap();
    assert_eq!(
        controller.state(),
        &SearchState::NoResults {
            query: query.clone()
        }
    );
    assert_eq!(controller.view().results_html, no_results_panel(&query));
}

#[test]
fn test_failure_shows_error_and_stops_loading() {
    let mut controller = controller();
    let ticket = controller.on_submit("rust").unwrap();
    controller.on_complete(ticket, Err(SearchError::Status(500)));

    assert!(!controller.is_loading());
    assert!(matches!(controller.state(), SearchState::Error { .. }));

    let view = controller.view();
    assert!(!view.spinner_visible);
    assert_eq!(view.results_html, error_panel());
    assert!(!view.results_html.as_str().contains("500"));
}

#[test]
fn test_can_search_again_after_completion() {
    let mut controller = controller();
    let ticket = controller.on_submit("rust").unwrap();
    controller.on_complete(ticket, Err(SearchError::Status(502)));

    let ticket = controller.on_submit("rust").unwrap();
    assert!(controller.is_loading());
    controller.on_complete(ticket, Ok(results(1)));
    assert!(matches!(controller.state(), SearchState::Results { .. }));
}

#[test]
fn test_enter_submits_current_input() {
    let mut controller = controller();
    controller.on_input_changed("ferris");

    assert!(controller.on_key_down(&KeyPress::new("a")).is_none());
    let ticket = controller.on_key_down(&KeyPress::new("Enter")).unwrap();
    assert_eq!(ticket.query().as_str(), "ferris");

    // Pressing Enter again while loading does nothing.
    assert!(controller.on_key_down(&KeyPress::new("Enter")).is_none());
}

#[test]
fn test_enter_on_blank_input_does_nothing() {
    let mut controller = controller();
    controller.on_input_changed("   ");
    assert!(controller.on_key_down(&KeyPress::new("Enter")).is_none());
    assert_eq!(controller.state(), &SearchState::Idle);
}

#[test]
fn test_emptying_input_clears_results() {
    let mut controller = controller();
    controller.on_input_changed("rust");
    let ticket = controller.on_key_down(&KeyPress::new("Enter")).unwrap();
    controller.on_complete(ticket, Ok(results(2)));

    controller.on_input_changed("rus");
    assert!(matches!(controller.state(), SearchState::Results { .. }));

    controller.on_input_changed("");
    assert_eq!(controller.state(), &SearchState::Idle);
    let view = controller.view();
    assert!(view.results_html.is_empty());
    assert!(view.welcome_visible);
}

#[test]
fn test_emptying_input_while_idle_renders_nothing() {
    let mut controller = controller();
    let renders = controller.view().renders;
    controller.on_input_changed("");
    assert_eq!(controller.view().renders, renders);
}

#[test]
fn test_cleared_search_discards_late_response() {
    let mut controller = controller();
    let ticket = controller.on_submit("rust").unwrap();
    controller.on_input_changed("");

    assert_eq!(controller.state(), &SearchState::Idle);
    // The request is still pending, so the guard still holds.
    assert!(controller.is_loading());
    assert!(matches!(controller.on_submit("go"), Err(SearchError::Busy)));

    controller.on_complete(ticket, Ok(results(3)));
    assert!(!controller.is_loading());
    assert_eq!(controller.state(), &SearchState::Idle);

    let view = controller.view();
    assert!(!view.spinner_visible);
    assert!(view.welcome_visible);
    assert!(view.results_html.is_empty());
}

#[test]
fn test_cleared_search_can_keep_late_response() {
    let mut controller = controller_keeping_superseded();
    let ticket = controller.on_submit("rust").unwrap();
    controller.on_input_changed("");
    controller.on_complete(ticket, Ok(results(3)));

    assert!(!controller.is_loading());
    assert!(matches!(controller.state(), SearchState::Results { .. }));
    assert!(!controller.view().welcome_visible);
}

#[test]
fn test_unknown_ticket_is_ignored() {
    let mut first = controller();
    let stray = first.on_submit("stray").unwrap();

    let mut controller = controller();
    controller.on_complete(stray, Ok(results(1)));
    assert_eq!(controller.state(), &SearchState::Idle);
    assert!(!controller.is_loading());
}

#[test]
fn test_focus_and_blur_toggle_decoration() {
    let mut controller = controller();
    controller.on_focus();
    assert!(controller.is_focused());
    assert!(controller.view().input_focused);

    controller.on_blur();
    assert!(!controller.is_focused());
    assert!(!controller.view().input_focused);
}

#[test]
fn test_focus_input_requests_focus() {
    let mut controller = controller();
    controller.focus_input();
    controller.focus_input();
    assert_eq!(controller.view().focus_requests, 2);
}
