use serde::Serialize;

use crate::render::Fragment;

/// The live widget the controller mutates. Implementations only apply what
/// they are told; every decision lives in the controller.
pub trait View {
    fn replace_results(&mut self, fragment: Fragment);
    fn set_welcome_visible(&mut self, visible: bool);
    fn set_spinner_visible(&mut self, visible: bool);
    fn set_input_focused(&mut self, focused: bool);
    fn focus_input(&mut self);
}

/// In-memory model of the widget regions on the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlView {
    pub results_html: Fragment,
    pub welcome_visible: bool,
    pub spinner_visible: bool,
    pub input_focused: bool,
    /// Bumped on every focus request so an adapter can tell a new request
    /// from one it already applied.
    pub focus_requests: u64,
    /// Number of times the results region was replaced.
    pub renders: u64,
}

impl Default for HtmlView {
    fn default() -> Self {
        HtmlView {
            results_html: Fragment::empty(),
            welcome_visible: true,
            spinner_visible: false,
            input_focused: false,
            focus_requests: 0,
            renders: 0,
        }
    }
}

impl View for HtmlView {
    fn replace_results(&mut self, fragment: Fragment) {
        self.results_html = fragment;
        self.renders += 1;
    }

    fn set_welcome_visible(&mut self, visible: bool) {
        self.welcome_visible = visible;
    }

    fn set_spinner_visible(&mut self, visible: bool) {
        self.spinner_visible = visible;
    }

    fn set_input_focused(&mut self, focused: bool) {
        self.input_focused = focused;
    }

    fn focus_input(&mut self) {
        self.focus_requests += 1;
    }
}
