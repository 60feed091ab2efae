use serde::Serialize;

use crate::view::HtmlView;

/// Reply to an event: the view as it stands right after the event was
/// handled.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub accepted: bool,
    pub view: HtmlView,
}
