//! Drives one controller on a single task.
//!
//! Events arrive over an mpsc channel; the one pending network future is
//! polled on the same task, so the controller is never shared. Every change
//! to the view is published on a watch channel.

use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

use crate::client::SearchClient;
use crate::controller::{ControllerOptions, SearchController, SearchTicket};
use crate::data_models::SearchResult;
use crate::error::{Result, SearchError};
use crate::shortcut::{self, KeyPress};
use crate::view::HtmlView;

const EVENT_BUFFER: usize = 64;

/// DOM-level events reported by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    KeyDown { key: KeyPress },
    InputChanged { value: String },
    Focus,
    Blur,
    GlobalKeyDown { key: KeyPress },
    Submit { query: String },
}

type PendingSearch = BoxFuture<'static, (SearchTicket, Result<Vec<SearchResult>>)>;

/// An event plus, optionally, where to report the view once it is applied.
struct Envelope {
    event: UiEvent,
    applied: Option<oneshot::Sender<HtmlView>>,
}

/// Channels for talking to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<Envelope>,
    pub view: watch::Receiver<HtmlView>,
}

impl SessionHandle {
    /// Queues an event without waiting for it to be handled.
    pub async fn send(&self, event: UiEvent) -> Result<()> {
        self.events
            .send(Envelope {
                event,
                applied: None,
            })
            .await
            .map_err(|_| SearchError::SessionClosed)
    }

    /// Queues an event and resolves to the view right after the session
    /// handled it.
    pub async fn apply(&self, event: UiEvent) -> Result<HtmlView> {
        let (applied, view) = oneshot::channel();
        self.events
            .send(Envelope {
                event,
                applied: Some(applied),
            })
            .await
            .map_err(|_| SearchError::SessionClosed)?;
        view.await.map_err(|_| SearchError::SessionClosed)
    }

    /// Resolves once the session has stopped.
    pub async fn closed(&self) {
        self.events.closed().await
    }
}

pub struct SearchSession<C> {
    controller: SearchController<HtmlView>,
    client: Arc<C>,
    publisher: watch::Sender<HtmlView>,
    pending: FuturesUnordered<PendingSearch>,
}

impl<C> SearchSession<C>
where
    C: SearchClient + 'static,
{
    pub fn new(
        client: Arc<C>,
        options: ControllerOptions,
    ) -> (SearchSession<C>, watch::Receiver<HtmlView>) {
        let controller = SearchController::new(HtmlView::default(), options);
        let (publisher, view) = watch::channel(controller.view().clone());
        let session = SearchSession {
            controller,
            client,
            publisher,
            pending: FuturesUnordered::new(),
        };
        (session, view)
    }

    /// Spawns the session loop and returns its handle.
    pub fn spawn(
        client: Arc<C>,
        options: ControllerOptions,
        cancel: CancellationToken,
    ) -> SessionHandle {
        let (session, view) = SearchSession::new(client, options);
        let (events, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(session.run(rx, cancel));
        SessionHandle { events, view }
    }

    async fn run(mut self, mut events: mpsc::Receiver<Envelope>, cancel: CancellationToken) {
        tracing::info!("search session started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                envelope = events.recv() => match envelope {
                    Some(Envelope { event, applied }) => {
                        self.dispatch(event);
                        if let Some(applied) = applied {
                            // The caller may have gone away; nothing to report then.
                            let _ = applied.send(self.controller.view().clone());
                        }
                    }
                    None => break,
                },
                Some((ticket, outcome)) = self.pending.next(), if !self.pending.is_empty() => {
                    self.controller.on_complete(ticket, outcome);
                }
            }
            self.publish();
        }
        tracing::info!("search session stopped");
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        tracing::trace!(?event, "ui event");
        let ticket = match event {
            UiEvent::KeyDown { key } => self.controller.on_key_down(&key),
            UiEvent::Submit { query } => match self.controller.on_submit(&query) {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    tracing::debug!("submit ignored: {e}");
                    None
                }
            },
            UiEvent::InputChanged { value } => {
                self.controller.on_input_changed(&value);
                None
            }
            UiEvent::Focus => {
                self.controller.on_focus();
                None
            }
            UiEvent::Blur => {
                self.controller.on_blur();
                None
            }
            UiEvent::GlobalKeyDown { key } => {
                if shortcut::is_focus_shortcut(&key) {
                    self.controller.focus_input();
                }
                None
            }
        };

        if let Some(ticket) = ticket {
            self.start_search(ticket);
        }
    }

    fn start_search(&mut self, ticket: SearchTicket) {
        let client = Arc::clone(&self.client);
        self.pending.push(Box::pin(async move {
            let outcome = client.search(ticket.query()).await;
            (ticket, outcome)
        }));
    }

    fn publish(&self) {
        let view = self.controller.view();
        self.publisher.send_if_modified(|current| {
            if *current == *view {
                return false;
            }
            *current = view.clone();
            true
        });
    }
}

/// Runs a single search cycle to completion and returns the resulting view.
pub async fn search_once<C: SearchClient>(
    client: &C,
    query: &str,
    options: ControllerOptions,
) -> Result<HtmlView> {
    let mut controller = SearchController::new(HtmlView::default(), options);
    let ticket = controller.on_submit(query)?;
    let outcome = client.search(ticket.query()).await;
    controller.on_complete(ticket, outcome);
    Ok(controller.into_view())
}
