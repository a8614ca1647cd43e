use std::fmt::Debug;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// State owned by a [`StateActor`]. Every change made by an action is
/// published to subscribers.
pub trait State: Clone + PartialEq + Send + Sync + 'static {
    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    /// Apply a domain-specific action to the state.
    fn handle_action(&mut self, action: Self::Action) -> Self::ActionResult;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum StateRequest<S: State> {
    Action {
        action: S::Action,
        respond_to: Response<S::ActionResult>,
    },
    Snapshot {
        respond_to: Response<S>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct StateActor<S: State> {
    receiver: mpsc::Receiver<StateRequest<S>>,
    state: S,
    publisher: watch::Sender<S>,
}

impl<S: State> StateActor<S> {
    pub fn new(buffer_size: usize, initial: S) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, watcher) = watch::channel(initial.clone());
        let actor = Self {
            receiver,
            state: initial,
            publisher,
        };
        let client = StateClient::new(sender, watcher);
        (actor, client)
    }

    #[instrument(name = "state_actor", skip(self), fields(state = std::any::type_name::<S>()))]
    pub async fn run(mut self) {
        info!("StateActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Action { action, respond_to } => {
                    debug!(?action, "Processing action");
                    let result = self.state.handle_action(action);
                    self.publish();
                    let _ = respond_to.send(Ok(result));
                }
                StateRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StateRequest::Shutdown => {
                    info!("StateActor shutting down");
                    break;
                }
            }
        }

        info!("StateActor stopped");
    }

    fn publish(&self) {
        let state = &self.state;
        self.publisher.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        });
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct StateClient<S: State> {
    sender: mpsc::Sender<StateRequest<S>>,
    watcher: watch::Receiver<S>,
}

impl<S: State> StateClient<S> {
    pub(crate) fn new(sender: mpsc::Sender<StateRequest<S>>, watcher: watch::Receiver<S>) -> Self {
        Self { sender, watcher }
    }

    pub async fn perform_action(&self, action: S::Action) -> Result<S::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn snapshot(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// A receiver that already holds the latest published state.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.watcher.clone()
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(StateRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
