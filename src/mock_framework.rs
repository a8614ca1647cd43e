//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_action`] or [`expect_snapshot`] to assert behavior.

use crate::actor_framework::{FrameworkError, State, StateClient, StateRequest};
use tokio::sync::{mpsc, oneshot, watch};

/// Creates a mock client and a receiver for asserting requests.
///
/// The returned `watch::Sender` plays the part of the actor's publisher, so tests
/// can push states to subscribers without running a real `StateActor`.
pub fn create_mock_client<S: State>(
    buffer_size: usize,
    initial: S,
) -> (StateClient<S>, mpsc::Receiver<StateRequest<S>>, watch::Sender<S>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (publisher, watcher) = watch::channel(initial);
    (StateClient::new(sender, watcher), receiver, publisher)
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<S: State>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(S::Action, oneshot::Sender<Result<S::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StateRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<S: State>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<oneshot::Sender<Result<S, FrameworkError>>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartAction, CartActionResult};
    use crate::domain::{Cart, MenuItem};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver, _publisher) = create_mock_client::<Cart>(10, Cart::new());

        let action_task = tokio::spawn(async move {
            let item = MenuItem::new(1, "Pasta", "Penne", 12, "pasta.jpg", "mains");
            client.perform_action(CartAction::Add { item, quantity: 2 }).await
        });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        match action {
            CartAction::Add { item, quantity } => {
                assert_eq!(item.id, 1);
                assert_eq!(quantity, 2);
            }
            other => panic!("Unexpected action: {:?}", other),
        }
        responder.send(Ok(Ok(CartActionResult::Added { quantity: 2 }))).unwrap();

        let result = action_task.await.unwrap();
        assert_eq!(result, Ok(Ok(CartActionResult::Added { quantity: 2 })));
    }
}
