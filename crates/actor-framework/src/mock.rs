//! Scripted stand-in for an actor.
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations, so code that *calls* an actor (the fulfillment orchestrator, the
//! typed client wrappers) can be tested without that actor running. Answers are instant and
//! deterministic, and failures such as [`FrameworkError::ActorClosed`] are one line to inject.
//!
//! The fulfillment actor tests in `perfume-suite` spawn the real actor under test with a
//! context built from mock plant and perfume clients.
//!
//! ```rust,ignore
//! let mut plants = MockClient::<Plant>::new();
//! plants
//!     .expect_command()
//!     .return_ok(PlantCommandResult::AvailableCount(3));
//! plants
//!     .expect_action(PlantId(7))
//!     .return_err(FrameworkError::ActorClosed);
//!
//! let client = PlantClient::new(plants.client());
//! // ... exercise code that uses `client` ...
//! plants.verify();
//! ```
//!
//! [`CommandExpectationBuilder::return_with`] answers a command from its payload.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type CommandResponder<T> = Box<
    dyn FnOnce(
            <T as ActorEntity>::Command,
        ) -> Result<<T as ActorEntity>::CommandResult, FrameworkError>
        + Send,
>;

/// An expected request and the response to give it, in arrival order.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Command {
        respond: CommandResponder<T>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(expectations: &Expectations<T>, expectation: Expectation<T>) {
    expectations
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push_back(expectation);
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were declared; any mismatch panics the
/// background task, which the caller observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Get sent to an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "Action sent to an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Command {
                            command,
                            respond_to,
                        },
                        Some(Expectation::Command { respond }),
                    ) => {
                        let _ = respond_to.send(respond(command));
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a collection `command`.
    pub fn expect_command(&mut self) -> CommandExpectationBuilder<T> {
        CommandExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        push(
            &self.expectations,
            Expectation::Get {
                id: self.id,
                response: Ok(value),
            },
        );
    }

    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Get {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        push(&self.expectations, Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Create {
                response: Err(error),
            },
        );
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(
            &self.expectations,
            Expectation::Action {
                id: self.id,
                response: Ok(result),
            },
        );
    }

    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Action {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `command` expectations.
pub struct CommandExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CommandExpectationBuilder<T> {
    pub fn return_ok(self, result: T::CommandResult) {
        self.return_with(move |_| Ok(result));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.return_with(move |_| Err(error));
    }

    /// Answers the command by inspecting its payload.
    pub fn return_with<F>(self, respond: F)
    where
        F: FnOnce(T::Command) -> Result<T::CommandResult, FrameworkError> + Send + 'static,
    {
        push(
            &self.expectations,
            Expectation::Command {
                respond: Box::new(respond),
            },
        );
    }
}

/// A client plus the receiving end of its channel, for tests that play the actor by hand.
///
/// Dropping the receiver makes every call fail with [`FrameworkError::ActorClosed`]; keeping it
/// and never answering exercises client timeouts.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request; `None` unless it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    let ResourceRequest::Action {
        id,
        action,
        respond_to,
    } = receiver.recv().await?
    else {
        return None;
    };
    Some((id, action, respond_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntityStore;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Crate {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    struct CrateCreate {
        label: String,
    }

    #[derive(Debug)]
    enum CrateCommand {
        CountLabelled(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Crate error")]
    struct CrateError;

    #[async_trait]
    impl ActorEntity for Crate {
        type Id = u32;
        type Create = CrateCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Command = CrateCommand;
        type CommandResult = usize;
        type Context = ();
        type Error = CrateError;

        fn from_create_params(id: u32, params: CrateCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_command(
            store: &mut EntityStore<Self>,
            command: CrateCommand,
            _: &(),
        ) -> Result<usize, Self::Error> {
            match command {
                CrateCommand::CountLabelled(label) => {
                    Ok(store.values().filter(|c| c.label == label).count())
                }
            }
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Crate>::new();

        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Crate {
            id: 1,
            label: "rose".to_string(),
        }));
        mock.expect_command().return_with(|command| match command {
            CrateCommand::CountLabelled(label) => Ok(label.len()),
        });

        let client = mock.client();

        let id = client
            .create(CrateCreate {
                label: "rose".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.label, "rose");

        let counted = client
            .execute(CrateCommand::CountLabelled("iris".to_string()))
            .await
            .unwrap();
        assert_eq!(counted, 4);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_command_error_injection() {
        let mut mock = MockClient::<Crate>::new();
        mock.expect_command().return_err(FrameworkError::ActorClosed);

        let result = mock
            .client()
            .execute(CrateCommand::CountLabelled("rose".to_string()))
            .await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
        assert_eq!(mock.remaining(), 0);
    }
}
