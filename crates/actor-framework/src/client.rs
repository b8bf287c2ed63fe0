//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Forwards CRUD, Action and Command requests over a Tokio mpsc channel and waits for the
/// reply on a oneshot channel. Cloning only clones the sender.
///
/// A client may carry a fixed timeout ([`ResourceClient::with_timeout`]). It bounds the whole
/// exchange (queueing plus handling); on expiry the call fails with
/// [`FrameworkError::Timeout`] and is not retried.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    timeout: Option<Duration>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: self.timeout,
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            timeout: None,
        }
    }

    /// Returns a client whose calls fail after `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn request<R, F>(&self, build: F) -> Result<R, FrameworkError>
    where
        R: Send,
        F: FnOnce(Response<R>) -> ResourceRequest<T> + Send,
    {
        let (respond_to, response) = oneshot::channel();
        let sender = &self.sender;
        let exchange = async move {
            sender
                .send(build(respond_to))
                .await
                .map_err(|_| FrameworkError::ActorClosed)?;
            match response.await {
                Ok(result) => result,
                Err(_) => Err(FrameworkError::ActorDropped),
            }
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| FrameworkError::Timeout(limit))?,
            None => exchange.await,
        }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn execute(&self, command: T::Command) -> Result<T::CommandResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Command {
            command,
            respond_to,
        })
        .await
    }
}
