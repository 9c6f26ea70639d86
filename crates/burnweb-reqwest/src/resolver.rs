//! Lazily fetched, process-lifetime chain parameters.
//!
//! The first signing operation of a client needs the ledger's chain id. Concurrent first
//! callers share a single request: one caller becomes the leader and performs the
//! fetch, the others wait on a [`watch`] channel for its outcome. A successful result is
//! kept for the lifetime of the resolver. A failure is delivered to every waiter and
//! then forgotten, so the next call fetches again.

use async_trait::async_trait;
use burnweb_types::ChainParameters;
use tokio::sync::{Mutex, watch};

use crate::error::ClientError;

/// Somewhere chain parameters can be read from.
#[async_trait]
pub trait ChainParameterSource: Send + Sync {
    async fn fetch_chain_parameters(&self) -> Result<ChainParameters, ClientError>;
}

type Outcome = Option<Result<ChainParameters, String>>;

enum Slot {
    Idle,
    Pending(watch::Receiver<Outcome>),
    Ready(ChainParameters),
}

/// Single-flight cache in front of a [`ChainParameterSource`].
pub struct ChainParameterResolver<S> {
    source: S,
    slot: Mutex<Slot>,
}

impl<S: ChainParameterSource> ChainParameterResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(Slot::Idle),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached parameters, if a fetch has already succeeded.
    pub async fn cached(&self) -> Option<ChainParameters> {
        match &*self.slot.lock().await {
            Slot::Ready(params) => Some(*params),
            _ => None,
        }
    }

    /// Returns the chain parameters, fetching them on first use.
    pub async fn resolve(&self) -> Result<ChainParameters, ClientError> {
        loop {
            let mut receiver = {
                let mut slot = self.slot.lock().await;
                let pending = match &*slot {
                    Slot::Ready(params) => return Ok(*params),
                    Slot::Pending(receiver) => Some(receiver.clone()),
                    Slot::Idle => None,
                };
                match pending {
                    Some(receiver) => receiver,
                    None => {
                        let (sender, receiver) = watch::channel(None);
                        *slot = Slot::Pending(receiver);
                        drop(slot);
                        return self.lead(sender).await;
                    }
                }
            };

            let outcome = receiver
                .wait_for(Option::is_some)
                .await
                .map(|outcome| outcome.clone());
            match outcome {
                Ok(Some(Ok(params))) => return Ok(params),
                Ok(Some(Err(message))) => {
                    return Err(ClientError::ChainParameterUnavailable(message));
                }
                // Leader went away without publishing a result.
                Ok(None) | Err(_) => self.release(&receiver).await,
            }
        }
    }

    async fn lead(&self, sender: watch::Sender<Outcome>) -> Result<ChainParameters, ClientError> {
        let fetched = self.source.fetch_chain_parameters().await;
        let mut slot = self.slot.lock().await;
        match fetched {
            Ok(params) => {
                *slot = Slot::Ready(params);
                drop(slot);
                #[cfg(feature = "telemetry")]
                tracing::debug!(%params, "Chain parameters cached");
                sender.send_replace(Some(Ok(params)));
                Ok(params)
            }
            Err(error) => {
                *slot = Slot::Idle;
                drop(slot);
                let message = error.to_string();
                sender.send_replace(Some(Err(message.clone())));
                Err(ClientError::ChainParameterUnavailable(message))
            }
        }
    }

    async fn release(&self, abandoned: &watch::Receiver<Outcome>) {
        let mut slot = self.slot.lock().await;
        let stale = matches!(&*slot, Slot::Pending(current) if current.same_channel(abandoned));
        if stale {
            *slot = Slot::Idle;
        }
    }
}
