use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use recipebox_core::{RequestId, Scope};
use recipebox_logging::{rb_debug, rb_warn};
use tokio_util::sync::CancellationToken;

use crate::remote::{ClientSettings, RecipeApi, ReqwestRecipeApi};
use crate::{ClientError, ClientEvent, FailureKind, Operation, Outcome};

/// Receives completion events from the executor thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Execute {
        request: RequestId,
        scope: Scope,
        operation: Operation,
    },
    Cancel {
        scope: Scope,
    },
}

/// Runs backend calls on a background tokio runtime.
///
/// Every call belongs to a `Scope`. Cancelling a scope drops its in-flight
/// calls without emitting an event; later calls in that scope run normally.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    /// Executor talking to the HTTP backend described by `settings`.
    pub fn new(settings: &ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        let api = ReqwestRecipeApi::new(settings)?;
        Self::with_api(Arc::new(api), sink)
    }

    pub fn with_api(api: Arc<dyn RecipeApi>, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut scopes: HashMap<Scope, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Execute {
                        request,
                        scope,
                        operation,
                    } => {
                        let token = scopes.entry(scope).or_default().clone();
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            tokio::select! {
                                _ = token.cancelled() => {
                                    rb_debug!("Request {} cancelled with scope {:?}", request, scope);
                                }
                                outcome = run_operation(api.as_ref(), operation) => {
                                    sink.emit(ClientEvent::Completed { request, outcome });
                                }
                            }
                        });
                    }
                    ClientCommand::Cancel { scope } => {
                        if let Some(token) = scopes.remove(&scope) {
                            token.cancel();
                        }
                    }
                }
            }
            rb_debug!("Client command channel closed; executor stopping");
        });

        Ok(Self { cmd_tx })
    }

    pub fn execute(&self, request: RequestId, scope: Scope, operation: Operation) {
        if self
            .cmd_tx
            .send(ClientCommand::Execute {
                request,
                scope,
                operation,
            })
            .is_err()
        {
            rb_warn!("Client executor is gone; request {} dropped", request);
        }
    }

    pub fn cancel(&self, scope: Scope) {
        let _ = self.cmd_tx.send(ClientCommand::Cancel { scope });
    }
}

async fn run_operation(api: &dyn RecipeApi, operation: Operation) -> Outcome {
    match operation {
        Operation::FetchCollection => Outcome::Collection(api.fetch_collection().await),
        Operation::FetchRecipe(id) => Outcome::Fetched(api.fetch_one(id).await),
        Operation::Submit(url) => Outcome::Submitted(api.submit(&url).await),
        Operation::Update(id, recipe) => Outcome::Updated(api.update(id, &recipe).await),
        Operation::Remove(id) => Outcome::Removed(api.remove(id).await),
    }
}
