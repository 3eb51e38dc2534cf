use std::sync::{mpsc, Arc};

use recipebox_client::{ClientError, ClientEvent, ClientHandle, ClientSettings, EventSink, Operation, Outcome};
use recipebox_core::{Effect, Msg, RequestId, Scope};
use recipebox_logging::{rb_info, rb_warn};

use super::app::Input;

/// Feeds client completions back into the update loop as messages.
struct MsgSink {
    tx: mpsc::Sender<Input>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(Input::Msg(event_to_msg(event)));
    }
}

pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(settings: &ClientSettings, tx: mpsc::Sender<Input>) -> Result<Self, ClientError> {
        let client = ClientHandle::new(settings, Arc::new(MsgSink { tx }))?;
        Ok(Self { client })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect_to_request(effect) {
                Request::Execute {
                    request,
                    scope,
                    operation,
                } => {
                    rb_info!("Request {} {:?} scope={:?}", request, operation, scope);
                    self.client.execute(request, scope, operation);
                }
                Request::Cancel(scope) => {
                    rb_info!("Cancelling requests with scope={:?}", scope);
                    self.client.cancel(scope);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    Execute {
        request: RequestId,
        scope: Scope,
        operation: Operation,
    },
    Cancel(Scope),
}

fn effect_to_request(effect: Effect) -> Request {
    let scope = effect.scope();
    let (request, operation) = match effect {
        Effect::FetchCollection { request } => (request, Operation::FetchCollection),
        Effect::FetchRecipe { request, id } => (request, Operation::FetchRecipe(id)),
        Effect::SubmitUrl { request, url } => (request, Operation::Submit(url)),
        Effect::UpdateRecipe {
            request,
            id,
            recipe,
        } => (request, Operation::Update(id, recipe)),
        Effect::DeleteRecipe { request, id } => (request, Operation::Remove(id)),
        Effect::Cancel { scope } => return Request::Cancel(scope),
    };
    Request::Execute {
        request,
        scope: scope.unwrap_or(Scope::List),
        operation,
    }
}

fn event_to_msg(event: ClientEvent) -> Msg {
    let ClientEvent::Completed { request, outcome } = event;
    match outcome {
        Outcome::Collection(result) => Msg::CollectionLoaded {
            request,
            result: result.map_err(|err| failure(request, &err)),
        },
        Outcome::Fetched(result) => Msg::RecipeLoaded {
            request,
            result: result.map_err(|err| failure(request, &err)),
        },
        Outcome::Submitted(result) => Msg::SubmissionResolved {
            request,
            result: result.map_err(|err| failure(request, &err)),
        },
        Outcome::Updated(result) => Msg::SaveResolved {
            request,
            result: result.map_err(|err| failure(request, &err)),
        },
        Outcome::Removed(result) => Msg::DeleteResolved {
            request,
            result: result.map_err(|err| failure(request, &err)),
        },
    }
}

fn failure(request: RequestId, err: &ClientError) -> recipebox_core::RemoteFailure {
    rb_warn!("Request {} failed: {}", request, err);
    err.to_remote_failure()
}
