//! Recipebox client: typed access to the recipe backend and effect execution.
mod engine;
mod remote;
mod types;

pub use engine::{ChannelEventSink, ClientHandle, EventSink};
pub use remote::{ClientSettings, RecipeApi, ReqwestRecipeApi};
pub use types::{ClientError, ClientEvent, FailureKind, Operation, Outcome};
