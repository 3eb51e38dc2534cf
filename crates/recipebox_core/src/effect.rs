use crate::{Recipe, RecipeId};

/// Identifier attached to every backend call so late or superseded
/// responses can be recognised and dropped.
pub type RequestId = u64;

/// Lifetime a request belongs to. Cancelling a scope abandons its in-flight
/// requests. `List` lives as long as the collection and is never cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    List,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCollection { request: RequestId },
    FetchRecipe { request: RequestId, id: RecipeId },
    SubmitUrl { request: RequestId, url: String },
    UpdateRecipe { request: RequestId, id: RecipeId, recipe: Box<Recipe> },
    DeleteRecipe { request: RequestId, id: RecipeId },
    Cancel { scope: Scope },
}

impl Effect {
    /// The scope whose lifetime bounds this effect, if it issues a request.
    pub fn scope(&self) -> Option<Scope> {
        match self {
            // Writes outlive the detail view so their answers reach the collection.
            Effect::FetchCollection { .. }
            | Effect::SubmitUrl { .. }
            | Effect::UpdateRecipe { .. }
            | Effect::DeleteRecipe { .. } => Some(Scope::List),
            Effect::FetchRecipe { .. } => Some(Scope::Detail),
            Effect::Cancel { .. } => None,
        }
    }
}
