use recipebox_logging::{rb_debug, rb_info, rb_warn};

use crate::{RecipeId, RemoteFailure, Recipe, RequestId};

pub const LOAD_FAILED_MESSAGE: &str = "Unable to load recipes.";

/// The authoritative list of recipes fetched from the backend.
///
/// Every mutation swaps the whole vector, so anything derived from it is
/// recomputed from a consistent value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
    is_loading: bool,
    load_error: Option<String>,
    pending: Option<RequestId>,
}

impl RecipeCollection {
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Marks a fetch as in flight. A later `begin_load` supersedes this one.
    pub fn begin_load(&mut self, request: RequestId) {
        self.is_loading = true;
        self.load_error = None;
        self.pending = Some(request);
    }

    /// Applies a fetch result. Returns `false` when the response was stale.
    pub fn finish_load(
        &mut self,
        request: RequestId,
        result: Result<Vec<Recipe>, RemoteFailure>,
    ) -> bool {
        if self.pending != Some(request) {
            rb_debug!("Dropping stale collection response request={}", request);
            return false;
        }
        self.pending = None;
        self.is_loading = false;
        match result {
            Ok(recipes) => {
                rb_info!("Loaded {} recipes", recipes.len());
                self.recipes = dedupe_by_id(recipes);
                self.load_error = None;
            }
            Err(failure) => {
                rb_warn!("Loading recipes failed: {}", failure);
                self.load_error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Puts a freshly added recipe first, dropping any older copy with the same id.
    pub fn prepend(&mut self, recipe: Recipe) {
        let mut next = Vec::with_capacity(self.recipes.len() + 1);
        let id = recipe.id;
        next.push(recipe);
        next.extend(self.recipes.iter().filter(|r| r.id != id).cloned());
        self.recipes = next;
    }

    /// Swaps in the server's copy of a recipe. Returns `false` if the id is unknown.
    pub fn replace_by_id(&mut self, id: RecipeId, recipe: Recipe) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.recipes = self
            .recipes
            .iter()
            .map(|existing| {
                if existing.id == id {
                    recipe.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();
        true
    }

    /// Drops a recipe after the backend confirmed its deletion.
    pub fn remove_by_id(&mut self, id: RecipeId) -> bool {
        let before = self.recipes.len();
        let next: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| recipe.id != id)
            .cloned()
            .collect();
        let removed = next.len() != before;
        self.recipes = next;
        removed
    }
}

fn dedupe_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = std::collections::HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.id))
        .collect()
}
