use crate::Recipe;

/// The two text predicates applied to the recipe list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub name: String,
    pub site: String,
}

impl FilterCriteria {
    pub fn new(name: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            site: site.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.site.is_empty()
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.site.clear();
    }

    /// Whether `recipe` satisfies every non-empty predicate.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        name_matches(recipe, &self.name) && site_matches(recipe, &self.site)
    }
}

/// Recipes matching `criteria`, in collection order.
///
/// Empty predicates place no constraint. A recipe whose URL does not parse
/// never matches an active site predicate.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], criteria: &FilterCriteria) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| criteria.matches(recipe))
        .collect()
}

fn name_matches(recipe: &Recipe, needle: &str) -> bool {
    needle.is_empty() || contains_ignore_case(&recipe.name, needle)
}

fn site_matches(recipe: &Recipe, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    recipe
        .host()
        .is_some_and(|host| contains_ignore_case(&host, needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
