use crate::{EditSection, Recipe, RecipeDetail, RecipeId, SectionState, SubmissionStatus};

/// Longest description shown on a recipe card before it is cut.
pub const EXCERPT_LIMIT: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: Screen,
    /// Blocking message the user has to acknowledge.
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List(ListView),
    Detail(DetailView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub loading: bool,
    pub load_error: Option<String>,
    pub name_filter: String,
    pub site_filter: String,
    pub url_input: String,
    pub submission: SubmissionStatus,
    pub submission_error: Option<String>,
    pub can_submit: bool,
    pub cards: Vec<RecipeCardView>,
    /// Size of the unfiltered collection.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCardView {
    pub id: RecipeId,
    pub name: String,
    pub domain: Option<String>,
    pub excerpt: Option<String>,
    pub image_url: Option<String>,
}

impl RecipeCardView {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            domain: recipe.domain(),
            excerpt: recipe.description.as_deref().map(excerpt),
            image_url: recipe.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: RecipeId,
    pub loading: bool,
    pub recipe: Option<Recipe>,
    pub domain: Option<String>,
    pub info: Vec<InfoItem>,
    pub ingredients: SectionState,
    pub instructions: SectionState,
    pub saving: bool,
    pub confirming_delete: bool,
    pub deleting: bool,
}

impl DetailView {
    pub(crate) fn from_detail(detail: &RecipeDetail) -> Self {
        let recipe = detail.recipe();
        Self {
            id: detail.id(),
            loading: detail.is_loading(),
            recipe: recipe.cloned(),
            domain: recipe.and_then(Recipe::domain),
            info: recipe.map(info_items).unwrap_or_default(),
            ingredients: detail.section(EditSection::Ingredients).clone(),
            instructions: detail.section(EditSection::Instructions).clone(),
            saving: detail.is_saving(),
            confirming_delete: detail.is_confirming_delete(),
            deleting: detail.is_deleting(),
        }
    }
}

/// Card text: at most `EXCERPT_LIMIT` characters, with `...` when cut.
pub fn excerpt(description: &str) -> String {
    if description.chars().count() <= EXCERPT_LIMIT {
        return description.to_string();
    }
    let cut: String = description.chars().take(EXCERPT_LIMIT).collect();
    format!("{}...", cut.trim())
}

/// `prep` -> `Prep Time`, seconds -> minutes.
pub fn time_label(phase: &str, seconds: u64) -> InfoItem {
    let mut chars = phase.chars();
    let label = match chars.next() {
        Some(first) => format!("{}{} Time", first.to_uppercase(), chars.as_str()),
        None => "Time".to_string(),
    };
    let value = if seconds % 60 == 0 {
        format!("{} minutes", seconds / 60)
    } else {
        format!("{:.1} minutes", seconds as f64 / 60.0)
    };
    InfoItem { label, value }
}

fn info_items(recipe: &Recipe) -> Vec<InfoItem> {
    let mut info = Vec::new();
    if let Some(recipe_yield) = &recipe.recipe_yield {
        info.push(InfoItem {
            label: "Yield".into(),
            value: recipe_yield.to_string(),
        });
    }
    info.extend(
        recipe
            .times
            .iter()
            .map(|(phase, seconds)| time_label(phase, *seconds)),
    );
    let lists = [
        ("By", &recipe.authors),
        ("Category", &recipe.category),
        ("Keywords", &recipe.keywords),
    ];
    for (label, values) in lists {
        if let Some(values) = values.as_ref().filter(|values| !values.is_empty()) {
            info.push(InfoItem {
                label: label.into(),
                value: values.join(", "),
            });
        }
    }
    info
}
