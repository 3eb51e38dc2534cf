use std::fmt::Write;

use chrono::{DateTime, NaiveDateTime};
use recipebox_core::{
    AppViewModel, DetailView, Draft, Instructions, ListView, Recipe, Screen, SectionState,
    SubmissionStatus,
};

/// Plain-text rendering of the whole view model.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "!! {notice} (type 'ok')");
    }
    match &view.screen {
        Screen::List(list) => render_list(&mut out, list),
        Screen::Detail(detail) => render_detail(&mut out, detail),
    }
    out
}

fn render_list(out: &mut String, list: &ListView) {
    if list.loading {
        let _ = writeln!(out, "Loading recipes...");
        return;
    }
    if let Some(error) = &list.load_error {
        let _ = writeln!(out, "{error} Type 'list' to try again.");
        return;
    }

    let _ = writeln!(out, "Recipes ({} of {})", list.cards.len(), list.total);
    match list.submission {
        SubmissionStatus::Loading => {
            let _ = writeln!(out, "Adding {}...", list.url_input);
        }
        SubmissionStatus::Error => {
            let message = list.submission_error.as_deref().unwrap_or_default();
            let _ = writeln!(out, "Unable to add recipe: {message} (type 'dismiss')");
        }
        SubmissionStatus::Init | SubmissionStatus::Complete => {}
    }
    if !list.name_filter.is_empty() || !list.site_filter.is_empty() {
        let _ = writeln!(
            out,
            "Filter: name '{}' site '{}'",
            list.name_filter, list.site_filter
        );
    }
    for card in &list.cards {
        let domain = card.domain.as_deref().unwrap_or("unknown site");
        let _ = writeln!(out, "[{}] {} ({})", card.id, card.name, domain);
        if let Some(excerpt) = card.excerpt.as_deref().filter(|text| !text.is_empty()) {
            let _ = writeln!(out, "    {excerpt}");
        }
    }
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let Some(recipe) = &detail.recipe else {
        let _ = writeln!(out, "Loading recipe {}...", detail.id);
        return;
    };

    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "{}", subtitle(recipe, detail.domain.as_deref()));
    if let Some(description) = recipe.description.as_deref() {
        let _ = writeln!(out, "\"{description}\"");
    }
    for item in &detail.info {
        let _ = writeln!(out, "  {}: {}", item.label, item.value);
    }

    let _ = writeln!(out, "\nIngredients");
    match &detail.ingredients {
        SectionState::View => {
            for ingredient in &recipe.ingredients {
                let _ = writeln!(out, "  - {ingredient}");
            }
        }
        SectionState::Editing(draft) => render_draft(out, draft),
    }

    let _ = writeln!(out, "\nInstructions");
    match &detail.instructions {
        SectionState::View => render_instructions(out, &recipe.instructions),
        SectionState::Editing(draft) => render_draft(out, draft),
    }

    if detail.saving {
        let _ = writeln!(out, "\nSaving...");
    }
    if detail.deleting {
        let _ = writeln!(out, "\nDeleting...");
    } else if detail.confirming_delete {
        let _ = writeln!(out, "\nDelete '{}'? (yes/no)", recipe.name);
    }
}

fn render_instructions(out: &mut String, instructions: &Instructions) {
    match instructions {
        Instructions::OneStep { step } => {
            let _ = writeln!(out, "  {step}");
        }
        Instructions::Steps { steps } => render_steps(out, steps),
        Instructions::Sections { sections } => {
            for section in sections {
                let _ = writeln!(out, "  {}", section.name.to_uppercase());
                render_steps(out, &section.steps);
            }
        }
    }
}

fn render_steps(out: &mut String, steps: &[String]) {
    for (index, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", index + 1);
    }
}

fn render_draft(out: &mut String, draft: &Draft) {
    let _ = writeln!(out, "  (editing; 'save' or 'cancel')");
    match draft {
        Draft::Sections(sections) => {
            for (slot, section) in sections.iter().enumerate() {
                let _ = writeln!(out, "  [{slot}] {}", section.name);
                for line in section.text.lines() {
                    let _ = writeln!(out, "  | {line}");
                }
            }
        }
        Draft::Ingredients(text) | Draft::OneStep(text) | Draft::Steps(text) => {
            for line in text.lines() {
                let _ = writeln!(out, "  | {line}");
            }
        }
    }
}

fn subtitle(recipe: &Recipe, domain: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(created) = recipe.created.as_deref() {
        parts.push(format!("Added: {}", display_date(created)));
    }
    if let Some(updated) = recipe.updated.as_deref() {
        parts.push(format!("Modified: {}", display_date(updated)));
    }
    if let Some(authors) = recipe.authors.as_ref().filter(|a| !a.is_empty()) {
        parts.push(format!("By: {}", authors.join(", ")));
    }
    parts.push(format!("From: {}", domain.unwrap_or(&recipe.url)));
    parts.join(" | ")
}

/// Calendar date of a backend timestamp; unknown formats are shown as sent.
pub fn display_date(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::{update, AppState, EditSection, Msg, RecipeId, RemoteFailure};

    fn omelette() -> Recipe {
        let mut recipe = Recipe::new(RecipeId(5), "Omelette", "https://www.eggs.com/o");
        recipe.ingredients = vec!["egg".into()];
        recipe.created = Some("Tue, 05 Mar 2024 10:00:00 GMT".into());
        recipe
    }

    #[test]
    fn dates_from_the_backend_are_shortened() {
        assert_eq!(display_date("2024-03-05T10:00:00+00:00"), "2024-03-05");
        assert_eq!(display_date("Tue, 05 Mar 2024 10:00:00 GMT"), "2024-03-05");
        assert_eq!(display_date("2024-03-05T10:00:00.123456"), "2024-03-05");
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn list_shows_cards_and_submission_error() {
        let (state, _) = update(AppState::new(), Msg::ListOpened);
        let (state, _) = update(
            state,
            Msg::CollectionLoaded {
                request: 1,
                result: Ok(vec![omelette()]),
            },
        );
        let (state, _) = update(state, Msg::UrlInputChanged("https://news.com/x".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::SubmissionResolved {
                request: 2,
                result: Err(RemoteFailure::Validation {
                    code: "PARSE_FAILED".into(),
                }),
            },
        );

        let text = render(&state.view());
        assert!(text.contains("Recipes (1 of 1)"));
        assert!(text.contains("[5] Omelette (eggs.com)"));
        assert!(text.contains(
            "Unable to add recipe: Unable to extract a recipe from this page. (type 'dismiss')"
        ));
    }

    #[test]
    fn detail_shows_draft_and_delete_prompt() {
        let (state, _) = update(AppState::new(), Msg::RecipeOpened(RecipeId(5)));
        let (state, _) = update(
            state,
            Msg::RecipeLoaded {
                request: 1,
                result: Ok(omelette()),
            },
        );
        let (state, _) = update(state, Msg::EditStarted(EditSection::Ingredients));
        let (state, _) = update(state, Msg::DeleteClicked);

        let text = render(&state.view());
        assert!(text.contains("Added: 2024-03-05 | From: eggs.com"));
        assert!(text.contains("  | egg"));
        assert!(text.contains("Delete 'Omelette'? (yes/no)"));
    }
}
