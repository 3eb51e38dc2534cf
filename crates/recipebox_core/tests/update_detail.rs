use std::sync::Once;

use pretty_assertions::assert_eq;
use recipebox_core::{
    update, AppState, Draft, EditSection, Effect, Instructions, Msg, Recipe, RecipeId,
    RemoteFailure, RequestId, Scope, Screen, SectionState, DELETE_FAILED_NOTICE,
    NOT_FOUND_NOTICE, SAVE_FAILED_NOTICE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recipebox_logging::initialize_for_tests);
}

fn omelette() -> Recipe {
    let mut recipe = Recipe::new(RecipeId(5), "Omelette", "https://eggs.example.com/omelette");
    recipe.ingredients = vec!["egg".to_string()];
    recipe.instructions = Instructions::OneStep {
        step: "Whisk and fry.".to_string(),
    };
    recipe
}

/// List loaded with `recipes`, then the detail of `open` fetched and shown.
fn opened(recipes: Vec<Recipe>, open: &Recipe) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::ListOpened);
    let Effect::FetchCollection { request } = effects[0] else {
        panic!("expected collection fetch");
    };
    let (state, _) = update(
        state,
        Msg::CollectionLoaded {
            request,
            result: Ok(recipes),
        },
    );

    let (state, effects) = update(state, Msg::RecipeOpened(open.id));
    let request = match &effects[..] {
        [Effect::FetchRecipe { request, id }] if *id == open.id => *request,
        other => panic!("unexpected effects {other:?}"),
    };
    let (mut state, _) = update(
        state,
        Msg::RecipeLoaded {
            request,
            result: Ok(open.clone()),
        },
    );
    state.consume_dirty();
    state
}

fn edit(state: AppState, section: EditSection, text: &str) -> AppState {
    let (state, _) = update(state, Msg::EditStarted(section));
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            section,
            slot: 0,
            text: text.into(),
        },
    );
    state
}

/// Ingredients saved first, instructions second, both still in flight.
fn both_sections_saving() -> (AppState, (RequestId, Recipe), (RequestId, Recipe)) {
    let state = opened(vec![omelette()], &omelette());
    let state = edit(state, EditSection::Ingredients, "egg\nmilk");
    let (state, effects) = update(state, Msg::EditSaved(EditSection::Ingredients));
    let first = update_request(&effects);
    let state = edit(state, EditSection::Instructions, "Whisk, then fry.");
    let (state, effects) = update(state, Msg::EditSaved(EditSection::Instructions));
    let second = update_request(&effects);
    (state, first, second)
}

fn resolve_save(
    state: AppState,
    request: RequestId,
    result: Result<Recipe, RemoteFailure>,
) -> AppState {
    update(state, Msg::SaveResolved { request, result }).0
}

fn update_request(effects: &[Effect]) -> (RequestId, Recipe) {
    match effects {
        [Effect::UpdateRecipe { request, recipe, .. }] => (*request, (**recipe).clone()),
        other => panic!("expected one update effect, got {other:?}"),
    }
}

#[test]
fn editing_ingredients_replaces_state_with_server_response() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());

    let (state, effects) = update(state, Msg::EditStarted(EditSection::Ingredients));
    assert!(effects.is_empty());
    assert_eq!(
        state.detail().unwrap().section(EditSection::Ingredients),
        &SectionState::Editing(Draft::Ingredients("egg".into()))
    );

    let (state, _) = update(
        state,
        Msg::DraftEdited {
            section: EditSection::Ingredients,
            slot: 0,
            text: "egg\nmilk\n".into(),
        },
    );
    let (state, effects) = update(state, Msg::EditSaved(EditSection::Ingredients));
    let (request, sent) = update_request(&effects);
    assert_eq!(sent.ingredients, vec!["egg", "milk"]);
    assert_eq!(sent.instructions, omelette().instructions);

    let mut server = sent.clone();
    server.updated = Some("2024-03-01T10:00:00".into());
    let (state, effects) = update(
        state,
        Msg::SaveResolved {
            request,
            result: Ok(server.clone()),
        },
    );
    assert!(effects.is_empty());

    let detail = state.detail().unwrap();
    assert_eq!(detail.recipe(), Some(&server));
    assert_eq!(detail.section(EditSection::Ingredients), &SectionState::View);
    assert!(!detail.is_saving());
    assert_eq!(state.collection().get(RecipeId(5)), Some(&server));
}

#[test]
fn cancel_discards_the_draft_without_a_request() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let (state, _) = update(state, Msg::EditStarted(EditSection::Instructions));
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            section: EditSection::Instructions,
            slot: 0,
            text: "Burn it.".into(),
        },
    );
    let (state, effects) = update(state, Msg::EditCancelled(EditSection::Instructions));

    assert!(effects.is_empty());
    let detail = state.detail().unwrap();
    assert_eq!(detail.section(EditSection::Instructions), &SectionState::View);
    assert_eq!(detail.recipe(), Some(&omelette()));
}

#[test]
fn sections_are_drafted_and_saved_independently() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let (state, _) = update(state, Msg::EditStarted(EditSection::Ingredients));
    let (state, _) = update(state, Msg::EditStarted(EditSection::Instructions));
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            section: EditSection::Instructions,
            slot: 0,
            text: "Whisk, season and fry.".into(),
        },
    );

    let (state, effects) = update(state, Msg::EditSaved(EditSection::Instructions));
    let (request, sent) = update_request(&effects);
    assert_eq!(sent.ingredients, vec!["egg"]);
    assert_eq!(
        sent.instructions,
        Instructions::OneStep {
            step: "Whisk, season and fry.".into()
        }
    );

    let (state, _) = update(
        state,
        Msg::SaveResolved {
            request,
            result: Ok(sent),
        },
    );
    assert_eq!(
        state.detail().unwrap().section(EditSection::Ingredients),
        &SectionState::Editing(Draft::Ingredients("egg".into()))
    );
}

#[test]
fn second_section_save_carries_the_first_one_in_flight() {
    init_logging();
    let (state, (_, first_body), (_, second_body)) = both_sections_saving();
    assert_eq!(first_body.ingredients, vec!["egg", "milk"]);
    assert_eq!(first_body.instructions, omelette().instructions);
    assert_eq!(second_body.ingredients, vec!["egg", "milk"]);
    assert_eq!(
        second_body.instructions,
        Instructions::OneStep {
            step: "Whisk, then fry.".into()
        }
    );
    assert!(state.detail().unwrap().is_saving());
}

#[test]
fn first_save_failing_while_second_succeeds_reports_and_keeps_both_edits() {
    init_logging();
    let (state, (first, _), (second, second_body)) = both_sections_saving();

    let state = resolve_save(state, first, Err(RemoteFailure::Transport("500".into())));
    assert_eq!(state.notice(), Some(SAVE_FAILED_NOTICE));
    assert_eq!(
        state.detail().unwrap().section(EditSection::Ingredients),
        &SectionState::Editing(Draft::Ingredients("egg\nmilk".into()))
    );

    let state = resolve_save(state, second, Ok(second_body.clone()));
    let detail = state.detail().unwrap();
    assert_eq!(detail.recipe(), Some(&second_body));
    assert!(!detail.is_saving());
    assert_eq!(state.collection().get(RecipeId(5)), Some(&second_body));
}

#[test]
fn first_save_succeeding_then_second_failing_reopens_only_the_second() {
    init_logging();
    let (state, (first, first_body), (second, _)) = both_sections_saving();

    let state = resolve_save(state, first, Ok(first_body.clone()));
    assert_eq!(state.notice(), None);
    assert_eq!(state.detail().unwrap().recipe(), Some(&first_body));
    assert!(state.detail().unwrap().is_saving());

    let state = resolve_save(state, second, Err(RemoteFailure::Transport("500".into())));
    assert_eq!(state.notice(), Some(SAVE_FAILED_NOTICE));
    let detail = state.detail().unwrap();
    assert_eq!(detail.recipe().unwrap().ingredients, vec!["egg", "milk"]);
    assert_eq!(detail.section(EditSection::Ingredients), &SectionState::View);
    assert_eq!(
        detail.section(EditSection::Instructions),
        &SectionState::Editing(Draft::OneStep("Whisk, then fry.".into()))
    );
}

#[test]
fn second_save_succeeding_first_settles_the_earlier_one() {
    init_logging();
    let (state, (first, first_body), (second, second_body)) = both_sections_saving();

    let state = resolve_save(state, second, Ok(second_body.clone()));
    assert!(!state.detail().unwrap().is_saving());

    // The earlier answer is older than what the server now holds.
    let state = resolve_save(state, first, Err(RemoteFailure::Transport("late".into())));
    assert_eq!(state.notice(), None);
    let state = resolve_save(state, first, Ok(first_body));
    let detail = state.detail().unwrap();
    assert_eq!(detail.recipe(), Some(&second_body));
    assert_eq!(detail.section(EditSection::Ingredients), &SectionState::View);
    assert_eq!(state.collection().get(RecipeId(5)), Some(&second_body));
}

#[test]
fn second_save_failing_first_then_first_succeeding() {
    init_logging();
    let (state, (first, first_body), (second, _)) = both_sections_saving();

    let state = resolve_save(state, second, Err(RemoteFailure::Transport("500".into())));
    assert_eq!(state.notice(), Some(SAVE_FAILED_NOTICE));
    let (state, _) = update(state, Msg::NoticeDismissed);

    let state = resolve_save(state, first, Ok(first_body.clone()));
    assert_eq!(state.notice(), None);
    let detail = state.detail().unwrap();
    assert_eq!(detail.recipe(), Some(&first_body));
    assert_eq!(
        detail.section(EditSection::Instructions),
        &SectionState::Editing(Draft::OneStep("Whisk, then fry.".into()))
    );
}

#[test]
fn failed_save_keeps_recipe_and_notifies() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let (state, _) = update(state, Msg::EditStarted(EditSection::Ingredients));
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            section: EditSection::Ingredients,
            slot: 0,
            text: "egg\nham".into(),
        },
    );
    let (state, effects) = update(state, Msg::EditSaved(EditSection::Ingredients));
    let (request, _) = update_request(&effects);

    let (state, _) = update(
        state,
        Msg::SaveResolved {
            request,
            result: Err(RemoteFailure::Transport("500".into())),
        },
    );
    assert_eq!(state.notice(), Some(SAVE_FAILED_NOTICE));
    let detail = state.detail().unwrap();
    assert_eq!(detail.recipe(), Some(&omelette()));
    assert_eq!(
        detail.section(EditSection::Ingredients),
        &SectionState::Editing(Draft::Ingredients("egg\nham".into()))
    );
    assert_eq!(state.collection().get(RecipeId(5)), Some(&omelette()));

    let (state, _) = update(state, Msg::NoticeDismissed);
    assert_eq!(state.notice(), None);
}

#[test]
fn declined_delete_makes_no_request() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let (state, effects) = update(state, Msg::DeleteClicked);
    assert!(effects.is_empty());
    assert!(state.detail().unwrap().is_confirming_delete());

    let (state, effects) = update(state, Msg::DeleteDeclined);
    assert!(effects.is_empty());
    assert!(!state.detail().unwrap().is_confirming_delete());
    assert_eq!(state.collection().recipes().len(), 1);

    let (_state, effects) = update(state, Msg::DeleteConfirmed);
    assert!(effects.is_empty());
}

#[test]
fn confirmed_delete_removes_and_returns_to_list() {
    init_logging();
    let other = Recipe::new(RecipeId(6), "Toast", "https://bread.example.com/toast");
    let state = opened(vec![omelette(), other], &omelette());

    let (state, _) = update(state, Msg::DeleteClicked);
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    let request = match &effects[..] {
        [Effect::DeleteRecipe { request, id }] if *id == RecipeId(5) => *request,
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::DeleteResolved {
            request,
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Cancel {
            scope: Scope::Detail
        }]
    );
    assert!(state.detail().is_none());
    let ids: Vec<_> = state.collection().recipes().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RecipeId(6)]);
    assert!(matches!(state.view().screen, Screen::List(_)));
}

#[test]
fn failed_delete_stays_on_the_recipe() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let (state, _) = update(state, Msg::DeleteClicked);
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    let Effect::DeleteRecipe { request, .. } = effects[0] else {
        panic!("expected delete effect");
    };

    let (state, _) = update(
        state,
        Msg::DeleteResolved {
            request,
            result: Err(RemoteFailure::Transport("timeout".into())),
        },
    );
    assert_eq!(state.notice(), Some(DELETE_FAILED_NOTICE));
    assert!(state.detail().is_some());
    assert_eq!(state.collection().recipes().len(), 1);

    // The user can try again.
    let (state, _) = update(state, Msg::DeleteClicked);
    let (_state, effects) = update(state, Msg::DeleteConfirmed);
    assert_eq!(effects.len(), 1);
}

#[test]
fn not_found_returns_to_list_with_notice() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RecipeOpened(RecipeId(42)));
    let Effect::FetchRecipe { request, .. } = effects[0] else {
        panic!("expected recipe fetch");
    };

    let (state, effects) = update(
        state,
        Msg::RecipeLoaded {
            request,
            result: Err(RemoteFailure::NotFound),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Cancel {
            scope: Scope::Detail
        }]
    );
    assert!(state.detail().is_none());
    assert_eq!(state.view().notice.as_deref(), Some(NOT_FOUND_NOTICE));
}

#[test]
fn save_confirmed_after_leaving_reaches_the_collection() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let state = edit(state, EditSection::Ingredients, "egg\ncheese");
    let (state, effects) = update(state, Msg::EditSaved(EditSection::Ingredients));
    let (request, sent) = update_request(&effects);

    let (state, effects) = update(state, Msg::DetailClosed);
    assert_eq!(
        effects,
        vec![Effect::Cancel {
            scope: Scope::Detail
        }]
    );

    let (mut state, effects) = update(
        state,
        Msg::SaveResolved {
            request,
            result: Ok(sent.clone()),
        },
    );
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.collection().get(RecipeId(5)), Some(&sent));

    // A duplicate answer for a settled request changes nothing.
    let (mut state, _) = update(
        state,
        Msg::SaveResolved {
            request,
            result: Err(RemoteFailure::NotFound),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.notice(), None);
}

#[test]
fn save_failing_after_leaving_is_reported() {
    init_logging();
    let state = opened(vec![omelette()], &omelette());
    let state = edit(state, EditSection::Ingredients, "egg\ncheese");
    let (state, effects) = update(state, Msg::EditSaved(EditSection::Ingredients));
    let (request, _) = update_request(&effects);
    let (state, _) = update(state, Msg::DetailClosed);

    let (state, _) = update(
        state,
        Msg::SaveResolved {
            request,
            result: Err(RemoteFailure::Transport("502".into())),
        },
    );
    assert_eq!(state.notice(), Some(SAVE_FAILED_NOTICE));
    assert_eq!(state.collection().get(RecipeId(5)), Some(&omelette()));
}

#[test]
fn delete_confirmed_after_leaving_removes_the_recipe() {
    init_logging();
    let other = Recipe::new(RecipeId(6), "Toast", "https://bread.example.com/toast");
    let state = opened(vec![omelette(), other], &omelette());
    let (state, _) = update(state, Msg::DeleteClicked);
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    let Effect::DeleteRecipe { request, .. } = effects[0] else {
        panic!("expected delete effect");
    };
    assert_eq!(effects[0].scope(), Some(Scope::List));

    let (state, _) = update(state, Msg::DetailClosed);
    let (state, _) = update(
        state,
        Msg::DeleteResolved {
            request,
            result: Ok(()),
        },
    );
    let ids: Vec<_> = state.collection().recipes().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RecipeId(6)]);
    assert_eq!(state.notice(), None);
}

#[test]
fn reopening_a_recipe_ignores_the_previous_fetch() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::RecipeOpened(RecipeId(5)));
    let (state, second) = update(state, Msg::RecipeOpened(RecipeId(5)));
    assert_eq!(
        second.first(),
        Some(&Effect::Cancel {
            scope: Scope::Detail
        })
    );
    let Effect::FetchRecipe { request: stale, .. } = first[0] else {
        panic!("expected recipe fetch");
    };

    let (state, _) = update(
        state,
        Msg::RecipeLoaded {
            request: stale,
            result: Ok(omelette()),
        },
    );
    assert!(state.detail().unwrap().is_loading());
}
