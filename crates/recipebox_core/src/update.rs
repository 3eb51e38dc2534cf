use recipebox_logging::{rb_debug, rb_info, rb_warn};

use crate::state::Route;
use crate::{
    AppState, DeleteOutcome, Effect, LoadOutcome, Msg, Recipe, RecipeDetail, RecipeId,
    RemoteFailure, RequestId, SaveOutcome, Scope,
};

pub const NOT_FOUND_NOTICE: &str = "Recipe not found.";
pub const LOAD_RECIPE_FAILED_NOTICE: &str = "Unable to load recipe!";
pub const SAVE_FAILED_NOTICE: &str = "Unable to save changes.";
pub const DELETE_FAILED_NOTICE: &str = "Unable to delete recipe!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ListOpened => {
            let mut effects = leave_detail(&mut state);
            let request = state.next_request();
            state.collection.begin_load(request);
            state.mark_dirty();
            effects.push(Effect::FetchCollection { request });
            effects
        }
        Msg::CollectionLoaded { request, result } => {
            if state.collection.finish_load(request, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NameFilterChanged(text) => {
            if state.filter.name != text {
                state.filter.name = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SiteFilterChanged(text) => {
            if state.filter.site != text {
                state.filter.site = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FiltersReset => {
            if !state.filter.is_empty() {
                state.filter.reset();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlInputChanged(text) => {
            state.submission.set_url_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.submission.can_submit() {
                return (state, Vec::new());
            }
            let request = state.next_request();
            match state.submission.begin(request) {
                Some(url) => {
                    state.mark_dirty();
                    vec![Effect::SubmitUrl { request, url }]
                }
                None => Vec::new(),
            }
        }
        Msg::SubmissionResolved { request, result } => {
            let before = state.submission.status();
            if let Some(recipe) = state.submission.resolve(request, result) {
                state.collection.prepend(recipe);
            }
            if state.submission.status() != before {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmissionErrorDismissed => {
            if state.submission.dismiss() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RecipeOpened(id) => {
            let mut effects = leave_detail(&mut state);
            let request = state.next_request();
            state.route = Route::Detail(Box::new(RecipeDetail::loading(id, request)));
            state.mark_dirty();
            effects.push(Effect::FetchRecipe { request, id });
            effects
        }
        Msg::RecipeLoaded { request, result } => {
            let Some(detail) = state.detail_mut() else {
                rb_debug!("Recipe response request={} arrived with no detail open", request);
                return (state, Vec::new());
            };
            match detail.finish_load(request, result) {
                LoadOutcome::Loaded => {
                    state.mark_dirty();
                    Vec::new()
                }
                LoadOutcome::Stale => Vec::new(),
                LoadOutcome::Failed(failure) => {
                    let notice = match failure {
                        RemoteFailure::NotFound => NOT_FOUND_NOTICE,
                        _ => LOAD_RECIPE_FAILED_NOTICE,
                    };
                    state.notice = Some(notice.to_string());
                    leave_detail(&mut state)
                }
            }
        }
        Msg::DetailClosed => leave_detail(&mut state),
        Msg::EditStarted(section) => {
            if state
                .detail_mut()
                .is_some_and(|detail| detail.start_edit(section))
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DraftEdited {
            section,
            slot,
            text,
        } => {
            if state
                .detail_mut()
                .is_some_and(|detail| detail.edit_draft(section, slot, text))
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditCancelled(section) => {
            if state
                .detail_mut()
                .is_some_and(|detail| detail.cancel_edit(section))
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditSaved(section) => {
            let request = state.next_request();
            let Some(detail) = state.detail_mut() else {
                return (state, Vec::new());
            };
            let id = detail.id();
            match detail.save(section, request) {
                Some(recipe) => {
                    state.mark_dirty();
                    vec![Effect::UpdateRecipe {
                        request,
                        id,
                        recipe: Box::new(recipe),
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::SaveResolved { request, result } => {
            if let Some(id) = state.detached_writes.remove(&request) {
                resolve_detached_save(&mut state, request, id, result);
                return (state, Vec::new());
            }
            let Some(detail) = state.detail_mut() else {
                rb_debug!("Save response request={} arrived with no detail open", request);
                return (state, Vec::new());
            };
            match detail.resolve_save(request, result) {
                SaveOutcome::Saved(recipe) => {
                    state.settle_detached_writes(recipe.id, request);
                    state.collection.replace_by_id(recipe.id, recipe);
                    state.mark_dirty();
                }
                SaveOutcome::Failed => {
                    state.notice = Some(SAVE_FAILED_NOTICE.to_string());
                    state.mark_dirty();
                }
                SaveOutcome::Stale => {}
            }
            Vec::new()
        }
        Msg::DeleteClicked => {
            if state
                .detail_mut()
                .is_some_and(|detail| detail.request_delete())
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteDeclined => {
            if state
                .detail_mut()
                .is_some_and(|detail| detail.decline_delete())
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteConfirmed => {
            let request = state.next_request();
            match state
                .detail_mut()
                .and_then(|detail| detail.confirm_delete(request))
            {
                Some(id) => {
                    state.mark_dirty();
                    vec![Effect::DeleteRecipe { request, id }]
                }
                None => Vec::new(),
            }
        }
        Msg::DeleteResolved { request, result } => {
            if let Some(id) = state.detached_writes.remove(&request) {
                resolve_detached_delete(&mut state, id, result);
                return (state, Vec::new());
            }
            let Some(detail) = state.detail_mut() else {
                rb_debug!("Delete response request={} arrived with no detail open", request);
                return (state, Vec::new());
            };
            match detail.resolve_delete(request, result) {
                DeleteOutcome::Deleted(id) => {
                    state.collection.remove_by_id(id);
                    let effects = leave_detail(&mut state);
                    state.detached_writes.retain(|_, recipe| *recipe != id);
                    effects
                }
                DeleteOutcome::Failed => {
                    state.notice = Some(DELETE_FAILED_NOTICE.to_string());
                    state.mark_dirty();
                    Vec::new()
                }
                DeleteOutcome::Stale => Vec::new(),
            }
        }
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Returns to the list. The detail fetch is cancelled; saves and deletes
/// keep running and their answers still reach the collection.
fn leave_detail(state: &mut AppState) -> Vec<Effect> {
    match std::mem::take(&mut state.route) {
        Route::Detail(detail) => {
            rb_debug!("Leaving detail view for recipe {}", detail.id());
            for request in detail.in_flight_writes() {
                state.detached_writes.insert(request, detail.id());
            }
            state.mark_dirty();
            vec![Effect::Cancel {
                scope: Scope::Detail,
            }]
        }
        Route::List => Vec::new(),
    }
}

fn resolve_detached_save(
    state: &mut AppState,
    request: RequestId,
    id: RecipeId,
    result: Result<Recipe, RemoteFailure>,
) {
    match result {
        Ok(recipe) => {
            rb_info!("Save request={} for recipe {} confirmed after leaving it", request, id);
            state.settle_detached_writes(id, request);
            if state.collection.replace_by_id(id, recipe) {
                state.mark_dirty();
            }
        }
        Err(failure) => {
            rb_warn!("Save request={} for recipe {} failed: {}", request, id, failure);
            state.notice = Some(SAVE_FAILED_NOTICE.to_string());
            state.mark_dirty();
        }
    }
}

fn resolve_detached_delete(
    state: &mut AppState,
    id: RecipeId,
    result: Result<(), RemoteFailure>,
) {
    match result {
        Ok(()) => {
            rb_info!("Deleted recipe {} after leaving it", id);
            state.detached_writes.retain(|_, recipe| *recipe != id);
            if state.collection.remove_by_id(id) {
                state.mark_dirty();
            }
        }
        Err(failure) => {
            rb_warn!("Deleting recipe {} failed: {}", id, failure);
            state.notice = Some(DELETE_FAILED_NOTICE.to_string());
            state.mark_dirty();
        }
    }
}
