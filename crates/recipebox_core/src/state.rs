use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, ListView, Screen};
use crate::{
    filter_recipes, DetailView, FilterCriteria, RecipeCardView, RecipeCollection, RecipeDetail,
    RecipeId, RequestId, Submission,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Route {
    #[default]
    List,
    Detail(Box<RecipeDetail>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) collection: RecipeCollection,
    pub(crate) filter: FilterCriteria,
    pub(crate) submission: Submission,
    pub(crate) route: Route,
    pub(crate) notice: Option<String>,
    /// Saves and deletes still in flight for a detail view that was left.
    pub(crate) detached_writes: BTreeMap<RequestId, RecipeId>,
    last_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &RecipeCollection {
        &self.collection
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        match &self.route {
            Route::Detail(detail) => Some(&**detail),
            Route::List => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn detail_mut(&mut self) -> Option<&mut RecipeDetail> {
        match &mut self.route {
            Route::Detail(detail) => Some(&mut **detail),
            Route::List => None,
        }
    }

    /// Forgets detached writes for `id` issued before `request`; a later
    /// confirmed write supersedes them.
    pub(crate) fn settle_detached_writes(&mut self, id: RecipeId, request: RequestId) {
        self.detached_writes
            .retain(|pending, recipe| *recipe != id || *pending > request);
    }

    pub(crate) fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Projection of the state for rendering. The filtered list is derived
    /// here on every call.
    pub fn view(&self) -> AppViewModel {
        let screen = match &self.route {
            Route::List => {
                let cards = filter_recipes(self.collection.recipes(), &self.filter)
                    .into_iter()
                    .map(RecipeCardView::from_recipe)
                    .collect();
                Screen::List(ListView {
                    loading: self.collection.is_loading(),
                    load_error: self.collection.load_error().map(str::to_owned),
                    name_filter: self.filter.name.clone(),
                    site_filter: self.filter.site.clone(),
                    url_input: self.submission.url_input().to_string(),
                    submission: self.submission.status(),
                    submission_error: self.submission.error().map(str::to_owned),
                    can_submit: self.submission.can_submit(),
                    cards,
                    total: self.collection.recipes().len(),
                })
            }
            Route::Detail(detail) => Screen::Detail(DetailView::from_detail(detail)),
        };
        AppViewModel {
            screen,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }
}
