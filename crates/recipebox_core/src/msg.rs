use crate::{EditSection, Recipe, RecipeId, RemoteFailure, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The recipe list was shown; (re)load the collection.
    ListOpened,
    /// Backend answer to a collection fetch.
    CollectionLoaded {
        request: RequestId,
        result: Result<Vec<Recipe>, RemoteFailure>,
    },
    /// User edited the name filter box.
    NameFilterChanged(String),
    /// User edited the site filter box.
    SiteFilterChanged(String),
    /// User clicked Reset on the filters.
    FiltersReset,
    /// User edited the add-recipe URL box.
    UrlInputChanged(String),
    /// User submitted the URL box.
    SubmitClicked,
    /// Backend answer to a URL submission.
    SubmissionResolved {
        request: RequestId,
        result: Result<Recipe, RemoteFailure>,
    },
    /// User closed the submission error.
    SubmissionErrorDismissed,
    /// User opened a recipe from the list.
    RecipeOpened(RecipeId),
    /// Backend answer to a single-recipe fetch.
    RecipeLoaded {
        request: RequestId,
        result: Result<Recipe, RemoteFailure>,
    },
    /// User left the detail view.
    DetailClosed,
    EditStarted(EditSection),
    /// Text typed into one slot of a section's draft.
    DraftEdited {
        section: EditSection,
        slot: usize,
        text: String,
    },
    EditCancelled(EditSection),
    EditSaved(EditSection),
    /// Backend answer to an update.
    SaveResolved {
        request: RequestId,
        result: Result<Recipe, RemoteFailure>,
    },
    DeleteClicked,
    DeleteConfirmed,
    DeleteDeclined,
    /// Backend answer to a delete.
    DeleteResolved {
        request: RequestId,
        result: Result<(), RemoteFailure>,
    },
    /// User acknowledged the current notice.
    NoticeDismissed,
    /// Fallback for input that maps to nothing.
    NoOp,
}
