//! Recipebox core: pure state machine and view-model helpers.
mod collection;
mod detail;
mod effect;
mod failure;
mod filter;
mod msg;
mod recipe;
mod state;
mod submission;
mod update;
mod view_model;

pub use collection::{RecipeCollection, LOAD_FAILED_MESSAGE};
pub use detail::{
    draft_lines, DeleteOutcome, Draft, EditSection, LoadOutcome, RecipeDetail, SaveOutcome,
    SectionDraft, SectionState,
};
pub use effect::{Effect, RequestId, Scope};
pub use failure::RemoteFailure;
pub use filter::{filter_recipes, FilterCriteria};
pub use msg::Msg;
pub use recipe::{InstructionSection, Instructions, Recipe, RecipeId, RecipeYield};
pub use state::AppState;
pub use submission::{
    submission_error_message, Submission, SubmissionStatus, SUBMISSION_ERROR_MESSAGES,
    SUBMISSION_FALLBACK_MESSAGE,
};
pub use update::{
    update, DELETE_FAILED_NOTICE, LOAD_RECIPE_FAILED_NOTICE, NOT_FOUND_NOTICE, SAVE_FAILED_NOTICE,
};
pub use view_model::{
    excerpt, time_label, AppViewModel, DetailView, InfoItem, ListView, RecipeCardView, Screen,
    EXCERPT_LIMIT,
};
