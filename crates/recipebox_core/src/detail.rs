//! View/edit/save cycle for a single opened recipe.
//!
//! The two editable sections are independent: each can hold its own draft
//! and its own save in flight. The backend replaces the whole recipe on a
//! save, so a body always carries every section save still in flight, and
//! the server's answer replaces the whole local recipe.
use recipebox_logging::{rb_debug, rb_info, rb_warn};

use crate::{InstructionSection, Instructions, Recipe, RecipeId, RemoteFailure, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditSection {
    Ingredients,
    Instructions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub name: String,
    pub text: String,
}

/// Editable text for one section, shaped after the field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Ingredients(String),
    OneStep(String),
    Steps(String),
    Sections(Vec<SectionDraft>),
}

impl Draft {
    /// Snapshot of the current field value.
    pub fn snapshot(recipe: &Recipe, section: EditSection) -> Self {
        match section {
            EditSection::Ingredients => Draft::Ingredients(recipe.ingredients.join("\n")),
            EditSection::Instructions => match &recipe.instructions {
                Instructions::OneStep { step } => Draft::OneStep(step.clone()),
                Instructions::Steps { steps } => Draft::Steps(steps.join("\n")),
                Instructions::Sections { sections } => Draft::Sections(
                    sections
                        .iter()
                        .map(|section| SectionDraft {
                            name: section.name.clone(),
                            text: section.steps.join("\n"),
                        })
                        .collect(),
                ),
            },
        }
    }

    /// Text slots of this draft; only sectioned instructions have more than one.
    pub fn slots(&self) -> Vec<&str> {
        match self {
            Draft::Ingredients(text) | Draft::OneStep(text) | Draft::Steps(text) => {
                vec![text.as_str()]
            }
            Draft::Sections(sections) => sections.iter().map(|s| s.text.as_str()).collect(),
        }
    }

    /// Replaces the text of `slot`. Returns `false` if the slot does not exist.
    pub fn set_text(&mut self, slot: usize, text: String) -> bool {
        match self {
            Draft::Ingredients(current) | Draft::OneStep(current) | Draft::Steps(current) => {
                if slot != 0 {
                    return false;
                }
                *current = text;
                true
            }
            Draft::Sections(sections) => match sections.get_mut(slot) {
                Some(section) => {
                    section.text = text;
                    true
                }
                None => false,
            },
        }
    }

    /// Copy of `recipe` with this draft written into its field.
    pub fn merge_into(&self, recipe: &Recipe) -> Recipe {
        let mut edited = recipe.clone();
        self.apply_to(&mut edited);
        edited
    }

    fn apply_to(&self, edited: &mut Recipe) {
        match self {
            Draft::Ingredients(text) => edited.ingredients = draft_lines(text),
            Draft::OneStep(text) => {
                edited.instructions = Instructions::OneStep {
                    step: text.trim().to_string(),
                }
            }
            Draft::Steps(text) => {
                edited.instructions = Instructions::Steps {
                    steps: draft_lines(text),
                }
            }
            Draft::Sections(sections) => {
                edited.instructions = Instructions::Sections {
                    sections: sections
                        .iter()
                        .map(|section| InstructionSection {
                            name: section.name.clone(),
                            steps: draft_lines(&section.text),
                        })
                        .collect(),
                }
            }
        }
    }
}

/// Splits textarea input into trimmed, non-blank lines.
pub fn draft_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    View,
    Editing(Draft),
}

const SECTIONS: [EditSection; 2] = [EditSection::Ingredients, EditSection::Instructions];

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSave {
    request: RequestId,
    draft: Draft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Stale,
    Failed(RemoteFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Recipe),
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(RecipeId),
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    id: RecipeId,
    recipe: Option<Recipe>,
    load_pending: Option<RequestId>,
    ingredients: SectionState,
    instructions: SectionState,
    ingredients_save: Option<PendingSave>,
    instructions_save: Option<PendingSave>,
    confirming_delete: bool,
    pending_delete: Option<RequestId>,
}

impl RecipeDetail {
    /// A detail view waiting for `request` to deliver recipe `id`.
    pub fn loading(id: RecipeId, request: RequestId) -> Self {
        Self {
            id,
            recipe: None,
            load_pending: Some(request),
            ingredients: SectionState::View,
            instructions: SectionState::View,
            ingredients_save: None,
            instructions_save: None,
            confirming_delete: false,
            pending_delete: None,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.recipe.is_none()
    }

    pub fn section(&self, section: EditSection) -> &SectionState {
        match section {
            EditSection::Ingredients => &self.ingredients,
            EditSection::Instructions => &self.instructions,
        }
    }

    fn section_mut(&mut self, section: EditSection) -> &mut SectionState {
        match section {
            EditSection::Ingredients => &mut self.ingredients,
            EditSection::Instructions => &mut self.instructions,
        }
    }

    fn pending_save(&self, section: EditSection) -> Option<&PendingSave> {
        match section {
            EditSection::Ingredients => self.ingredients_save.as_ref(),
            EditSection::Instructions => self.instructions_save.as_ref(),
        }
    }

    fn pending_save_mut(&mut self, section: EditSection) -> &mut Option<PendingSave> {
        match section {
            EditSection::Ingredients => &mut self.ingredients_save,
            EditSection::Instructions => &mut self.instructions_save,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.ingredients_save.is_some() || self.instructions_save.is_some()
    }

    /// Saves and the delete still waiting for the backend.
    pub fn in_flight_writes(&self) -> Vec<RequestId> {
        SECTIONS
            .iter()
            .filter_map(|section| self.pending_save(*section).map(|pending| pending.request))
            .chain(self.pending_delete)
            .collect()
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn is_deleting(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn finish_load(
        &mut self,
        request: RequestId,
        result: Result<Recipe, RemoteFailure>,
    ) -> LoadOutcome {
        if self.load_pending != Some(request) {
            rb_debug!("Dropping stale detail response request={}", request);
            return LoadOutcome::Stale;
        }
        self.load_pending = None;
        match result {
            Ok(recipe) => {
                self.recipe = Some(recipe);
                LoadOutcome::Loaded
            }
            Err(failure) => {
                rb_warn!("Loading recipe {} failed: {}", self.id, failure);
                LoadOutcome::Failed(failure)
            }
        }
    }

    /// `view --edit--> editing`. While a save of the section is in flight
    /// the draft starts from what was sent.
    pub fn start_edit(&mut self, section: EditSection) -> bool {
        let Some(recipe) = self.recipe.as_ref() else {
            return false;
        };
        if self.section(section) != &SectionState::View {
            return false;
        }
        let draft = match self.pending_save(section) {
            Some(pending) => pending.draft.clone(),
            None => Draft::snapshot(recipe, section),
        };
        *self.section_mut(section) = SectionState::Editing(draft);
        true
    }

    pub fn edit_draft(&mut self, section: EditSection, slot: usize, text: String) -> bool {
        match self.section_mut(section) {
            SectionState::Editing(draft) => draft.set_text(slot, text),
            SectionState::View => false,
        }
    }

    /// `editing --cancel--> view`, discarding the draft.
    pub fn cancel_edit(&mut self, section: EditSection) -> bool {
        if self.section(section) == &SectionState::View {
            return false;
        }
        *self.section_mut(section) = SectionState::View;
        true
    }

    /// `editing --save--> view`. Returns the edited recipe to send: the
    /// confirmed recipe, plus every section save still in flight, plus this
    /// draft. A newer save of the same section supersedes the older one.
    pub fn save(&mut self, section: EditSection, request: RequestId) -> Option<Recipe> {
        let recipe = self.recipe.as_ref()?;
        let SectionState::Editing(draft) = self.section(section).clone() else {
            return None;
        };
        let mut edited = recipe.clone();
        for pending in SECTIONS.iter().filter_map(|s| self.pending_save(*s)) {
            pending.draft.apply_to(&mut edited);
        }
        draft.apply_to(&mut edited);

        if let Some(previous) = self.pending_save(section) {
            rb_debug!(
                "Save request={} supersedes request={} for recipe {} ({:?})",
                request,
                previous.request,
                self.id,
                section
            );
        }
        *self.pending_save_mut(section) = Some(PendingSave { request, draft });
        *self.section_mut(section) = SectionState::View;
        Some(edited)
    }

    /// Applies the server's answer to a section save.
    ///
    /// A successful save also settles every save issued before it, since
    /// their drafts were part of its body. Answers to superseded or settled
    /// saves are stale.
    pub fn resolve_save(
        &mut self,
        request: RequestId,
        result: Result<Recipe, RemoteFailure>,
    ) -> SaveOutcome {
        let Some((section, pending)) = SECTIONS.into_iter().find_map(|section| {
            self.pending_save_mut(section)
                .take_if(|pending| pending.request == request)
                .map(|pending| (section, pending))
        }) else {
            rb_debug!("Dropping stale save response request={}", request);
            return SaveOutcome::Stale;
        };
        match result {
            Ok(recipe) => {
                rb_info!("Saved recipe {} ({:?})", self.id, section);
                for section in SECTIONS {
                    let slot = self.pending_save_mut(section);
                    if slot.as_ref().is_some_and(|older| older.request < request) {
                        *slot = None;
                    }
                }
                self.recipe = Some(recipe.clone());
                SaveOutcome::Saved(recipe)
            }
            Err(failure) => {
                rb_warn!("Saving recipe {} ({:?}) failed: {}", self.id, section, failure);
                if self.section(section) == &SectionState::View {
                    *self.section_mut(section) = SectionState::Editing(pending.draft);
                }
                SaveOutcome::Failed
            }
        }
    }

    /// First step of deleting: ask the user to confirm.
    pub fn request_delete(&mut self) -> bool {
        if self.recipe.is_none() || self.pending_delete.is_some() {
            return false;
        }
        self.confirming_delete = true;
        true
    }

    pub fn decline_delete(&mut self) -> bool {
        std::mem::replace(&mut self.confirming_delete, false)
    }

    /// Confirmation given; returns the id to delete.
    pub fn confirm_delete(&mut self, request: RequestId) -> Option<RecipeId> {
        if !std::mem::replace(&mut self.confirming_delete, false) {
            return None;
        }
        self.pending_delete = Some(request);
        Some(self.id)
    }

    pub fn resolve_delete(
        &mut self,
        request: RequestId,
        result: Result<(), RemoteFailure>,
    ) -> DeleteOutcome {
        if self.pending_delete != Some(request) {
            rb_debug!("Dropping stale delete response request={}", request);
            return DeleteOutcome::Stale;
        }
        self.pending_delete = None;
        match result {
            Ok(()) => {
                rb_info!("Deleted recipe {}", self.id);
                DeleteOutcome::Deleted(self.id)
            }
            Err(failure) => {
                rb_warn!("Deleting recipe {} failed: {}", self.id, failure);
                DeleteOutcome::Failed
            }
        }
    }
}
