// ── Reducer ──
//
// `reduce(state, msg)` is the only place state changes. It is pure apart
// from logging: network work is requested through `Effect::Request` and
// its result comes back later as a completion `Msg`, which is reduced
// against whatever the state is *then*.

use std::sync::Arc;

use tracing::{debug, warn};

use super::RecipeState;
use crate::error::CoreError;
use crate::form::FormTarget;
use crate::model::{Recipe, RecipeDraft, RecipeField, RecipeId};
use crate::notify::{Notification, Operation};

/// User intents and network completions.
#[derive(Debug, Clone)]
pub enum Msg {
    // ── Intents ──────────────────────────────────────────────────────
    Load,
    SelectRecipe(Recipe),
    SelectById(RecipeId),
    UnselectRecipe,
    ShowCreateForm,
    HideCreateForm,
    /// Hide the create form and discard the draft.
    CancelCreate,
    PatchField {
        target: FormTarget,
        field: RecipeField,
        value: String,
    },
    SubmitCreate,
    SubmitUpdate,
    SubmitDelete(RecipeId),
    SetSearchTerm(String),
    ShowAll,

    // ── Completions ──────────────────────────────────────────────────
    Loaded(Result<Vec<Recipe>, CoreError>),
    Created(Result<Recipe, CoreError>),
    Updated {
        id: RecipeId,
        result: Result<Recipe, CoreError>,
    },
    Deleted {
        id: RecipeId,
        result: Result<(), CoreError>,
    },
}

/// A call to the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Fetch,
    Create(RecipeDraft),
    Update(Recipe),
    Delete(RecipeId),
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Request(Request),
    Notify(Notification),
}

type Transition = (RecipeState, Vec<Effect>);

/// Apply `msg` to `state`.
///
/// `Err` means the intent was rejected; the caller keeps `state` as is.
pub fn reduce(state: &RecipeState, msg: Msg) -> Result<Transition, CoreError> {
    match msg {
        Msg::Load => Ok(issue(state, Request::Fetch)),
        Msg::SelectRecipe(recipe) => Ok(quiet(select(state, recipe))),
        Msg::SelectById(id) => {
            let recipe = state.find(&id).ok_or_else(|| CoreError::NotFound {
                id: id.to_string(),
            })?;
            Ok(quiet(select(state, Recipe::clone(recipe))))
        }
        Msg::UnselectRecipe => Ok(quiet(RecipeState {
            selection: None,
            ..state.clone()
        })),
        Msg::ShowCreateForm => Ok(quiet(RecipeState {
            create_form_visible: true,
            selection: None,
            ..state.clone()
        })),
        Msg::HideCreateForm => Ok(quiet(RecipeState {
            create_form_visible: false,
            ..state.clone()
        })),
        Msg::CancelCreate => Ok(quiet(RecipeState {
            create_form_visible: false,
            draft: RecipeDraft::default(),
            ..state.clone()
        })),
        Msg::PatchField {
            target,
            field,
            value,
        } => patch(state, target, field, value).map(quiet),
        Msg::SubmitCreate => Ok(issue(state, Request::Create(state.draft.clone()))),
        Msg::SubmitUpdate => {
            let selection = state.selection.clone().ok_or(CoreError::NoSelection)?;
            Ok(issue(state, Request::Update(selection)))
        }
        Msg::SubmitDelete(id) => Ok(issue(state, Request::Delete(id))),
        Msg::SetSearchTerm(search_term) => Ok(quiet(RecipeState {
            search_term,
            ..state.clone()
        })),
        Msg::ShowAll => Ok(quiet(RecipeState {
            search_term: String::new(),
            selection: None,
            create_form_visible: false,
            ..state.clone()
        })),
        Msg::Loaded(result) => Ok(loaded(state, result)),
        Msg::Created(result) => Ok(created(state, result)),
        Msg::Updated { id, result } => Ok(updated(state, &id, result)),
        Msg::Deleted { id, result } => Ok(deleted(state, &id, result)),
    }
}

// ── Intent helpers ───────────────────────────────────────────────────

fn quiet(state: RecipeState) -> Transition {
    (state, Vec::new())
}

fn issue(state: &RecipeState, request: Request) -> Transition {
    let next = RecipeState {
        pending: state.pending + 1,
        ..state.clone()
    };
    (next, vec![Effect::Request(request)])
}

fn select(state: &RecipeState, recipe: Recipe) -> RecipeState {
    RecipeState {
        selection: Some(recipe),
        create_form_visible: false,
        ..state.clone()
    }
}

fn patch(
    state: &RecipeState,
    target: FormTarget,
    field: RecipeField,
    value: String,
) -> Result<RecipeState, CoreError> {
    match target {
        FormTarget::Draft => Ok(RecipeState {
            draft: state.draft.with_field(field, value)?,
            ..state.clone()
        }),
        FormTarget::Selection => {
            let current = state.selection.as_ref().ok_or(CoreError::NoSelection)?;
            Ok(RecipeState {
                selection: Some(current.with_field(field, value)?),
                ..state.clone()
            })
        }
    }
}

// ── Completion helpers ───────────────────────────────────────────────

/// Copy of `state` with one request settled.
fn succeeded(operation: Operation) -> Vec<Effect> {
    Notification::success(operation)
        .map(Effect::Notify)
        .into_iter()
        .collect()
}

fn settle(state: &RecipeState) -> RecipeState {
    RecipeState {
        pending: state.pending.saturating_sub(1),
        ..state.clone()
    }
}

fn loaded(state: &RecipeState, result: Result<Vec<Recipe>, CoreError>) -> Transition {
    let mut next = settle(state);
    match result {
        Ok(recipes) => {
            debug!(count = recipes.len(), "recipe collection loaded");
            next.recipes = Arc::new(recipes.into_iter().map(Arc::new).collect());
            next.loaded = true;
            (next, Vec::new())
        }
        Err(err) => (
            next,
            vec![Effect::Notify(Notification::failure(Operation::Load, &err))],
        ),
    }
}

fn created(state: &RecipeState, result: Result<Recipe, CoreError>) -> Transition {
    let mut next = settle(state);
    match result {
        Ok(recipe) => {
            let mut recipes = Vec::clone(&next.recipes);
            recipes.push(Arc::new(recipe));
            next.recipes = Arc::new(recipes);
            next.create_form_visible = false;
            next.draft = RecipeDraft::default();
            (next, succeeded(Operation::Create))
        }
        // Form stays open with the user's input intact.
        Err(err) => (
            next,
            vec![Effect::Notify(Notification::failure(Operation::Create, &err))],
        ),
    }
}

fn updated(state: &RecipeState, id: &RecipeId, result: Result<Recipe, CoreError>) -> Transition {
    let mut next = settle(state);
    // The editor closes whether or not the update went through.
    next.selection = None;
    match result {
        Ok(recipe) => {
            let mut recipes = Vec::clone(&next.recipes);
            match recipes.iter_mut().find(|r| r.same_entity(&recipe)) {
                Some(slot) => {
                    *slot = Arc::new(recipe);
                    next.recipes = Arc::new(recipes);
                }
                None => warn!(%id, "updated recipe is no longer in the collection"),
            }
            (next, succeeded(Operation::Update))
        }
        Err(err) => (
            next,
            vec![Effect::Notify(Notification::failure(Operation::Update, &err))],
        ),
    }
}

fn deleted(state: &RecipeState, id: &RecipeId, result: Result<(), CoreError>) -> Transition {
    let mut next = settle(state);
    match result {
        Ok(()) => {
            let before = next.recipes.len();
            let recipes: Vec<Arc<Recipe>> = next
                .recipes
                .iter()
                .filter(|r| &r.id != id)
                .cloned()
                .collect();
            if recipes.len() == before {
                warn!(%id, "deleted recipe was not in the collection");
            }
            next.recipes = Arc::new(recipes);
            next.selection = None;
            (next, succeeded(Operation::Delete))
        }
        Err(err) => (
            next,
            vec![Effect::Notify(Notification::failure(Operation::Delete, &err))],
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::model::DEFAULT_IMAGE_URL;
    use crate::notify::NotificationKind;
    use crate::state::ViewMode;
    use pretty_assertions::assert_eq;

    fn recipe(id: i64, title: &str) -> Recipe {
        Recipe {
            id: RecipeId::Numeric(id),
            title: title.into(),
            ingredients: format!("{title} ingredients"),
            instructions: "cook".into(),
            servings: 2,
            description: String::new(),
            image_url: DEFAULT_IMAGE_URL.into(),
        }
    }

    fn two() -> RecipeState {
        RecipeState::with_recipes([recipe(1, "Pasta"), recipe(2, "Soup")])
    }

    fn step(state: &RecipeState, msg: Msg) -> RecipeState {
        reduce(state, msg).unwrap().0
    }

    fn ids(state: &RecipeState) -> Vec<RecipeId> {
        state.recipes().iter().map(|r| r.id.clone()).collect()
    }

    fn server_error() -> CoreError {
        CoreError::Server {
            status: 500,
            message: "boom".into(),
        }
    }

    // ── View transitions ────────────────────────────────────────────

    #[test]
    fn select_then_show_create_form_is_exclusive() {
        let s = step(&two(), Msg::SelectRecipe(recipe(1, "Pasta")));
        assert_eq!(s.view_mode(), ViewMode::Editing);

        let s = step(&s, Msg::ShowCreateForm);
        assert!(s.selection().is_none());
        assert!(s.is_create_form_visible());
        assert_eq!(s.view_mode(), ViewMode::Creating);

        let s = step(&s, Msg::SelectRecipe(recipe(2, "Soup")));
        assert!(!s.is_create_form_visible());
        assert_eq!(s.view_mode(), ViewMode::Editing);
    }

    #[test]
    fn mutual_exclusion_holds_over_any_sequence() {
        let intents = [
            Msg::ShowCreateForm,
            Msg::SelectRecipe(recipe(1, "Pasta")),
            Msg::HideCreateForm,
            Msg::ShowCreateForm,
            Msg::UnselectRecipe,
            Msg::SelectById(RecipeId::Numeric(2)),
            Msg::SetSearchTerm("so".into()),
            Msg::ShowCreateForm,
            Msg::ShowAll,
            Msg::SelectRecipe(recipe(2, "Soup")),
            Msg::CancelCreate,
        ];
        let mut s = two();
        for msg in intents {
            s = step(&s, msg);
            assert!(
                !(s.selection().is_some() && s.is_create_form_visible()),
                "selection and create form both active"
            );
        }
    }

    #[test]
    fn unselect_keeps_create_form_flag() {
        let s = step(&two(), Msg::ShowCreateForm);
        let s = step(&s, Msg::UnselectRecipe);
        assert_eq!(s.view_mode(), ViewMode::Creating);
    }

    #[test]
    fn cancel_create_resets_draft_but_hide_keeps_it() {
        let s = step(&two(), Msg::ShowCreateForm);
        let s = step(
            &s,
            Msg::PatchField {
                target: FormTarget::Draft,
                field: RecipeField::Title,
                value: "Tart".into(),
            },
        );

        let hidden = step(&s, Msg::HideCreateForm);
        assert!(!hidden.is_create_form_visible());
        assert_eq!(hidden.draft().title, "Tart");

        let cancelled = step(&s, Msg::CancelCreate);
        assert!(!cancelled.is_create_form_visible());
        assert_eq!(cancelled.draft(), &RecipeDraft::default());
        assert_eq!(cancelled.view_mode(), ViewMode::Browsing);
    }

    #[test]
    fn selection_is_a_detached_copy() {
        let s = step(&two(), Msg::SelectById(RecipeId::Numeric(1)));
        let s = step(
            &s,
            Msg::PatchField {
                target: FormTarget::Selection,
                field: RecipeField::Title,
                value: "Lasagne".into(),
            },
        );
        assert_eq!(s.selection().unwrap().title, "Lasagne");
        assert_eq!(s.find(&RecipeId::Numeric(1)).unwrap().title, "Pasta");
    }

    #[test]
    fn select_unknown_id_is_rejected() {
        let err = reduce(&two(), Msg::SelectById(RecipeId::Numeric(9))).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn show_all_resets_every_facet() {
        let s = step(&two(), Msg::SetSearchTerm("pasta".into()));
        let s = step(&s, Msg::SelectRecipe(recipe(1, "Pasta")));
        let s = step(&s, Msg::ShowAll);
        assert_eq!(s.search_term(), "");
        assert!(s.selection().is_none());
        assert!(!s.is_create_form_visible());
        assert_eq!(s.view_mode(), ViewMode::Browsing);
        assert_eq!(s.displayed().len(), 2);
    }

    #[test]
    fn search_term_filters_displayed_but_not_collection() {
        let s = step(&two(), Msg::SetSearchTerm("so".into()));
        let shown: Vec<_> = s.displayed().iter().map(|r| r.id.clone()).collect();
        assert_eq!(shown, vec![RecipeId::Numeric(2)]);
        assert_eq!(s.recipes().len(), 2);
    }

    // ── Form patches ────────────────────────────────────────────────

    #[test]
    fn patching_missing_selection_is_rejected() {
        let err = reduce(
            &two(),
            Msg::PatchField {
                target: FormTarget::Selection,
                field: RecipeField::Title,
                value: "x".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err, CoreError::NoSelection);
    }

    #[test]
    fn draft_patch_leaves_old_snapshot_alone() {
        let before = two();
        let after = step(
            &before,
            Msg::PatchField {
                target: FormTarget::Draft,
                field: RecipeField::Servings,
                value: "4".into(),
            },
        );
        assert_eq!(after.draft().servings, 4);
        assert_eq!(before.draft().servings, 1);
    }

    // ── Create ──────────────────────────────────────────────────────

    #[test]
    fn submit_create_requests_current_draft() {
        let s = step(&two(), Msg::ShowCreateForm);
        let s = step(
            &s,
            Msg::PatchField {
                target: FormTarget::Draft,
                field: RecipeField::Title,
                value: "Cake".into(),
            },
        );
        let (s, effects) = reduce(&s, Msg::SubmitCreate).unwrap();

        let expected = RecipeDraft {
            title: "Cake".into(),
            ..RecipeDraft::default()
        };
        assert_eq!(effects, vec![Effect::Request(Request::Create(expected))]);
        assert!(s.is_pending());
        assert_eq!(s.recipes().len(), 2, "no optimistic insert");
    }

    #[test]
    fn created_appends_server_record_and_resets_form() {
        let s = step(&two(), Msg::ShowCreateForm);
        let s = step(
            &s,
            Msg::PatchField {
                target: FormTarget::Draft,
                field: RecipeField::Title,
                value: "Cake".into(),
            },
        );
        let s = step(&s, Msg::SubmitCreate);
        let (s, effects) = reduce(&s, Msg::Created(Ok(recipe(3, "Cake")))).unwrap();

        assert_eq!(
            ids(&s),
            vec![RecipeId::Numeric(1), RecipeId::Numeric(2), RecipeId::Numeric(3)]
        );
        assert!(!s.is_create_form_visible());
        assert_eq!(s.draft(), &RecipeDraft::default());
        assert_eq!(s.pending(), 0);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Notify(n)] if n.kind == NotificationKind::Success
        ));
    }

    #[test]
    fn failed_create_keeps_form_and_input() {
        let s = step(&two(), Msg::ShowCreateForm);
        let s = step(
            &s,
            Msg::PatchField {
                target: FormTarget::Draft,
                field: RecipeField::Title,
                value: "Cake".into(),
            },
        );
        let s = step(&s, Msg::SubmitCreate);
        let (s, effects) = reduce(&s, Msg::Created(Err(server_error()))).unwrap();

        assert!(s.is_create_form_visible());
        assert_eq!(s.draft().title, "Cake");
        assert_eq!(s.recipes().len(), 2);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Notify(n)] if n.is_error() && n.failure == Some(FailureKind::Server)
        ));
    }

    // ── Update ──────────────────────────────────────────────────────

    #[test]
    fn submit_update_without_selection_is_rejected() {
        let err = reduce(&two(), Msg::SubmitUpdate).unwrap_err();
        assert_eq!(err, CoreError::NoSelection);
    }

    #[test]
    fn updated_replaces_in_place_with_server_value() {
        let start = two();
        let untouched = Arc::clone(&start.recipes()[0]);
        let s = step(&start, Msg::SelectById(RecipeId::Numeric(2)));
        let s = step(&s, Msg::SubmitUpdate);

        let mut from_server = recipe(2, "Soup (server)");
        from_server.servings = 6;
        let s = step(
            &s,
            Msg::Updated {
                id: RecipeId::Numeric(2),
                result: Ok(from_server.clone()),
            },
        );

        assert_eq!(ids(&s), vec![RecipeId::Numeric(1), RecipeId::Numeric(2)]);
        assert_eq!(*s.recipes()[1], from_server);
        assert!(Arc::ptr_eq(&s.recipes()[0], &untouched));
        assert!(s.selection().is_none());
    }

    #[test]
    fn failed_update_still_closes_editor() {
        let s = step(&two(), Msg::SelectById(RecipeId::Numeric(2)));
        let s = step(&s, Msg::SubmitUpdate);
        let (s, effects) = reduce(
            &s,
            Msg::Updated {
                id: RecipeId::Numeric(2),
                result: Err(server_error()),
            },
        )
        .unwrap();

        assert!(s.selection().is_none());
        assert_eq!(s.find(&RecipeId::Numeric(2)).unwrap().title, "Soup");
        assert!(matches!(effects.as_slice(), [Effect::Notify(n)] if n.is_error()));
    }

    #[test]
    fn update_for_vanished_recipe_does_not_resurrect_it() {
        let s = RecipeState::with_recipes([recipe(1, "Pasta")]);
        let s = step(
            &s,
            Msg::Updated {
                id: RecipeId::Numeric(2),
                result: Ok(recipe(2, "Soup")),
            },
        );
        assert_eq!(ids(&s), vec![RecipeId::Numeric(1)]);
    }

    // ── Delete ──────────────────────────────────────────────────────

    #[test]
    fn deleted_removes_entry_and_clears_selection() {
        let s = step(&two(), Msg::SelectById(RecipeId::Numeric(2)));
        let s = step(&s, Msg::SubmitDelete(RecipeId::Numeric(2)));
        let s = step(
            &s,
            Msg::Deleted {
                id: RecipeId::Numeric(2),
                result: Ok(()),
            },
        );
        assert_eq!(ids(&s), vec![RecipeId::Numeric(1)]);
        assert!(s.selection().is_none());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn failed_delete_changes_nothing() {
        let s = step(&two(), Msg::SelectById(RecipeId::Numeric(2)));
        let s = step(&s, Msg::SubmitDelete(RecipeId::Numeric(2)));
        let s = step(
            &s,
            Msg::Deleted {
                id: RecipeId::Numeric(2),
                result: Err(server_error()),
            },
        );
        assert_eq!(ids(&s), vec![RecipeId::Numeric(1), RecipeId::Numeric(2)]);
        assert_eq!(s.selection().unwrap().id, RecipeId::Numeric(2));
    }

    #[test]
    fn deleting_absent_id_removes_nothing() {
        let s = step(
            &two(),
            Msg::Deleted {
                id: RecipeId::Numeric(7),
                result: Ok(()),
            },
        );
        assert_eq!(s.recipes().len(), 2);
    }

    // ── Load ────────────────────────────────────────────────────────

    #[test]
    fn failed_load_keeps_empty_collection() {
        let s = step(&RecipeState::default(), Msg::Load);
        assert!(s.is_pending());
        let (s, effects) = reduce(
            &s,
            Msg::Loaded(Err(CoreError::Transport {
                message: "refused".into(),
            })),
        )
        .unwrap();
        assert!(s.recipes().is_empty());
        assert!(!s.is_loaded());
        assert!(!s.is_pending());
        assert!(matches!(
            effects.as_slice(),
            [Effect::Notify(n)] if n.failure == Some(FailureKind::Transport)
        ));
    }

    #[test]
    fn loaded_replaces_collection_silently() {
        let s = step(&RecipeState::default(), Msg::Load);
        let (s, effects) = reduce(&s, Msg::Loaded(Ok(vec![recipe(4, "Bread")]))).unwrap();
        assert_eq!(ids(&s), vec![RecipeId::Numeric(4)]);
        assert!(s.is_loaded());
        assert!(effects.is_empty());
    }
}
