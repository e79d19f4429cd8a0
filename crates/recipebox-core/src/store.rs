// ── Recipe store ──
//
// Owns the canonical `RecipeState` and the HTTP client. Every change goes
// through `reduce`, applied inside `watch::Sender::send_if_modified` so a
// completion is always reconciled against the state as it is when the
// response arrives.

use std::sync::Arc;

use recipebox_api::{NewRecipe, RecipeClient, RecordId};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::form::FormTarget;
use crate::model::{Recipe, RecipeField, RecipeId};
use crate::notify::Notification;
use crate::state::{Effect, Msg, RecipeState, Request, reduce};

const NOTIFICATION_CHANNEL_SIZE: usize = 64;

/// Client-side recipe store.
///
/// Cheaply cloneable: clones share the same state, client, and
/// notification channel, so several operations may be in flight at once.
/// Remote operations must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct RecipeStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    client: RecipeClient,
    state: watch::Sender<Arc<RecipeState>>,
    notifications: broadcast::Sender<Notification>,
}

impl RecipeStore {
    /// Build a store talking to the server described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = RecipeClient::new(config.url.as_str(), &config.transport())?;
        Ok(Self::with_client(client))
    }

    /// Build a store around an existing client.
    pub fn with_client(client: RecipeClient) -> Self {
        let (state, _) = watch::channel(Arc::new(RecipeState::default()));
        let (notifications, _) = broadcast::channel(NOTIFICATION_CHANNEL_SIZE);
        Self {
            inner: Arc::new(StoreInner {
                client,
                state,
                notifications,
            }),
        }
    }

    // ── Observation ─────────────────────────────────────────────────

    /// The current state.
    pub fn snapshot(&self) -> Arc<RecipeState> {
        Arc::clone(&self.inner.state.borrow())
    }

    /// Watch state changes. The receiver sees every snapshot published
    /// after it was created.
    pub fn subscribe(&self) -> watch::Receiver<Arc<RecipeState>> {
        self.inner.state.subscribe()
    }

    /// Receive notifications published after this call.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    /// The filtered list for the current search term.
    pub fn displayed(&self) -> Vec<Arc<Recipe>> {
        self.snapshot().displayed()
    }

    // ── Local transitions ───────────────────────────────────────────

    pub fn select_recipe(&self, recipe: Recipe) {
        self.apply_quiet(Msg::SelectRecipe(recipe));
    }

    /// Select the collection entry with `id`.
    pub fn select_by_id(&self, id: &RecipeId) -> Result<(), CoreError> {
        self.dispatch(Msg::SelectById(id.clone())).map(drop)
    }

    pub fn unselect_recipe(&self) {
        self.apply_quiet(Msg::UnselectRecipe);
    }

    pub fn show_create_form(&self) {
        self.apply_quiet(Msg::ShowCreateForm);
    }

    pub fn hide_create_form(&self) {
        self.apply_quiet(Msg::HideCreateForm);
    }

    /// Hide the create form and reset the draft to defaults.
    pub fn cancel_create(&self) {
        self.apply_quiet(Msg::CancelCreate);
    }

    /// Patch one field of the draft or of the selection.
    pub fn patch_field(
        &self,
        target: FormTarget,
        field: RecipeField,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        self.dispatch(Msg::PatchField {
            target,
            field,
            value: value.into(),
        })
        .map(drop)
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.apply_quiet(Msg::SetSearchTerm(term.into()));
    }

    /// Clear the search term, the selection, and the create form.
    pub fn show_all(&self) {
        self.apply_quiet(Msg::ShowAll);
    }

    // ── Remote operations ───────────────────────────────────────────

    /// Replace the local collection with the server's.
    ///
    /// On failure the collection is left alone and an error
    /// notification is published.
    pub async fn load(&self) -> Result<(), CoreError> {
        match self.run(Msg::Load).await? {
            Some(Msg::Loaded(result)) => result.map(drop),
            _ => Err(missing_completion("load")),
        }
    }

    /// Send the current draft to the server and append the stored record.
    pub async fn submit_create(&self) -> Result<Recipe, CoreError> {
        match self.run(Msg::SubmitCreate).await? {
            Some(Msg::Created(result)) => result,
            _ => Err(missing_completion("create")),
        }
    }

    /// Send the current selection to the server and replace the
    /// collection entry with the server's version.
    pub async fn submit_update(&self) -> Result<Recipe, CoreError> {
        match self.run(Msg::SubmitUpdate).await? {
            Some(Msg::Updated { result, .. }) => result,
            _ => Err(missing_completion("update")),
        }
    }

    /// Delete `id` on the server, then locally.
    pub async fn submit_delete(&self, id: &RecipeId) -> Result<(), CoreError> {
        match self.run(Msg::SubmitDelete(id.clone())).await? {
            Some(Msg::Deleted { result, .. }) => result,
            _ => Err(missing_completion("delete")),
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    /// Reduce `intent`, perform the requests it emits, and reduce each
    /// completion. Returns the last completion.
    ///
    /// Requests run on a spawned task. Dropping the returned future only
    /// discards the outcome; the completion is still reconciled and
    /// notified.
    async fn run(&self, intent: Msg) -> Result<Option<Msg>, CoreError> {
        let requests = self.dispatch(intent)?;
        if requests.is_empty() {
            return Ok(None);
        }

        let store = self.clone();
        let task = tokio::spawn(async move {
            let mut last = None;
            for request in requests {
                let completion = store.perform(request).await;
                store.dispatch(completion.clone())?;
                last = Some(completion);
            }
            Ok::<_, CoreError>(last)
        });

        task.await
            .map_err(|err| CoreError::Internal(format!("request task failed: {err}")))?
    }

    async fn perform(&self, request: Request) -> Msg {
        let client = &self.inner.client;
        match request {
            Request::Fetch => {
                let result: Result<Vec<Recipe>, CoreError> = client
                    .list_recipes()
                    .await
                    .map(|records| records.into_iter().map(Recipe::from).collect())
                    .map_err(CoreError::from);
                Msg::Loaded(result)
            }
            Request::Create(draft) => {
                let result = client
                    .create_recipe(&NewRecipe::from(&draft))
                    .await
                    .map(Recipe::from)
                    .map_err(CoreError::from);
                Msg::Created(result)
            }
            Request::Update(recipe) => {
                let result = client
                    .update_recipe(&RecordId::from(&recipe.id), &NewRecipe::from(&recipe))
                    .await
                    .map(Recipe::from)
                    .map_err(CoreError::from);
                Msg::Updated {
                    id: recipe.id,
                    result,
                }
            }
            Request::Delete(id) => {
                let result = client
                    .delete_recipe(&RecordId::from(&id))
                    .await
                    .map_err(CoreError::from);
                Msg::Deleted { id, result }
            }
        }
    }

    /// Apply `msg` to the latest state, publish its notifications, and
    /// hand back the requests it emitted.
    fn dispatch(&self, msg: Msg) -> Result<Vec<Request>, CoreError> {
        let mut outcome = Ok(Vec::new());
        self.inner.state.send_if_modified(|current| match reduce(current, msg) {
            Ok((next, effects)) => {
                *current = Arc::new(next);
                outcome = Ok(effects);
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });

        let mut requests = Vec::new();
        for effect in outcome? {
            match effect {
                Effect::Request(request) => requests.push(request),
                Effect::Notify(notification) => self.publish(notification),
            }
        }
        Ok(requests)
    }

    fn apply_quiet(&self, msg: Msg) {
        if let Err(err) = self.dispatch(msg) {
            warn!(error = %err, "state transition rejected");
        }
    }

    fn publish(&self, notification: Notification) {
        if notification.is_error() {
            warn!(
                operation = %notification.operation,
                message = %notification.message,
                "recipe operation failed"
            );
        } else {
            info!(
                operation = %notification.operation,
                message = %notification.message,
                "recipe operation succeeded"
            );
        }
        if self.inner.notifications.send(notification).is_err() {
            debug!("notification dropped, no subscribers");
        }
    }
}

fn missing_completion(operation: &str) -> CoreError {
    CoreError::Internal(format!("{operation} finished without a completion"))
}
