// Async HTTP client for the recipe collection endpoint.
//
// Base path: {base}/api/recipes
// Wraps `reqwest::Client` with URL construction, `{recipe}` envelope
// unwrapping, and `{error}` body parsing. Callers reconcile results into
// their own state -- this client holds none.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{ErrorBody, NewRecipe, RecipeEnvelope, RecipeRecord, RecordId};

const COLLECTION_PATH: &str = "api/recipes";

/// Raw HTTP client for the recipe collection.
///
/// Every method performs exactly one request; there is no retry layer.
pub struct RecipeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RecipeClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client from a base URL and transport config.
    ///
    /// The `base_url` is the server root (e.g. `http://localhost:5000`);
    /// any path prefix is preserved and `api/recipes` is joined beneath it.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn collection_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(COLLECTION_PATH)?)
    }

    /// `{base}/api/recipes/{id}`, with the id percent-encoded as one segment.
    fn record_url(&self, id: &RecordId) -> Result<Url, Error> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(&id.to_string());
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..floor_char_boundary(&body, 200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorBody>(&raw) {
            Ok(ErrorBody {
                error: Some(msg), ..
            })
            | Ok(ErrorBody {
                error: None,
                message: Some(msg),
            }) => msg,
            _ if raw.trim().is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Server {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /api/recipes` -- the full collection in server order.
    pub async fn list_recipes(&self) -> Result<Vec<RecipeRecord>, Error> {
        self.get(self.collection_url()?).await
    }

    /// `POST /api/recipes` -- returns the persisted record with its new id.
    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<RecipeRecord, Error> {
        let envelope: RecipeEnvelope = self.post(self.collection_url()?, recipe).await?;
        Ok(envelope.recipe)
    }

    /// `PUT /api/recipes/{id}` -- returns the server's post-update record.
    pub async fn update_recipe(
        &self,
        id: &RecordId,
        recipe: &NewRecipe,
    ) -> Result<RecipeRecord, Error> {
        let envelope: RecipeEnvelope = self.put(self.record_url(id)?, recipe).await?;
        Ok(envelope.recipe)
    }

    /// `DELETE /api/recipes/{id}`.
    pub async fn delete_recipe(&self, id: &RecordId) -> Result<(), Error> {
        self.delete(self.record_url(id)?).await
    }
}

/// Largest byte index `<= max` that falls on a char boundary of `s`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
