//! REST API client for the land-registry backend.
//!
//! Wraps the backend's land, land-owner, ownership-history, user, user-log
//! and notification endpoints using [`reqwest`]. Every request carries the
//! session token as a bearer credential when one is attached.

use landreg_core::store::{SessionStore, SessionStoreError};
use landreg_core::types::DbId;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{
    Credentials, Land, LandOwner, LandSearch, LandSort, NewLand, NewLandOwner, Notification,
    OwnershipHistory, Page, PageRequest, PasswordChange, UsageType, User, UserLog,
    UsernameChange,
};

/// Body the login endpoint returns instead of a token on bad credentials.
const LOGIN_FAILURE_BODY: &str = "fail";

/// HTTP client for the land-registry backend.
#[derive(Debug, Clone)]
pub struct LandRegistryApi {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl LandRegistryApi {
    /// Create an anonymous client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:8080`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across requests).
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            token: None,
        }
    }

    /// A copy of this client that authenticates as `token`.
    pub fn authorized(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            api_url: self.api_url.clone(),
            token: Some(token.into()),
        }
    }

    /// A copy of this client using whatever token `store` currently holds.
    pub fn from_session<S: SessionStore + ?Sized>(&self, store: &S) -> Result<Self, SessionStoreError> {
        Ok(match store.get()? {
            Some(token) => self.authorized(token),
            None => Self {
                token: None,
                ..self.clone()
            },
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- users & sessions ----

    /// Exchange credentials for a session token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self
            .request(Method::POST, "/user/login")
            .json(credentials)
            .send()
            .await?;
        let token = Self::ensure_success(response).await?.text().await?;
        let token = token.trim().trim_matches('"').to_string();
        if token.is_empty() || token == LOGIN_FAILURE_BODY {
            return Err(ApiError::InvalidCredentials);
        }
        Ok(token)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/user/register")
            .json(credentials)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Tell the backend the current token is no longer in use.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send_empty(Method::POST, "/user/logout").await
    }

    /// Role name of the user the token belongs to.
    pub async fn current_role(&self) -> Result<String, ApiError> {
        let response = self.request(Method::GET, "/user/get-role").send().await?;
        let role = Self::ensure_success(response).await?.text().await?;
        Ok(role.trim().trim_matches('"').to_string())
    }

    pub async fn list_users(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        self.get_json_query("/user/get-users", &page).await
    }

    pub async fn get_user(&self, user_id: DbId) -> Result<User, ApiError> {
        self.get_json(&format!("/user/get-user/{user_id}")).await
    }

    pub async fn delete_user(&self, user_id: DbId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/user/delete/{user_id}"))
            .await
    }

    pub async fn set_user_role(&self, user_id: DbId, role: &str) -> Result<(), ApiError> {
        self.send_empty(Method::PUT, &format!("/user/set-role/{user_id}/{role}"))
            .await
    }

    pub async fn list_user_logs(&self, page: PageRequest) -> Result<Page<UserLog>, ApiError> {
        self.get_json_query("/user-log/records", &page).await
    }

    pub async fn list_logs_for_user(
        &self,
        user_id: DbId,
        page: PageRequest,
    ) -> Result<Page<UserLog>, ApiError> {
        self.get_json_query(&format!("/user-log/records/{user_id}"), &page)
            .await
    }

    /// Activity of the user the token belongs to.
    pub async fn current_user_logs(&self, page: PageRequest) -> Result<Page<UserLog>, ApiError> {
        self.get_json_query("/user-log/current-user", &page).await
    }

    /// The backend invalidates existing tokens once this succeeds.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.send_json(Method::PUT, "/user/change-password", change)
            .await
    }

    /// Rename the signed-in user. Existing tokens name the old username.
    pub async fn update_current_user(&self, change: &UsernameChange) -> Result<(), ApiError> {
        self.send_json(Method::PUT, "/user/update-current-user", change)
            .await
    }

    // ---- lands ----

    pub async fn list_lands(
        &self,
        sort: LandSort,
        page: PageRequest,
    ) -> Result<Page<Land>, ApiError> {
        self.get_json_query(&format!("/land/records-paged/{}", sort.as_str()), &page)
            .await
    }

    /// Lands whose surface area lies in `min..=max` square meters.
    pub async fn lands_by_surface_area(
        &self,
        min: f64,
        max: f64,
        sort: LandSort,
        page: PageRequest,
    ) -> Result<Page<Land>, ApiError> {
        let path = format!("/land/surface-area-paged/{min}/{max}/{}", sort.as_str());
        self.get_json_query(&path, &page).await
    }

    pub async fn search_lands(
        &self,
        search: &LandSearch,
        page: PageRequest,
    ) -> Result<Page<Land>, ApiError> {
        let response = self
            .request(Method::GET, "/land/search")
            .query(search)
            .query(&page)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Lands that have no current owner.
    pub async fn unassigned_lands(&self) -> Result<Vec<Land>, ApiError> {
        self.get_json("/land/get-unassigned-lands").await
    }

    pub async fn get_land(&self, land_id: DbId) -> Result<Land, ApiError> {
        self.get_json(&format!("/land/get/{land_id}")).await
    }

    pub async fn add_land(&self, land: &NewLand) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/land/add", land).await
    }

    pub async fn update_usage_type(&self, land_id: DbId, usage: UsageType) -> Result<(), ApiError> {
        self.send_empty(
            Method::PUT,
            &format!("/land/update-usage-type/{land_id}/{}", usage.as_str()),
        )
        .await
    }

    pub async fn delete_land(&self, land_id: DbId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/land/delete/{land_id}"))
            .await
    }

    /// Transfer a parcel to a new owner. The backend records the history.
    pub async fn assign_owner(&self, land_id: DbId, owner_id: DbId) -> Result<(), ApiError> {
        self.send_empty(
            Method::POST,
            &format!("/land-owner/{land_id}/assign-owner/{owner_id}"),
        )
        .await
    }

    // ---- owners ----

    pub async fn list_owners(&self, page: PageRequest) -> Result<Page<LandOwner>, ApiError> {
        self.get_json_query("/land-owner/owners", &page).await
    }

    pub async fn add_owner(&self, owner: &NewLandOwner) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/land-owner/add", owner).await
    }

    pub async fn get_owner(&self, owner_id: DbId) -> Result<LandOwner, ApiError> {
        self.get_json(&format!("/land-owner/{owner_id}")).await
    }

    pub async fn owner_lands(&self, owner_id: DbId) -> Result<Vec<Land>, ApiError> {
        self.get_json(&format!("/land-owner/lands/{owner_id}")).await
    }

    // ---- ownership history ----

    pub async fn list_history(&self) -> Result<Vec<OwnershipHistory>, ApiError> {
        self.get_json("/ownership-history/records").await
    }

    pub async fn history_by_land(
        &self,
        land_id: DbId,
        page: PageRequest,
    ) -> Result<Page<OwnershipHistory>, ApiError> {
        self.history_by("/ownership-history/land", land_id, page).await
    }

    pub async fn history_by_owner(
        &self,
        owner_id: DbId,
        page: PageRequest,
    ) -> Result<Page<OwnershipHistory>, ApiError> {
        self.history_by("/ownership-history/owner", owner_id, page).await
    }

    // ---- notifications ----

    pub async fn my_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get_json("/notifications/my").await
    }

    pub async fn mark_notification_read(&self, notification_id: DbId) -> Result<(), ApiError> {
        self.send_empty(
            Method::PUT,
            &format!("/notifications/{notification_id}/mark-read"),
        )
        .await
    }

    // ---- private helpers ----

    /// Start a request to `path`, attaching the bearer token if present.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(%method, path, authenticated = self.token.is_some(), "Backend request");
        let builder = self
            .client
            .request(method, format!("{}{}", self.api_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn history_by(
        &self,
        path: &str,
        id: DbId,
        page: PageRequest,
    ) -> Result<Page<OwnershipHistory>, ApiError> {
        let response = self
            .request(Method::GET, path)
            .query(&page)
            .query(&[("id", id)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Self::parse_response(response).await
    }

    async fn get_json_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::parse_response(response).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.request(method, path).send().await?;
        Self::check_status(response).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.request(method, path).json(body).send().await?;
        Self::check_status(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), %body, "Backend returned an error");
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
