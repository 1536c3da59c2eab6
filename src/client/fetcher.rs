use std::fmt;
use async_trait::async_trait;
use http::StatusCode;
use serde::Deserialize;
use typed_builder::TypedBuilder;
use url::Url;
use crate::client::CursorParams;
use crate::model::LeaderboardPage;

/// Source of leaderboard pages for a [`crate::client::LeaderboardCursor`].
#[async_trait]
pub trait UsersFetcher: Send + Sync {
    async fn fetch_users(&self, params: &CursorParams) -> Result<LeaderboardPage, ClientError>;
}

/// Fetches pages from a running xpboard server.
///
/// `base_url` must end with a slash when the service is mounted below a path prefix,
/// e.g. `https://example.org/leaderboard/`.
#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpUsersFetcher {
    base_url: Url,
    #[builder(default = reqwest::Client::new())]
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl UsersFetcher for HttpUsersFetcher {

    async fn fetch_users(&self, params: &CursorParams) -> Result<LeaderboardPage, ClientError> {
        let url = self.base_url.join("api/users")?;
        let response = self.client
            .get(url)
            .query(&params.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => "Failed to fetch users".to_string(),
            };
            return Err(ClientError::Status { status, message });
        }
        let page = response.json::<LeaderboardPage>().await?;
        Ok(page)
    }
}

#[derive(Debug)]
pub enum ClientError {
    Url(url::ParseError),
    Transport(reqwest::Error),
    Decode(reqwest::Error),
    Status { status: StatusCode, message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Url(err) => write!(f, "Invalid leaderboard url: {}", err),
            ClientError::Transport(err) => write!(f, "Failed to fetch users: {}", err),
            ClientError::Decode(err) => write!(f, "Unreadable leaderboard response: {}", err),
            ClientError::Status { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Url(e) => Some(e),
            ClientError::Transport(e) => Some(e),
            ClientError::Decode(e) => Some(e),
            ClientError::Status { .. } => None,
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Url(err)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err)
        } else {
            ClientError::Transport(err)
        }
    }
}
