//! Typed endpoint surface
//!
//! One method per Moltbook API operation. All of them funnel through
//! [`MoltbookClient::perform`] / [`MoltbookClient::perform_empty`], so the
//! classification behavior tested in `client.rs` applies uniformly.

use reqwest::Method;

use moltpass_domain::{
    Agent, Comment, CommentsResponse, FeedResponse, FeedSort, NewComment, NewPost, Post,
    RegisterRequest, RegistrationResponse, SearchResponse, SearchScope, StatusResponse,
    SubmoltsResponse, VoteDirection, VoteRequest,
};

use super::client::MoltbookClient;
use super::errors::ApiError;

impl MoltbookClient {
    /// Register a new agent. Unauthenticated; the response carries the
    /// credential material for the new identity.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn register(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RegistrationResponse, ApiError> {
        let body = RegisterRequest { name: name.to_string(), description: description.to_string() };
        self.perform(self.request(Method::POST, "/agents/register").json(&body)).await
    }

    /// Fetch the claim status of the currently held credential.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn check_status(&self) -> Result<StatusResponse, ApiError> {
        self.perform(self.request(Method::GET, "/agents/status")).await
    }

    /// Fetch the home feed.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn feed(
        &self,
        sort: FeedSort,
        cursor: Option<&str>,
    ) -> Result<FeedResponse, ApiError> {
        let endpoint = paged("/posts", sort, cursor);
        self.perform(self.request(Method::GET, &endpoint)).await
    }

    /// Fetch the feed of a single submolt.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn submolt_feed(
        &self,
        name: &str,
        sort: FeedSort,
        cursor: Option<&str>,
    ) -> Result<FeedResponse, ApiError> {
        let base = format!("/submolts/{}/posts", urlencoding::encode(name));
        let endpoint = paged(&base, sort, cursor);
        self.perform(self.request(Method::GET, &endpoint)).await
    }

    /// Fetch a single post.
    ///
    /// # Errors
    /// Standard gateway classification; a deleted post surfaces as
    /// [`ApiError::NotFound`].
    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let endpoint = format!("/posts/{}", urlencoding::encode(id));
        self.perform(self.request(Method::GET, &endpoint)).await
    }

    /// Create a post.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn create_post(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        self.perform(self.request(Method::POST, "/posts").json(new_post)).await
    }

    /// Delete one of the agent's own posts.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let endpoint = format!("/posts/{}", urlencoding::encode(id));
        self.perform_empty(self.request(Method::DELETE, &endpoint)).await
    }

    /// Fetch the comment tree of a post.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn comments(&self, post_id: &str) -> Result<CommentsResponse, ApiError> {
        let endpoint = format!("/posts/{}/comments", urlencoding::encode(post_id));
        self.perform(self.request(Method::GET, &endpoint)).await
    }

    /// Comment on a post, optionally as a reply to another comment.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn create_comment(
        &self,
        post_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment, ApiError> {
        let endpoint = format!("/posts/{}/comments", urlencoding::encode(post_id));
        let body = NewComment {
            content: content.to_string(),
            parent_id: parent_id.map(ToString::to_string),
        };
        self.perform(self.request(Method::POST, &endpoint).json(&body)).await
    }

    /// Vote on a post.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn vote_post(&self, id: &str, direction: VoteDirection) -> Result<(), ApiError> {
        let endpoint = format!("/posts/{}/vote", urlencoding::encode(id));
        self.perform_empty(self.request(Method::POST, &endpoint).json(&VoteRequest::from(direction)))
            .await
    }

    /// Vote on a comment.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn vote_comment(&self, id: &str, direction: VoteDirection) -> Result<(), ApiError> {
        let endpoint = format!("/comments/{}/vote", urlencoding::encode(id));
        self.perform_empty(self.request(Method::POST, &endpoint).json(&VoteRequest::from(direction)))
            .await
    }

    /// Fetch the submolts the agent is subscribed to.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn subscribed_submolts(&self) -> Result<SubmoltsResponse, ApiError> {
        self.perform(self.request(Method::GET, "/submolts/subscribed")).await
    }

    /// Fetch the most popular submolts.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn popular_submolts(&self) -> Result<SubmoltsResponse, ApiError> {
        self.perform(self.request(Method::GET, "/submolts/popular")).await
    }

    /// Subscribe to a submolt.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn subscribe(&self, name: &str) -> Result<(), ApiError> {
        let endpoint = format!("/submolts/{}/subscribe", urlencoding::encode(name));
        self.perform_empty(self.request(Method::POST, &endpoint)).await
    }

    /// Unsubscribe from a submolt.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn unsubscribe(&self, name: &str) -> Result<(), ApiError> {
        let endpoint = format!("/submolts/{}/unsubscribe", urlencoding::encode(name));
        self.perform_empty(self.request(Method::POST, &endpoint)).await
    }

    /// Search posts, agents, and submolts.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn search(&self, query: &str, scope: SearchScope) -> Result<SearchResponse, ApiError> {
        let endpoint =
            format!("/search?q={}&scope={}", urlencoding::encode(query), scope.as_str());
        self.perform(self.request(Method::GET, &endpoint)).await
    }

    /// Fetch the authenticated agent's own profile.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn me(&self) -> Result<Agent, ApiError> {
        self.perform(self.request(Method::GET, "/agents/me")).await
    }

    /// Fetch another agent's public profile by name.
    ///
    /// # Errors
    /// Standard gateway classification.
    pub async fn profile(&self, name: &str) -> Result<Agent, ApiError> {
        let endpoint = format!("/agents/profile?name={}", urlencoding::encode(name));
        self.perform(self.request(Method::GET, &endpoint)).await
    }
}

/// Append sort and cursor query parameters to a feed endpoint.
fn paged(base: &str, sort: FeedSort, cursor: Option<&str>) -> String {
    match cursor {
        Some(cursor) => {
            format!("{base}?sort={}&cursor={}", sort.as_str(), urlencoding::encode(cursor))
        }
        None => format!("{base}?sort={}", sort.as_str()),
    }
}

#[cfg(test)]
mod tests {
    //! Endpoint shape tests: paths, query strings, and request bodies.
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    fn client_for(server: &MockServer) -> MoltbookClient {
        let client =
            MoltbookClient::new(ApiConfig { base_url: server.uri(), ..ApiConfig::default() });
        client.set_api_key("test-key");
        client
    }

    #[test]
    fn paged_encodes_cursor() {
        assert_eq!(paged("/posts", FeedSort::Hot, None), "/posts?sort=hot");
        assert_eq!(
            paged("/posts", FeedSort::New, Some("a b")),
            "/posts?sort=new&cursor=a%20b"
        );
    }

    #[tokio::test]
    async fn register_sends_name_and_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/agents/register"))
            .and(body_json(serde_json::json!({
                "name": "feedbot",
                "description": "reads the feed"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "agent": {
                    "api_key": "k1",
                    "verification_code": "V1",
                    "claim_url": "https://moltbook.test/claim/1"
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client.register("feedbot", "reads the feed").await.unwrap();
        assert!(response.success);
        assert_eq!(response.agent.api_key, "k1");
    }

    #[tokio::test]
    async fn feed_passes_sort_and_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("sort", "top"))
            .and(query_param("cursor", "c42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "posts": [],
                "next_cursor": "c43"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let feed = client.feed(FeedSort::Top, Some("c42")).await.unwrap();
        assert!(feed.posts.is_empty());
        assert_eq!(feed.next_cursor.as_deref(), Some("c43"));
    }

    #[tokio::test]
    async fn vote_post_sends_signed_direction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts/p1/vote"))
            .and(body_json(serde_json::json!({"direction": -1})))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.vote_post("p1", VoteDirection::Down).await.unwrap();
    }

    #[tokio::test]
    async fn unsubscribe_posts_to_the_unsubscribe_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submolts/rustaceans/unsubscribe"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.unsubscribe("rustaceans").await.unwrap();
    }

    #[tokio::test]
    async fn profile_passes_the_name_as_a_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/agents/profile"))
            .and(query_param("name", "feedbot"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "a1",
                "name": "feedbot"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let agent = client.profile("feedbot").await.unwrap();
        assert_eq!(agent.name, "feedbot");
    }

    #[tokio::test]
    async fn search_scopes_the_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "borrow checker"))
            .and(query_param("scope", "posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "posts": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let results = client.search("borrow checker", SearchScope::Posts).await.unwrap();
        assert_eq!(results.posts.as_deref(), Some(&[][..]));
        assert!(results.agents.is_none());
    }
}
