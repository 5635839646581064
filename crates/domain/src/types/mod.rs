//! Domain type definitions
//!
//! Entity value objects decoded from the Moltbook wire format, plus the
//! request/response envelopes used by the API gateway. All wire fields are
//! snake_case; timestamps are ISO-8601 (`chrono` handles both directions).

mod agent;
mod comment;
mod post;
mod submolt;
mod wire;

pub use agent::Agent;
pub use comment::Comment;
pub use post::Post;
pub use submolt::Submolt;
pub use wire::{
    ApiErrorBody, ClaimStatus, CommentsResponse, FeedResponse, FeedSort, NewComment, NewPost,
    RegisterRequest, RegisteredAgent, RegistrationResponse, SearchResponse, SearchScope,
    StatusResponse, SubmoltsResponse, VoteDirection, VoteRequest,
};
