//! # Recipe Backend Client
//!
//! Session handling, request construction and the REST operations of the
//! recipe backend.
//!
//! ## Modules
//!
//! - [`session`] - token and admin flag held for the current session
//! - [`headers`] - JSON and bearer headers derived from the session
//! - [`transport`] - request/response shapes and the `reqwest` transport
//! - [`client`] - the API operations and their status interpretation
//! - [`types`] - entities, request bodies and paging types
//! - [`error`] - the failure taxonomy shared by all operations
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_client::client::{RecipeClient, SessionStore};
//!
//! # async fn example() -> Result<(), recipe_client::client::ClientError> {
//! let session = SessionStore::in_memory();
//! let client = RecipeClient::new("http://localhost:8081", session.clone());
//!
//! client.login("chef", "secret").await?;
//! let recipes = client.search_recipes("soup").await?;
//! println!("Found {} recipes", recipes.len());
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
pub mod headers;
pub mod session;
pub mod transport;
pub mod types;

pub use client::RecipeClient;
pub use error::ClientError;
pub use headers::build_headers;
pub use session::{KeyValueStore, MemoryStorage, SessionStore};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use types::*;
