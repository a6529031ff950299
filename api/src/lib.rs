//! Client side of the BUX wallet backend API.
//!
//! [`WalletBackend`] is the seam every workflow talks through. [`HttpBackend`]
//! is the real implementation over `reqwest` with a cookie session; tests
//! swap in `bux_nullables::NullBackend`.

pub mod backend;
pub mod error;
pub mod http;
pub mod pagination;
pub mod response;

pub use backend::{ConfirmContact, LoginRequest, WalletBackend};
pub use error::ApiError;
pub use http::HttpBackend;
pub use pagination::{PaginationParams, SortOrder};
