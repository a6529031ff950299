//! The currently logged-in user.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedInUser {
    pub email: String,
    pub paymail: String,
    #[serde(default)]
    pub balance: u64,
}
