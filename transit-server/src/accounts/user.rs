//! User records as persisted by the user store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A wallet transaction.
///
/// Positive amounts are credits, negative amounts are debits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(alias = "data")]
    pub date: DateTime<Utc>,
    #[serde(alias = "descricao")]
    pub description: String,
    #[serde(alias = "valor")]
    pub amount: f64,
}

/// A station the user pinned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(alias = "idEstacao")]
    pub station_id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "linha")]
    pub line: String,
}

/// A registered user with their wallet.
///
/// The password is kept as given; it is never included in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(alias = "username", alias = "nome")]
    pub name: String,
    pub email: String,
    #[serde(alias = "senha")]
    pub password: String,
    #[serde(default, alias = "saldo")]
    pub balance: f64,
    #[serde(default, alias = "historico")]
    pub history: Vec<HistoryEntry>,
    #[serde(default, alias = "favoritos")]
    pub favorites: Vec<Favorite>,
}

impl User {
    /// Create a user with an empty wallet.
    pub fn new(id: u64, name: &str, email: &str, password: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            balance: 0.0,
            history: Vec::new(),
            favorites: Vec::new(),
        }
    }
}
