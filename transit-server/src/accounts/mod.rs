//! User accounts and wallets.
//!
//! Signup, login, balance top-ups and charges with a transaction
//! history, and favorite stations, over a pluggable user store.

mod error;
mod service;
mod store;
mod user;

pub use error::AccountError;
pub use service::{Accounts, MIN_PASSWORD_LEN, NewUser};
pub use store::{JsonUserStore, MemoryUserStore, StoreError, UserStore};
pub use user::{Favorite, HistoryEntry, User};
