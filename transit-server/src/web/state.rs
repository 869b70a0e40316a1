//! Application state for the web layer.

use std::sync::Arc;

use crate::accounts::Accounts;
use crate::cache::CachedRouteService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route planner over the station graph, with memoized answers
    pub routes: Arc<CachedRouteService>,

    /// User accounts and wallets
    pub accounts: Accounts,

    /// WhatsApp number the contact page redirects to
    pub contact_number: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: CachedRouteService, accounts: Accounts, contact_number: &str) -> Self {
        Self {
            routes: Arc::new(routes),
            accounts,
            contact_number: Arc::from(contact_number),
        }
    }
}
