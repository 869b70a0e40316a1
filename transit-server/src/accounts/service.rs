//! Account and wallet operations.
//!
//! Every operation is a load-modify-save sequence against the user
//! store, serialized by an async mutex. This keeps a single process
//! consistent; several processes sharing one store file are not.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use super::error::AccountError;
use super::store::UserStore;
use super::user::{Favorite, HistoryEntry, User};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signup details.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Account service over a user store.
#[derive(Clone)]
pub struct Accounts {
    store: Arc<Mutex<Box<dyn UserStore>>>,
}

impl Accounts {
    pub fn new(store: impl UserStore + 'static) -> Self {
        let store: Box<dyn UserStore> = Box::new(store);
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// The id the next registered user will get.
    pub async fn next_id(&self) -> Result<u64, AccountError> {
        let store = self.store.lock().await;
        let users = store.load()?;
        next_id(&users)
    }

    /// Register a new user.
    ///
    /// The email is stored trimmed and lowercased.
    pub async fn sign_up(&self, new_user: NewUser) -> Result<User, AccountError> {
        validate_signup(&new_user)?;
        let email = normalize_email(&new_user.email);

        let store = self.store.lock().await;
        let mut users = store.load()?;

        if users.iter().any(|u| normalize_email(&u.email) == email) {
            return Err(AccountError::EmailTaken);
        }

        let user = User::new(
            next_id(&users)?,
            new_user.name.trim(),
            &email,
            &new_user.password,
        );
        users.push(user.clone());
        store.save(&users)?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// Email comparison ignores case; passwords are compared exactly.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let store = self.store.lock().await;
        let users = store.load()?;
        let email = normalize_email(email);

        users
            .into_iter()
            .find(|u| normalize_email(&u.email) == email && u.password == password)
            .ok_or(AccountError::InvalidCredentials)
    }

    /// Fetch a user by id.
    pub async fn get(&self, id: u64) -> Result<User, AccountError> {
        let store = self.store.lock().await;
        store
            .load()?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or(AccountError::UserNotFound(id))
    }

    /// Credit the wallet and record the transaction.
    pub async fn top_up(&self, id: u64, amount: f64) -> Result<User, AccountError> {
        let amount = validate_amount(amount)?;
        self.update(id, |user| {
            user.balance = from_cents(to_cents(user.balance) + to_cents(amount));
            user.history.push(HistoryEntry {
                date: Utc::now(),
                description: format!("Balance top-up (+R$ {amount:.2})"),
                amount,
            });
            Ok(())
        })
        .await
    }

    /// Debit the wallet and record the transaction.
    ///
    /// Fails without changing anything when the balance cannot cover it.
    pub async fn charge(
        &self,
        id: u64,
        amount: f64,
        description: Option<&str>,
    ) -> Result<User, AccountError> {
        let amount = validate_amount(amount)?;
        self.update(id, |user| {
            let balance = to_cents(user.balance);
            if balance < to_cents(amount) {
                return Err(AccountError::InsufficientFunds {
                    balance: user.balance,
                    requested: amount,
                });
            }
            user.balance = from_cents(balance - to_cents(amount));
            let description = match description {
                Some(d) if !d.trim().is_empty() => d.to_string(),
                _ => format!("Fare payment (-R$ {amount:.2})"),
            };
            user.history.push(HistoryEntry {
                date: Utc::now(),
                description,
                amount: -amount,
            });
            Ok(())
        })
        .await
    }

    /// Pin a station for the user. A station can only be pinned once.
    pub async fn add_favorite(&self, id: u64, favorite: Favorite) -> Result<User, AccountError> {
        self.update(id, |user| {
            if user
                .favorites
                .iter()
                .any(|f| f.station_id == favorite.station_id)
            {
                return Err(AccountError::DuplicateFavorite(favorite.station_id.clone()));
            }
            user.favorites.push(favorite.clone());
            Ok(())
        })
        .await
    }

    /// Apply `change` to one user and save, or save nothing on error.
    async fn update<F>(&self, id: u64, change: F) -> Result<User, AccountError>
    where
        F: FnOnce(&mut User) -> Result<(), AccountError>,
    {
        let store = self.store.lock().await;
        let mut users = store.load()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AccountError::UserNotFound(id))?;

        change(user)?;
        let updated = user.clone();
        store.save(&users)?;
        Ok(updated)
    }
}

/// 1 for an empty store, otherwise one past the last user's id.
fn next_id(users: &[User]) -> Result<u64, AccountError> {
    match users.last() {
        None => Ok(1),
        Some(last) => last.id.checked_add(1).ok_or(AccountError::IdsExhausted),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whole cents, so that balances compare exactly.
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn validate_signup(new_user: &NewUser) -> Result<(), AccountError> {
    if new_user.name.trim().is_empty() {
        return Err(AccountError::MissingField("name"));
    }
    if new_user.email.trim().is_empty() {
        return Err(AccountError::MissingField("email"));
    }
    if new_user.password.is_empty() {
        return Err(AccountError::MissingField("password"));
    }

    let email = new_user.email.trim();
    if !email.contains('@') || !email.contains('.') || email.contains(char::is_whitespace) {
        return Err(AccountError::InvalidEmail);
    }

    if new_user.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Check a wallet amount and round it to whole cents.
fn validate_amount(amount: f64) -> Result<f64, AccountError> {
    if amount.is_finite() && to_cents(amount) > 0 {
        Ok(from_cents(to_cents(amount)))
    } else {
        Err(AccountError::InvalidAmount)
    }
}
