//! Transit fare companion server.
//!
//! A web application that answers: "which stations do I pass through to
//! get from here to there?", and keeps a fare wallet with a transaction
//! history for each user.

pub mod accounts;
pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
