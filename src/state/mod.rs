/// State management module
///
/// This module handles all application state, including:
/// - API payload structures (data.rs)
/// - Query parameters and numeric coercion (query.rs)
/// - The browser state machine driving fetches and selection (browser.rs)

pub mod browser;
pub mod data;
pub mod query;
