/// State management module
///
/// This module handles all application state, including:
/// - The compiled-in frame catalog (catalog.rs)
/// - Shared data structures (data.rs)
/// - Session state: uploaded photo and selected frame (session.rs)
/// - Configuration loaded at startup (config.rs)

pub mod catalog;
pub mod config;
pub mod data;
pub mod session;
