pub mod ai;
pub mod auth;
pub mod builder;
pub mod config;
pub mod course;
pub mod dashboard;
pub mod editor;
pub mod errors;
pub mod onboarding;
pub mod prompts;
pub mod session;
pub mod ui;
