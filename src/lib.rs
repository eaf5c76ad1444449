pub mod app;
pub mod auth;
pub mod config;
pub mod contacts;
pub mod error;
pub mod guard;
pub mod i18n;
pub mod notify;
pub mod posts;
pub mod preferences;
pub mod render;
pub mod session;
pub mod slug;
pub mod storage;
pub mod supabase;
pub mod ui;
