//! Telegram Bot API client.
//!
//! `api` holds the pure wire layer (URL building, lenient update parsing);
//! `client` is the HTTP transport implementing
//! [`MessagingPort`](crate::app::ports::MessagingPort).

pub mod api;
pub mod client;

pub use client::TelegramClient;
