//! Domain layer containing business entities and logic.
//!
//! It defines entities, the backing-store repository trait, and the
//! asynchronous click-tracking pieces, independent of infrastructure
//! concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Backing-store trait definition
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The resolver serves a redirect (cache hit or store fallback)
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel without
//!    awaiting the result
//! 3. [`click_worker::run_click_worker`] drains the channel and persists
//!    clicks via [`repositories::UrlRepository::record_click`]
//!
//! Failures inside the worker are logged and never reach the redirect path.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
