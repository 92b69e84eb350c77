//! Desktop client for the Knowledge Hub collaboration platform:
//! authentication, a categorized question/answer forum, direct messaging
//! with live polling, meeting scheduling, and feedback.
//!
//! The crate splits into a UI half ([`ui`]) and a backend half ([`net`])
//! joined by mpsc channels; [`api`] holds the REST client behind the
//! capability traits the worker is generic over.

pub mod api;
pub mod common;
pub mod config;
pub mod net;
pub mod session;
pub mod ui;
pub mod validate;
