//! # Biblio Architecture
//!
//! Biblio keeps a personal book inventory in a KeyDB/Redis server, one JSON
//! document per book. The library holds everything but the terminal; the
//! binary is a thin interactive menu on top of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (cli/, wired by main.rs)                             │
//! │  - Menu loop, prompts, record printing                      │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the connection and keyspace                         │
//! │  - Turns outcomes into messages, keeps Err for failures     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, validate.rs)                 │
//! │  - create / fetch / update / delete / list / search         │
//! │  - Typed outcomes, no I/O assumptions                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait                                      │
//! │  - RedisStore (production), InMemoryStore (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! Commands carry most of the tests and run against `InMemoryStore`, which
//! also emulates the awkward parts of `SCAN` (paging, repeated keys, keys
//! vanishing mid-scan). The shell is tested by scripting its input.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Record repository operations and search
//! - [`validate`]: Field rules
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Book`, `Status`, `BookFields`
//! - [`config`]: Connection settings from the environment
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;
