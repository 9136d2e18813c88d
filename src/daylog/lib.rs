//! # Daylog architecture
//!
//! Daylog is a **UI-agnostic journal library**. The CLI binary is just one
//! client; nothing inside the library writes to stdout, assumes a terminal,
//! or knows how records get rendered.
//!
//! ## The layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI layer (args.rs + main.rs, binary only)                 │
//! │  - Parses arguments, formats output, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                        │
//! │  - One object per store instance: journal + history +       │
//! │    criteria + pager + events, wired together                │
//! │  - Returns structured Results, emits change events          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!            ┌─────────────────┼──────────────────┐
//!            ▼                 ▼                  ▼
//! ┌───────────────┐  ┌──────────────────┐  ┌──────────────┐
//! │ journal.rs    │  │ view.rs          │  │ history.rs   │
//! │ canonical     │  │ pure filter /    │  │ single-level │
//! │ sequence,     │  │ paginate / tag   │  │ undo & redo  │
//! │ atomic        │  │ vocabulary       │  │ deltas       │
//! │ mutate+persist│  └──────────────────┘  └──────────────┘
//! └───────────────┘
//!         │
//!         ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - StorageGateway trait: one byte-oriented JSON slot        │
//! │  - FileGateway (production), MemoryGateway (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two validation policies
//!
//! Untrusted data (load, import) goes through the lenient, total
//! [`normalize::normalize`], which repairs or drops and never errors.
//! Explicit user submissions go through the strict
//! [`normalize::validate_submission`], where a missing date or title is a
//! typed error the caller must surface. These are intentionally separate entry
//! points; see the `normalize` module docs.
//!
//! ## Mutation contract
//!
//! Every mutation is normalize → mutate in memory → persist, as one atomic
//! step. A failed persist (storage quota) rolls the in-memory change back,
//! so the live sequence never diverges from the slot. Each successful
//! direct mutation yields a [`history::Delta`] that the [`history::ActionLog`]
//! can invert exactly once.
//!
//! ## Module overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`journal`]: the canonical record sequence and its mutations
//! - [`view`]: pure filtering, pagination and tag vocabulary
//! - [`history`]: one-level undo/redo
//! - [`normalize`]: lenient and strict input validation
//! - [`store`]: the persistence gateway and its backends
//! - [`transfer`]: bulk JSON import and JSON/CSV export
//! - [`events`]: change notifications for presentation layers
//! - [`model`]: core data types (`Record`, `Mood`, `Attachment`)
//! - [`config`]: per-directory configuration
//! - [`error`]: error types

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod journal;
pub mod model;
pub mod normalize;
pub mod store;
pub mod transfer;
pub mod view;
