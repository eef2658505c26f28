//! # Canvas Tools
//!
//! A Rust client library for the Canvas LMS REST API, providing typed,
//! navigable entities without making callers deal with HTTP, JSON or
//! pagination.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via validated newtypes and [`CanvasSettings`]
//! - A root context, [`Canvas`], built with [`CanvasBuilder`]
//! - Entities ([`Course`], [`Term`], [`User`]) with identity equality and a
//!   one-way lock
//! - An async [`Connection`](clients::Connection) with lazy pagination
//!   and cooperative cancellation
//!
//! ## Quick Start
//!
//! ```rust
//! use canvas_tools::{AccessToken, BaseUrl, Canvas};
//!
//! let canvas = Canvas::builder(BaseUrl::new("https://canvas.example.edu/api/v1").unwrap())
//!     .token(AccessToken::new("1234~abcdef").unwrap())
//!     .build();
//!
//! assert_eq!(canvas.connection().base_url().as_ref(), "https://canvas.example.edu");
//! ```
//!
//! ## Retrieving Entities
//!
//! ```rust,ignore
//! use canvas_tools::clients::ListOptions;
//! use futures_util::TryStreamExt;
//!
//! // A single course; `None` if Canvas answers 404
//! if let Some(course) = canvas.retrieve_course(42, None).await? {
//!     println!("{} ({})", course.name(), course.code());
//! }
//!
//! // Every course of the signed-in user, fetched page by page
//! let user = canvas.retrieve_current_user(None).await?.expect("token belongs to a user");
//! let courses: Vec<_> = user
//!     .list_courses(ListOptions::new(), None)
//!     .try_collect()
//!     .await?;
//! ```
//!
//! ## Cancellation
//!
//! Every network operation accepts an optional
//! [`CancellationToken`](tokio_util::sync::CancellationToken). Cancelling it
//! aborts the request in flight, which then fails with
//! [`HttpError::Cancelled`].
//!
//! ## Logging
//!
//! Events are emitted with [`tracing`]. Pass a [`tracing::Dispatch`] to
//! [`CanvasBuilder::logger`] to route them to a specific subscriber;
//! otherwise they go to the global default.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **Thread-safe**: [`Canvas`] and its connection are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No retries**: Every failure reaches the caller unchanged

pub mod canvas;
pub mod clients;
pub mod config;
pub mod entities;
pub mod error;
mod logging;

// Re-export public types at crate root for convenience
pub use canvas::{Canvas, CanvasBuilder};
pub use config::{AccessToken, BaseUrl, CanvasSettings};
pub use error::{ConfigError, EntityLockedError};

// Re-export connection types
pub use clients::{
    Connection, HttpError, HttpResponse, HttpResponseError, ListOptions, Parameter, Parameters,
    ProgressUpdate,
};

// Re-export entities
pub use entities::{Course, Entity, Lockable, Term, User};
