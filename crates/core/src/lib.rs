//! Core library for urltitle
//!
//! This crate implements the **Functional Core** of the urltitle application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`urltitle_core`** (this crate): Pure transformation functions with zero I/O
//! - **`urltitle`**: Event handling, network lookups and orchestration (the Imperative Shell)
//!
//! All functions in this crate are pure: the same URL always produces the same
//! title, and nothing here touches the network. Repository metadata arrives as
//! a string and leaves as a typed record.
//!
//! # Module Organization
//!
//! - [`title`]: Derivation of a default story title from a URL
//! - [`provider`]: Classification of URLs by host (video, long-form, code host)
//! - [`github`]: Repository URL recognition, API URL rewrite and metadata parsing
//! - [`form`]: Story form state and the rules a URL change event follows
//!
//! # Example Usage
//!
//! ```rust
//! use urltitle_core::title::derive;
//!
//! assert_eq!(derive(Some("https://example.com/123-my-cool-post.html")), "My cool post");
//! assert_eq!(derive(None), "");
//! ```

pub mod form;
pub mod github;
pub mod provider;
pub mod title;
