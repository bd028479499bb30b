//! # Output Gal
//!
//! A self-hosted gallery server for directories of generated image output.
//! Point it at the folder your image-generation pipeline writes into and it
//! serves a paginated HTML gallery with lazy-loaded thumbnails, plus the raw
//! file bytes for any direct link. A companion push client streams image
//! files to a remote endpoint over a WebSocket, base64-encoded inside JSON
//! envelopes.
//!
//! # Architecture
//!
//! The server is deliberately stateless: every request re-lists the gallery
//! directory, so the page always reflects the filesystem as of that request.
//! There is no cache, no database, and no write path. The generation
//! pipeline owns the directory and this server only reads it, so races with
//! an external writer are benign; a request simply sees whatever files
//! exist at listing time.
//!
//! ```text
//! GET /?page=3 ──► list directory ──► paginate ──► render HTML
//! GET /img.png ──► static file serving rooted at the gallery directory
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`listing`] | Enumerates eligible image filenames, sorted newest-name-first |
//! | [`page`] | Pagination math: total pages, clamping, page slices |
//! | [`render`] | Maud templates for the gallery document and pager strip |
//! | [`server`] | Request routing and the once-guarded background lifecycle |
//! | [`push`] | WebSocket client streaming images as base64 JSON envelopes |
//! | [`config`] | `gallery.toml` loading, validation, and the stock config |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! compile-time checked Rust code, interpolation is auto-escaped, and there
//! is no template directory to ship or get out of sync.
//!
//! ## ServeDir For The Raw-File Path
//!
//! Everything that is not the gallery page is delegated to tower-http's
//! `ServeDir` rooted at the gallery directory. That one decision buys 404
//! handling, directory-traversal protection, and content-type inference by
//! extension, none of which this crate has to hand-roll.
//!
//! ## Total Rendering
//!
//! The page renderer never fails. An unreadable directory renders as an
//! empty gallery, and any integer page request (negative, zero, or absurd)
//! clamps into the valid range. The HTTP layer has no error branch for the
//! gallery path at all.

pub mod config;
pub mod listing;
pub mod page;
pub mod push;
pub mod render;
pub mod server;
