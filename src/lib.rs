//! Cineflow: operator-driven curation of storyboard video generation tasks.
//!
//! A batch of [`models::Task`]s is loaded from storyboard JSON ([`loader`]),
//! summarized ([`summary`]), optionally forced to a single resolution
//! ([`resolution`]), and then walked name by name so the operator can attach
//! canonical character identifiers ([`session`], [`characters`]).
//!
//! All curation happens in memory on a single owned `Vec<Task>`; the operator is
//! reached only through the [`console::Console`] trait.

pub mod characters;
pub mod config;
pub mod console;
pub mod loader;
pub mod models;
pub mod render;
pub mod resolution;
pub mod session;
pub mod summary;
