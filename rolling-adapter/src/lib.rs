//! Host integration helpers for the `rolling` crate.
//!
//! The `rolling` engine is UI-agnostic: it owns placeholders, cells and the authoritative scroll
//! offset, but never touches a real scroll container. This crate provides the glue most hosts
//! need:
//!
//! - A [`Viewport`] trait describing the scroll container (visible rect, offset, content extent)
//! - A [`Controller`] that keeps a `RollingList` and a viewport in sync, including the offset
//!   compensation applied when content is prepended
//! - Tween-based smooth scrolling, including a "scroll to bottom" that follows new messages
//!
//! This crate is framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod tween;
mod viewport;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use tween::{Easing, Tween};
pub use viewport::{HeadlessViewport, Viewport};
