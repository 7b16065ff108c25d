#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Browser backend for `WaterUI` head management.
//!
//! [`WebHeadDom`] implements [`waterui_head_core::HeadDom`] on top of
//! `web-sys`, so the core reconciler can drive the live document head.
//! [`WebHead`] wraps it in a [`waterui_head_core::HeadManager`] and is also
//! exported to JavaScript, where descriptors are passed as JSON.

mod app;
mod dom;
mod error;

pub use app::{WebHead, WebHeadBuilder};
pub use dom::WebHeadDom;
pub use error::WebError;
