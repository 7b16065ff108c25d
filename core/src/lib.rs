//! Document head management for `WaterUI`.
//!
//! Components declare the head state they need as a [`Descriptor`]: a title,
//! `base`/`meta`/`link`/`style`/`script`/`noscript` elements and attributes for
//! the root and body elements. This crate reconciles those declarations in two
//! settings:
//!
//! - **Browser**: [`reconcile::apply`] diffs the previous descriptor against
//!   the next one and drives a [`HeadDom`] for the fields that changed,
//!   returning a [`Teardown`] for the elements it placed. [`HeadManager`] wraps
//!   this in mount/update/unmount hooks.
//! - **Server**: a per-request [`HeadCollector`] merges descriptors from every
//!   component and renders the result to an HTML fragment.
//!
//! ```
//! use waterui_head_core::{AttributeSet, Descriptor, ExecutionContext, HeadCollector};
//!
//! let collector = HeadCollector::with_context(ExecutionContext::Server);
//! collector.merge(
//!     Descriptor::new()
//!         .with_title("T")
//!         .with_meta(vec![AttributeSet::new().with("name", "d").with("content", "c")]),
//! );
//! assert_eq!(
//!     collector.render().unwrap(),
//!     r#"<title>T</title><meta name="d" content="c" />"#
//! );
//! ```

pub mod attribute;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod dom;
mod error;
pub mod manager;
pub mod memory;
pub mod reconcile;
pub mod server;

pub use attribute::{AttrValue, AttributeSet};
pub use config::{DEFAULT_MARKER, ElementLookup, HeadConfig};
pub use context::ExecutionContext;
pub use descriptor::{Descriptor, TagKind, Tags};
pub use dom::{HeadDom, HostElement};
pub use error::HeadError;
pub use manager::HeadManager;
pub use memory::{ElementId, MemoryDom};
pub use reconcile::{HeadOp, Teardown};
pub use server::HeadCollector;
