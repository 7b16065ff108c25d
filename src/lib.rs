#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub use waterui_head_core::{
    AttrValue, AttributeSet, DEFAULT_MARKER, Descriptor, ElementId, ElementLookup, ExecutionContext,
    HeadCollector, HeadConfig, HeadDom, HeadError, HeadManager, HeadOp, HostElement, MemoryDom,
    TagKind, Tags, Teardown,
};
#[doc(inline)]
pub use waterui_head_core::{attribute, config, context, descriptor, dom, manager, reconcile, server};

pub mod logging;
pub use tracing as log;

pub mod prelude {
    //! A collection of commonly used types for easy importing.
    //!
    //! ```rust
    //! use waterui_head::prelude::*;
    //!
    //! let head = Descriptor::new()
    //!     .with_title("Home")
    //!     .with_meta(AttributeSet::new().with("name", "description").with("content", "Welcome"));
    //! assert_eq!(head.title.as_deref(), Some("Home"));
    //! ```
    pub use super::{
        AttrValue, AttributeSet, Descriptor, ExecutionContext, HeadCollector, HeadConfig,
        HeadDom, HeadError, HeadManager, TagKind,
    };
}
