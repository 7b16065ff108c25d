use tracing::debug;
use waterui_head_core::{Descriptor, ElementLookup, HeadConfig, HeadManager};

use crate::{dom::WebHeadDom, error::WebError};

/// Builder for [`WebHead`].
#[derive(Debug, Default, Clone)]
pub struct WebHeadBuilder {
    config: HeadConfig,
    install_panic_hook: bool,
}

impl WebHeadBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: HeadConfig::new(),
            install_panic_hook: false,
        }
    }

    /// Replaces the reconciler configuration.
    #[must_use]
    pub fn with_config(mut self, config: HeadConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the attribute used to mark managed elements.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.config = self.config.with_marker(marker.into());
        self
    }

    /// Sets the element lookup strategy.
    #[must_use]
    pub fn with_lookup(mut self, lookup: ElementLookup) -> Self {
        self.config = self.config.with_lookup(lookup);
        self
    }

    /// Controls whether panics are forwarded to the browser console.
    #[must_use]
    pub const fn install_panic_hook(mut self, install: bool) -> Self {
        self.install_panic_hook = install;
        self
    }

    /// Finalises the builder and creates a [`WebHead`].
    ///
    /// # Errors
    ///
    /// Returns an error if the document or its head cannot be reached.
    pub fn build(self) -> Result<WebHead, WebError> {
        if self.install_panic_hook {
            console_error_panic_hook::set_once();
        }
        let dom = WebHeadDom::new()?;
        Ok(WebHead {
            manager: HeadManager::with_config(dom, self.config),
        })
    }
}

/// Keeps the browser document head in sync with the latest [`Descriptor`].
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebHead {
    manager: HeadManager<WebHeadDom>,
}

impl WebHead {
    /// Applies a descriptor, tearing down the elements of the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects an operation.
    pub fn update(&mut self, descriptor: Descriptor) -> Result<(), WebError> {
        self.manager.update(descriptor)?;
        Ok(())
    }

    /// Provides access to the underlying manager.
    #[must_use]
    pub const fn manager(&self) -> &HeadManager<WebHeadDom> {
        &self.manager
    }

    /// Provides mutable access to the underlying manager.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn manager_mut(&mut self) -> &mut HeadManager<WebHeadDom> {
        &mut self.manager
    }
}

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
impl WebHead {
    /// Convenience constructor exposed to JavaScript callers.
    #[wasm_bindgen(constructor)]
    /// Creates a new [`WebHead`] using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the document or its head cannot be reached.
    pub fn new() -> Result<Self, WebError> {
        WebHeadBuilder::new().build()
    }

    /// Applies a descriptor given as JSON, using the descriptor field names
    /// (`title`, `meta`, `htmlAttributes`, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a descriptor or the document
    /// rejects an operation.
    #[wasm_bindgen(js_name = update)]
    pub fn update_json(&mut self, descriptor: &str) -> Result<(), WebError> {
        let descriptor: Descriptor = serde_json::from_str(descriptor)?;
        debug!(title = descriptor.title.as_deref(), "head update from JavaScript");
        self.update(descriptor)
    }

    /// Removes every element placed by the last update.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.manager.unmount();
    }
}
