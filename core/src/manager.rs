//! Lifecycle adapter around the reconciler.

use tracing::{debug, trace};

use crate::{
    config::HeadConfig,
    descriptor::Descriptor,
    dom::HeadDom,
    error::HeadError,
    reconcile::{self, HeadOp, Teardown},
};

/// Owns a document and keeps it in sync with the latest [`Descriptor`].
///
/// Hosts call [`mount`](Self::mount) once, [`update`](Self::update) on every
/// render, and [`unmount`](Self::unmount) when the owning component goes away.
/// Each update tears down the previous pass before applying the next one.
#[derive(Debug)]
pub struct HeadManager<D: HeadDom> {
    dom: D,
    config: HeadConfig,
    previous: Descriptor,
    teardown: Option<Teardown<D::Element>>,
    stale: bool,
}

impl<D: HeadDom> HeadManager<D> {
    /// Creates a manager with the default configuration.
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self::with_config(dom, HeadConfig::default())
    }

    /// Creates a manager with an explicit configuration.
    #[must_use]
    pub const fn with_config(dom: D, config: HeadConfig) -> Self {
        Self {
            dom,
            config,
            previous: Descriptor::new(),
            teardown: None,
            stale: false,
        }
    }

    /// Applies the first descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects an operation.
    pub fn mount(&mut self, descriptor: Descriptor) -> Result<(), HeadError> {
        trace!("mounting head manager");
        self.update(descriptor)
    }

    /// Brings the document from the previous descriptor to `next`.
    ///
    /// Nothing happens when no field of `next` changed. Otherwise the
    /// elements of the previous pass are detached and every tag kind present
    /// in `next` is placed again; title and root/body attributes are only
    /// written when they changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects an operation. The previous
    /// descriptor is kept as [`current`](Self::current), but the document may
    /// already show part of `next`, so the next update rewrites the title and
    /// every root/body attribute set it declares.
    pub fn update(&mut self, next: Descriptor) -> Result<(), HeadError> {
        if !self.stale
            && self.teardown.is_some()
            && reconcile::is_unchanged(&self.previous, &next)
        {
            trace!("head unchanged");
            return Ok(());
        }
        if let Some(teardown) = self.teardown.take() {
            teardown.run(&mut self.dom);
        }

        let mut ops = if self.stale {
            reconcile::plan(&Descriptor::new(), &next)
        } else {
            reconcile::plan(&self.previous.without_tags(), &next)
        };
        if self.stale && next.title.is_none() {
            ops.insert(0, HeadOp::SetTitle(None));
        }

        match reconcile::apply_ops(&mut self.dom, &self.config, ops) {
            Ok(teardown) => {
                debug!(elements = teardown.len(), "head updated");
                self.previous = next;
                self.teardown = Some(teardown);
                self.stale = false;
                Ok(())
            }
            Err(error) => {
                self.stale = true;
                Err(error)
            }
        }
    }

    /// Detaches every managed element and forgets the previous descriptor.
    ///
    /// The title and root/body attributes are left as they are.
    pub fn unmount(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown.run(&mut self.dom);
        }
        self.previous = Descriptor::new();
        trace!("head manager unmounted");
    }

    /// The descriptor applied by the last successful update.
    #[must_use]
    pub const fn current(&self) -> &Descriptor {
        &self.previous
    }

    /// Elements placed by the last successful update.
    #[must_use]
    pub fn managed(&self) -> &[D::Element] {
        self.teardown.as_ref().map_or(&[][..], Teardown::elements)
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HeadConfig {
        &self.config
    }

    /// The managed document.
    #[must_use]
    pub const fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access to the managed document.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Consumes the manager and returns the document without detaching anything.
    #[must_use]
    pub fn into_dom(self) -> D {
        self.dom
    }
}
