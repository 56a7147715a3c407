use log::debug;
#[cfg(feature = "mock")]
use mockall::automock;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// Callback registered for resize notifications
pub type ResizeHandler = Rc<dyn Fn()>;

/// Handle identifying a registered resize listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host environment providing viewport dimensions and resize notifications
///
/// Removing a listener that is not registered (or was already removed) is a no-op.
#[cfg_attr(feature = "mock", automock)]
pub trait ViewportProvider {
    fn inner_width(&self) -> f64;
    fn inner_height(&self) -> f64;
    fn add_resize_listener(&self, handler: ResizeHandler) -> ListenerId;
    fn remove_resize_listener(&self, id: ListenerId);
}

/// In-memory viewport driven by explicit `resize` calls
pub struct ManualViewport {
    size: Cell<(f64, f64)>,
    listeners: RefCell<Vec<(ListenerId, ResizeHandler)>>,
    next_id: Cell<u64>,
}

impl ManualViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new((width, height)),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Change the dimensions and notify every registered listener in registration order
    ///
    /// Listeners added during dispatch are first notified on the next resize;
    /// listeners removed during dispatch are not called if they have not run yet.
    pub fn resize(&self, width: f64, height: f64) {
        debug!("viewport resized to {width}x{height}");
        self.size.set((width, height));

        // snapshot so handlers may (un)register while being dispatched
        let handlers: Vec<(ListenerId, ResizeHandler)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in handlers {
            if self.is_registered(id) {
                handler();
            }
        }
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(registered, _)| *registered == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Default for ManualViewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.size.get();
        f.debug_struct("ManualViewport")
            .field("width", &width)
            .field("height", &height)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ViewportProvider for ManualViewport {
    fn inner_width(&self) -> f64 {
        self.size.get().0
    }

    fn inner_height(&self) -> f64 {
        self.size.get().1
    }

    fn add_resize_listener(&self, handler: ResizeHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, handler));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(registered, _)| *registered != id);
    }
}
