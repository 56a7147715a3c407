use std::{cell::Cell, rc::Rc};

use super::{DeviceInfo, ListenerId, ResizeHandler, ViewportProvider, device_info};

/// Registration returned by [`on_device_change`]
///
/// Dropping the subscription keeps the listener registered for as long as the
/// provider is alive elsewhere; call [`Subscription::unsubscribe`] to stop
/// notifications.
pub struct Subscription<P: ViewportProvider> {
    provider: Rc<P>,
    id: ListenerId,
    active: Cell<bool>,
}

impl<P: ViewportProvider> Subscription<P> {
    /// Remove the resize listener. Calling this again is a no-op.
    pub fn unsubscribe(&self) {
        if self.active.replace(false) {
            self.provider.remove_resize_listener(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<P: ViewportProvider> std::fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}

/// Call `callback` with a fresh [`DeviceInfo`] now and after every resize
///
/// The first call happens synchronously before this function returns, so the
/// observer always starts with the current snapshot. The registered handler
/// only holds a weak reference to the provider.
pub fn on_device_change<P, F>(provider: Rc<P>, callback: F) -> Subscription<P>
where
    P: ViewportProvider + 'static,
    F: Fn(DeviceInfo) + 'static,
{
    let handler: ResizeHandler = {
        let provider = Rc::downgrade(&provider);
        Rc::new(move || {
            if let Some(provider) = provider.upgrade() {
                callback(device_info(provider.as_ref()));
            }
        })
    };

    let id = provider.add_resize_listener(Rc::clone(&handler));
    handler();

    Subscription {
        provider,
        id,
        active: Cell::new(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceType, ManualViewport};
    use std::cell::RefCell;

    fn recording_subscription(
        viewport: &Rc<ManualViewport>,
    ) -> (Subscription<ManualViewport>, Rc<RefCell<Vec<DeviceInfo>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = on_device_change(Rc::clone(viewport), move |info| {
            sink.borrow_mut().push(info);
        });
        (subscription, seen)
    }

    #[test]
    fn subscribe_reports_current_snapshot_immediately() {
        let viewport = Rc::new(ManualViewport::new(1300.0, 800.0));
        let (_subscription, seen) = recording_subscription(&viewport);

        assert_eq!(
            *seen.borrow(),
            vec![DeviceInfo {
                device_type: DeviceType::Widescreen,
                width: 1300,
                height: 800,
            }]
        );
    }

    #[test]
    fn resize_reports_fresh_snapshot() {
        let viewport = Rc::new(ManualViewport::new(375.0, 667.0));
        let (_subscription, seen) = recording_subscription(&viewport);

        viewport.resize(1024.0, 768.0);
        viewport.resize(1024.0, 700.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].device_type, DeviceType::Mobile);
        assert_eq!(seen[1].device_type, DeviceType::Desktop);
        assert_eq!(seen[2].height, 700);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let viewport = Rc::new(ManualViewport::new(800.0, 600.0));
        let (subscription, seen) = recording_subscription(&viewport);

        subscription.unsubscribe();
        viewport.resize(1920.0, 1080.0);

        assert_eq!(seen.borrow().len(), 1);
        assert!(!subscription.is_active());
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_twice_is_noop() {
        let viewport = Rc::new(ManualViewport::new(800.0, 600.0));
        let (subscription, _seen) = recording_subscription(&viewport);

        subscription.unsubscribe();
        subscription.unsubscribe();

        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn subscriptions_are_independent() {
        let viewport = Rc::new(ManualViewport::new(800.0, 600.0));
        let (first, first_seen) = recording_subscription(&viewport);
        let (second, second_seen) = recording_subscription(&viewport);
        assert_ne!(first.id(), second.id());

        first.unsubscribe();
        viewport.resize(1500.0, 900.0);

        assert_eq!(first_seen.borrow().len(), 1);
        assert_eq!(second_seen.borrow().len(), 2);
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn subscription_cancelled_by_earlier_callback_is_not_notified() {
        let viewport = Rc::new(ManualViewport::new(800.0, 600.0));
        let later: Rc<RefCell<Option<Subscription<ManualViewport>>>> =
            Rc::new(RefCell::new(None));

        let _first = {
            let later = Rc::clone(&later);
            on_device_change(Rc::clone(&viewport), move |_| {
                if let Some(subscription) = later.borrow().as_ref() {
                    subscription.unsubscribe();
                }
            })
        };
        let (second, second_seen) = recording_subscription(&viewport);
        *later.borrow_mut() = Some(second);

        viewport.resize(1500.0, 900.0);

        assert_eq!(second_seen.borrow().len(), 1);
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn dropping_subscription_keeps_listener() {
        let viewport = Rc::new(ManualViewport::new(800.0, 600.0));
        let (subscription, seen) = recording_subscription(&viewport);

        drop(subscription);
        viewport.resize(1500.0, 900.0);

        assert_eq!(seen.borrow().len(), 2);
    }
}
