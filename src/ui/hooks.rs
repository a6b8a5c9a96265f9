use dioxus::prelude::*;
use tokio::sync::watch;

/// Mirrors a controller's watch channel into a signal.
///
/// `subscribe` is called once for the initial value and once for the
/// long-lived receiver.
pub fn use_watch<T>(subscribe: impl Fn() -> watch::Receiver<T> + 'static) -> Signal<T>
where
    T: Clone + 'static,
{
    let value = use_signal(|| subscribe().borrow().clone());
    use_future(move || {
        let mut value = value;
        let mut rx = subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let latest = rx.borrow_and_update().clone();
                value.set(latest);
            }
        }
    });
    value
}
