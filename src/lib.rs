//! Value types whose content can only be reached through a branch: [`Optional`], the tagged
//! union [`Variant`], and the nullable pointers of [`memory`].
pub mod collapse;
pub mod error;
pub mod memory;
pub mod optional;
pub mod pack;
pub mod variant;

pub use collapse::Collapse;
pub use error::{AccessError, IndexMismatch};
pub use memory::{Shared, Unique, WeakShared};
pub use optional::Optional;
pub use pack::{Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, Alt8, Alternatives, At, Contains, Index};
pub use variant::{CoVisitor, Variant, Visitor};

/// Runs `f` under a subscriber that counts every event it emits.
#[cfg(test)]
pub(crate) fn count_events(f: impl FnOnce()) -> usize {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    struct CountEvents(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for CountEvents {
        fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountEvents(count.clone()));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}
