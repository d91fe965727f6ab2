//! Checks how many warnings settings loading logs.
//!
//! A small `tracing` layer counts WARN events while `ScrollSettings::load`
//! runs under a thread-local subscriber.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use keyscroll_core::{ScrollSettings, ScrollVariant, SpeedCurve};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn warnings_while_loading(variant: ScrollVariant, curve: SpeedCurve, input: &str) -> usize {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    tracing::subscriber::with_default(subscriber, || {
        let _ = ScrollSettings::load(variant, curve, input);
    });
    counter.0.load(Ordering::SeqCst)
}

#[test]
fn test_malformed_settings_log_exactly_one_warning() {
    for (variant, input) in [
        (ScrollVariant::KeyChord, "SPEED=11:UP=a"),
        (ScrollVariant::KeyChord, "SPEED=2:SPEED=3"),
        (ScrollVariant::Positional, "SPEED=4"),
        (ScrollVariant::MouseWheel, "SPEED=3:INVERTED=maybe"),
    ] {
        assert_eq!(
            warnings_while_loading(variant, variant.default_curve(), input),
            1,
            "{variant:?} {input}"
        );
    }
}

#[test]
fn test_valid_settings_log_no_warning() {
    for (variant, input) in [
        (ScrollVariant::KeyChord, "SPEED=5:MOD=Control:UP=Up:DOWN=Down"),
        (ScrollVariant::KeyChord, ""),
        (ScrollVariant::Positional, "SPEED=5:Control+Up+Down"),
        (ScrollVariant::MouseWheel, "INVERTED=TRUE:SPEED=1"),
    ] {
        assert_eq!(
            warnings_while_loading(variant, variant.default_curve(), input),
            0,
            "{variant:?} {input}"
        );
    }
}

#[test]
fn test_fatal_curve_is_returned_not_warned() {
    let curve = SpeedCurve { base: 15, step: 2 };

    assert_eq!(
        warnings_while_loading(ScrollVariant::MouseWheel, curve, "SPEED=11"),
        0
    );
}
