//! Integration tests for debouncing driven by a manual clock, with results
//! published through a signal.

use std::sync::Arc;
use std::time::Duration;

use autocomplete_core::{Clock, Debounced, Debouncer, ManualClock, Signal};
use parking_lot::Mutex;

const DELAY: Duration = Duration::from_millis(250);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_keystroke_burst_fires_once_with_last_text() {
    let clock = ManualClock::new();
    let searched = Signal::<String>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    searched.connect(move |text| seen_clone.lock().push(text.clone()));

    let mut debouncer = Debouncer::new(DELAY);
    for text in ["a", "ap", "app", "appl", "apple"] {
        debouncer.call(text.to_string(), clock.now());
        clock.advance(ms(100));
        assert_eq!(debouncer.poll(clock.now()), None);
    }

    clock.advance(ms(150));
    if let Some(text) = debouncer.poll(clock.now()) {
        searched.emit(text);
    }
    assert_eq!(*seen.lock(), vec!["apple".to_string()]);
    assert!(!debouncer.is_pending());
}

#[test]
fn test_separate_bursts_fire_separately() {
    let clock = ManualClock::new();
    let mut fired = Vec::new();
    let mut debouncer = Debouncer::new(DELAY);

    debouncer.call(1, clock.now());
    clock.advance(ms(300));
    fired.extend(debouncer.poll(clock.now()));

    debouncer.call(2, clock.now());
    clock.advance(ms(249));
    fired.extend(debouncer.poll(clock.now()));
    clock.advance(ms(1));
    fired.extend(debouncer.poll(clock.now()));

    assert_eq!(fired, vec![1, 2]);
}

#[test]
fn test_deadline_follows_latest_call() {
    let clock = ManualClock::new();
    let start = clock.now();
    let mut debouncer = Debouncer::new(DELAY);

    debouncer.call((), clock.now());
    clock.advance(ms(200));
    debouncer.call((), clock.now());

    assert_eq!(debouncer.deadline(), Some(start + ms(450)));
    debouncer.cancel();
    assert_eq!(debouncer.deadline(), None);
    clock.advance(ms(1000));
    assert_eq!(debouncer.poll(clock.now()), None);
}

#[test]
fn test_debounced_passes_leading_argument() {
    let clock = ManualClock::new();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    let mut debounced = Debounced::with_leading(
        7_u32,
        move |input: &u32, text: String| calls_clone.lock().push((*input, text)),
        DELAY,
    );

    debounced.call("x".to_string(), clock.now());
    debounced.call("xy".to_string(), clock.now());
    clock.advance(DELAY);
    assert!(debounced.poll(clock.now()));
    assert!(!debounced.poll(clock.now()));

    assert_eq!(*calls.lock(), vec![(7, "xy".to_string())]);
}
