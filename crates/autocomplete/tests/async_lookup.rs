//! Lookups answered by futures on a tokio runtime.

use std::time::Duration;

use autocomplete::prelude::*;
use autocomplete::{AsyncLookup, ManualClock, SelectionState};

#[test]
fn test_async_lookup_answers_through_runtime() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("autocomplete=trace")
        .try_init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let mut autocomplete = Autocomplete::builder()
        .config(Config::default().with_min_input_length(1))
        .clock(ManualClock::new())
        .build();
    let field = LineInput::new(Rect::new(20.0, 40.0, 200.0, 24.0))
        .with_text("hey")
        .shared();
    let lookup = AsyncLookup::new(runtime.handle().clone(), |query: String| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Response::from(vec![format!("{query}!")])
    });
    let id = autocomplete.attach_lookup(field, lookup).unwrap().unwrap();

    let _ = autocomplete.handle_event(id, WidgetEvent::Focus).unwrap();
    assert_eq!(
        autocomplete.selection_state(id).unwrap(),
        SelectionState::Loading
    );

    let mut applied = 0;
    for _ in 0..200 {
        applied += autocomplete.process_pending();
        if applied > 0 {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(applied, 1);
    assert!(autocomplete.is_open());
    let labels: Vec<String> = autocomplete
        .surface()
        .map(|surface| surface.labels().into_iter().map(str::to_string).collect())
        .unwrap_or_default();
    assert_eq!(labels, vec!["hey!"]);
}
