use debugger_store::selectors::{focused_source_line_spec, stack_frames_for_display};
use debugger_store::testing::{execution, run_listing, stack_frames, DEFAULT_RUN};
use debugger_store::{Action, Store, StoreConfig, StoreError};
use debugger_types::{ExecutionDataResponse, SourceLineSpec};

fn line(file_path: &str, lineno: u32) -> SourceLineSpec {
    SourceLineSpec {
        host_name: "localhost".to_string(),
        file_path: file_path.to_string(),
        lineno,
    }
}

/// Store with one focused execution whose trace is `f0 -> f1 -> f2`.
fn store_with_trace(sticky: bool) -> Store {
    let mut store = Store::new(&StoreConfig {
        stick_to_bottommost_frame_in_focused_file: sticky,
        ..StoreConfig::default()
    });
    for action in [
        Action::RunsLoaded {
            runs: run_listing(&[DEFAULT_RUN]),
        },
        Action::NumExecutionsLoaded { num_executions: 1 },
        Action::ExecutionDataLoaded(ExecutionDataResponse {
            begin: 0,
            end: 1,
            executions: vec![execution("MatMul", &["f0", "f1", "f2"])],
        }),
        Action::StackFramesLoaded {
            stack_frames: stack_frames().into_iter().collect(),
        },
    ] {
        let follow_ups = store.dispatch(action).expect("setup action accepted");
        assert!(follow_ups.is_empty(), "no line is focused during setup");
    }
    store
}

#[test]
fn test_sticky_mode_moves_focus_to_bottommost_frame() {
    let mut store = store_with_trace(true);

    let follow_ups = store
        .dispatch(Action::SourceLineFocused {
            source_line_spec: line("/tmp/model.py", 30),
        })
        .unwrap();

    assert_eq!(
        follow_ups,
        vec![Action::SourceLineFocused {
            source_line_spec: line("/tmp/model.py", 40),
        }]
    );
    assert_eq!(focused_source_line_spec(store.state()), Some(&line("/tmp/model.py", 40)));

    let display = stack_frames_for_display(store.state()).expect("frames loaded");
    assert!(display[2].focused);
    assert!(display.iter().all(|frame| !frame.auto_focus), "loop settles after one step");
}

#[test]
fn test_no_follow_up_when_bottommost_frame_is_focused() {
    let mut store = store_with_trace(true);
    let follow_ups = store
        .dispatch(Action::SourceLineFocused {
            source_line_spec: line("/tmp/model.py", 40),
        })
        .unwrap();
    assert!(follow_ups.is_empty());
}

#[test]
fn test_enabling_sticky_mode_applies_follow_up() {
    let mut store = store_with_trace(false);
    let follow_ups = store
        .dispatch(Action::SourceLineFocused {
            source_line_spec: line("/tmp/model.py", 30),
        })
        .unwrap();
    assert!(follow_ups.is_empty());

    let follow_ups = store
        .dispatch(Action::SetStickToBottommostFrameInFocusedFile { value: true })
        .unwrap();
    assert_eq!(follow_ups.len(), 1);
    assert_eq!(focused_source_line_spec(store.state()).map(|spec| spec.lineno), Some(40));
}

#[test]
fn test_rejected_action_returns_error_and_keeps_state() {
    let mut store = store_with_trace(true);
    let before = store.state().clone();
    let err = store
        .dispatch(Action::ExecutionScrollToIndex { index: -2.0 })
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidScrollIndex { .. }));
    assert_eq!(store.state(), &before);
}
