//! End-to-end scenarios against the public API.

use parking_lot::Mutex;
use statekit::config::CallbackResult;
use statekit::{
    CallbackError, CheckpointError, Phase, StateMachine, StateMachineBuilder, TransitionError,
};
use std::sync::Arc;

fn s(label: &str) -> String {
    label.to_string()
}

fn media_player() -> StateMachine<String, String> {
    StateMachineBuilder::new()
        .initial(s("idle"))
        .transition(s("idle"), s("start"), s("running"))
        .transition(s("running"), s("pause"), s("paused"))
        .transition(s("running"), s("stop"), s("stopped"))
        .transition(s("paused"), s("resume"), s("running"))
        .build()
        .unwrap()
}

#[test]
fn start_pause_then_bogus_event() {
    let mut machine = media_player();

    machine.trigger(s("start")).unwrap();
    assert_eq!(machine.current(), "running");
    assert_eq!(machine.history(), vec![s("idle"), s("running")]);

    machine.trigger(s("pause")).unwrap();
    let err = machine.trigger(s("bogus")).unwrap_err();

    match err {
        TransitionError::InvalidTransition { from, event } => {
            assert_eq!(from, "paused");
            assert_eq!(event, "bogus");
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
    assert_eq!(machine.current(), "paused");
}

#[test]
fn two_true_guards_are_ambiguous() {
    let mut machine: StateMachine<&str, &str> = StateMachineBuilder::new()
        .initial("a")
        .transition_when("a", "go", "b", |_| true)
        .transition_when("a", "go", "c", |_| true)
        .build()
        .unwrap();

    let err = machine.trigger("go").unwrap_err();

    assert!(matches!(
        err,
        TransitionError::AmbiguousTransition {
            from: "a",
            event: "go"
        }
    ));
    assert_eq!(machine.current(), &"a");
}

#[test]
fn failing_entry_callback_blocks_commit() {
    let mut machine: StateMachine<&str, &str> = StateMachineBuilder::new()
        .initial("a")
        .transition("a", "go", "b")
        .on_enter("b", |_| Err("entry refused".into()))
        .build()
        .unwrap();

    let err = machine.trigger("go").unwrap_err();

    match err {
        TransitionError::Callback(CallbackError { phase, state, cause }) => {
            assert_eq!(phase, Phase::OnEnter);
            assert_eq!(state, Some("b"));
            assert_eq!(cause.to_string(), "entry refused");
        }
        other => panic!("Expected Callback error, got {other:?}"),
    }
    assert_eq!(machine.current(), &"a");
    assert_eq!(machine.history().len(), 1);
}

#[test]
fn order_recording_double_sees_exit_hook_enter() {
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let record = |tag: &'static str, log: &Arc<Mutex<Vec<String>>>| {
        let log = Arc::clone(log);
        move |ctx: &mut statekit::Context<&'static str>| -> CallbackResult {
            log.lock().push(format!("{tag}@{}", ctx.state()));
            Ok(())
        }
    };
    let hook_log = Arc::clone(&log);

    let mut machine: StateMachine<&str, &str> = StateMachineBuilder::new()
        .initial("a")
        .transition("a", "go", "b")
        .transition("b", "back", "a")
        .on_exit("a", record("exit-a-1", &log))
        .on_exit("a", record("exit-a-2", &log))
        .on_enter("b", record("enter-b", &log))
        .on_exit("b", record("exit-b", &log))
        .on_enter("a", record("enter-a", &log))
        .on_transition(move |from, to, event, ctx| {
            hook_log
                .lock()
                .push(format!("hook {from}->{to} on {event}@{}", ctx.state()));
            Ok(())
        })
        .build()
        .unwrap();

    machine.trigger("go").unwrap();
    machine.trigger("back").unwrap();

    assert_eq!(
        *log.lock(),
        vec![
            "exit-a-1@a",
            "exit-a-2@a",
            "hook a->b on go@b",
            "enter-b@b",
            "exit-b@b",
            "hook b->a on back@a",
            "enter-a@a",
        ]
    );
}

#[test]
fn failed_trigger_can_be_retried() {
    let attempts = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&attempts);

    let mut machine: StateMachine<&str, &str> = StateMachineBuilder::new()
        .initial("pending")
        .transition("pending", "submit", "accepted")
        .on_enter("accepted", move |_| {
            let mut n = counter.lock();
            *n += 1;
            if *n < 3 {
                Err(format!("attempt {n} rejected").into())
            } else {
                Ok(())
            }
        })
        .build()
        .unwrap();

    assert!(machine.trigger("submit").is_err());
    assert!(machine.trigger("submit").is_err());
    machine.trigger("submit").unwrap();

    assert_eq!(*attempts.lock(), 3);
    assert_eq!(machine.history(), vec!["pending", "accepted"]);
}

#[test]
fn input_reaches_guards_and_callbacks() {
    let mut machine: StateMachine<&str, &str> = StateMachineBuilder::new()
        .initial("cart")
        .transition_when("cart", "pay", "paid", |ctx| {
            ctx.input::<u64>().is_some_and(|amount| *amount >= 100)
        })
        .on_enter("paid", |ctx| {
            let amount = ctx.input::<u64>().copied().unwrap_or(0);
            ctx.data_mut().set("paid", amount);
            Ok(())
        })
        .build()
        .unwrap();

    assert!(machine.trigger_with("pay", 50u64).is_err());
    machine.trigger_with("pay", 120u64).unwrap();

    assert_eq!(machine.context().data().get_as::<u64>("paid"), Some(120));
}

#[test]
fn snapshot_restores_on_a_clone() {
    let mut source = media_player();
    source.trigger(s("start")).unwrap();
    source.trigger(s("pause")).unwrap();
    source.trigger(s("resume")).unwrap();
    source.context_mut().data_mut().set("user", "u-17");
    source.context_mut().meta_mut().set("retries", 2);

    let mut clone = source.new_instance();
    clone.restore(source.snapshot()).unwrap();

    assert_eq!(clone.current(), source.current());
    assert_eq!(clone.history(), source.history());
    assert_eq!(clone.context().data(), source.context().data());
    assert_eq!(clone.context().meta(), source.context().meta());

    clone.trigger(s("stop")).unwrap();
    assert_eq!(source.current(), "running");
}

#[test]
fn restore_with_unconfigured_state_leaves_machine_alone() {
    let mut machine = media_player();
    machine.trigger(s("start")).unwrap();
    machine.context_mut().data_mut().set("pid", 1);

    let err = machine
        .restore_json(
            r#"{"current":"running","history":["idle","crashed"],"data":{},"meta":{}}"#,
        )
        .unwrap_err();

    assert!(matches!(err, CheckpointError::UnknownState { ref state } if state == "crashed"));
    assert_eq!(machine.current(), "running");
    assert_eq!(machine.history(), vec![s("idle"), s("running")]);
    assert_eq!(machine.context().data().get_as::<u32>("pid"), Some(1));
}

#[test]
fn dot_export_reflects_configuration() {
    let mut machine = media_player();
    machine.trigger(s("start")).unwrap();

    let dot = machine.to_dot();

    assert!(dot.contains("\"running\" -> \"paused\" [label=\" pause \"];"));
    assert!(dot.contains("\"running\" [label=\"running\", fillcolor=\"#90ee90\""));
    assert!(dot.contains("\"stopped\" [label=\"stopped\", fillcolor=\"#d3d3d3\""));
}
