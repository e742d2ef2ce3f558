//! Driving a shared machine from threads and async tasks.

use statekit::{StateMachineBuilder, SyncStateMachine};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

fn turnstile() -> SyncStateMachine<&'static str, &'static str> {
    StateMachineBuilder::new()
        .initial("locked")
        .transition("locked", "coin", "unlocked")
        .transition("unlocked", "push", "locked")
        .on_enter("unlocked", |ctx| {
            let coins = ctx.meta().get_as::<u64>("coins").unwrap_or(0);
            ctx.meta_mut().set("coins", coins + 1);
            Ok(())
        })
        .build()
        .unwrap()
        .into_sync()
}

#[test]
fn history_stays_consistent_under_contention() {
    let shared = Arc::new(turnstile());

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut moved = 0;
                for _ in 0..100 {
                    if shared.trigger("coin").is_ok() {
                        moved += 1;
                    }
                    if shared.trigger("push").is_ok() {
                        moved += 1;
                    }
                }
                moved
            })
        })
        .collect();

    let moved: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let history = shared.history();

    assert_eq!(history.len(), moved + 1);
    assert_eq!(shared.current(), *history.last().unwrap());

    let unlocks = history.iter().filter(|s| **s == "unlocked").count() as u64;
    assert_eq!(
        shared.with_context(|ctx| ctx.meta().get_as::<u64>("coins")),
        (unlocks > 0).then_some(unlocks)
    );
}

#[test]
fn readers_run_alongside_writers() {
    let shared = Arc::new(turnstile());

    thread::scope(|scope| {
        let writer = Arc::clone(&shared);
        scope.spawn(move || {
            for _ in 0..200 {
                let _ = writer.trigger("coin");
                let _ = writer.trigger("push");
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&shared);
            scope.spawn(move || {
                for _ in 0..200 {
                    let current = reader.current();
                    assert!(current == "locked" || current == "unlocked");
                    let _ = reader.to_dot();
                }
            });
        }
    });

    assert_eq!(shared.history().first(), Some(&"locked"));
}

#[tokio::test]
async fn timer_task_drives_timeout_transition() {
    let (tx, mut rx) = mpsc::unbounded_channel::<&'static str>();

    let machine = StateMachineBuilder::new()
        .initial("idle")
        .transition("idle", "request", "waiting")
        .transition("waiting", "reply", "done")
        .transition("waiting", "timeout", "expired")
        .on_enter("waiting", move |ctx| {
            tx.send(*ctx.state())?;
            Ok(())
        })
        .build()
        .unwrap();
    let shared = Arc::new(machine.into_sync());

    shared.trigger("request").unwrap();
    assert_eq!(rx.recv().await, Some("waiting"));

    let timer = {
        let shared = Arc::clone(&shared);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            shared.trigger("timeout")
        })
    };

    timer.await.unwrap().unwrap();

    assert_eq!(shared.current(), "expired");
    assert_eq!(shared.history(), vec!["idle", "waiting", "expired"]);
    assert!(shared.trigger("reply").is_err());
}

fn owned_turnstile() -> SyncStateMachine<String, String> {
    let label = |s: &str| s.to_string();
    StateMachineBuilder::new()
        .initial(label("locked"))
        .transition(label("locked"), label("coin"), label("unlocked"))
        .transition(label("unlocked"), label("push"), label("locked"))
        .on_enter(label("unlocked"), |ctx| {
            let coins = ctx.meta().get_as::<u64>("coins").unwrap_or(0);
            ctx.meta_mut().set("coins", coins + 1);
            Ok(())
        })
        .build()
        .unwrap()
        .into_sync()
}

#[test]
fn json_round_trip_through_facades() {
    let source = owned_turnstile();
    source.trigger("coin".to_string()).unwrap();
    source.trigger("push".to_string()).unwrap();
    source.trigger("coin".to_string()).unwrap();

    let json = source.to_json().unwrap();
    let target = owned_turnstile();
    target.restore_json(&json).unwrap();

    assert_eq!(target.current(), "unlocked");
    assert_eq!(target.history(), source.history());
    assert_eq!(
        target.with_context(|ctx| ctx.meta().get_as::<u64>("coins")),
        Some(2)
    );

    assert!(target.restore_json("{not json").is_err());
    assert_eq!(target.current(), "unlocked");
}
