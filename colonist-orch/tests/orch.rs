use colonist_core::error::{CompositionError, SettleError};
use colonist_core::id::{Marker, SettlerId};
use colonist_core::test_utils::{CountingProducer, EventLog, FixedSelector, RecordingAcceptor, Step};
use colonist_founder::{ColonyFounder, Composition};
use colonist_orch::Colonist;
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
struct Anthill;

#[derive(Default)]
struct Beehive;

struct Doubles {
    log: EventLog,
    producer: Arc<CountingProducer>,
    acceptor: Arc<RecordingAcceptor>,
}

fn doubles() -> Doubles {
    let log = EventLog::new();
    Doubles {
        producer: Arc::new(CountingProducer::new(log.clone())),
        acceptor: Arc::new(RecordingAcceptor::new(log.clone())),
        log,
    }
}

fn anthill_founder(d: &Doubles) -> ColonyFounder<Anthill> {
    Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::new(["Worker"], d.log.clone())),
            d.producer.clone(),
            d.acceptor.clone(),
        )
        .group(
            "soldiers",
            Arc::new(FixedSelector::new(["Soldier"], d.log.clone())),
            d.producer.clone(),
            d.acceptor.clone(),
        )
        .build()
        .unwrap()
}

fn orchestrator(d: &Doubles) -> Colonist {
    let mut colonist = Colonist::new();
    colonist.compose(anthill_founder(d)).unwrap();
    colonist
}

// --- Settle ---

#[test]
fn settle_runs_every_group() {
    let d = doubles();
    let colonist = orchestrator(&d);
    colonist.settle(&mut Anthill).unwrap();
    assert_eq!(d.acceptor.accepted().len(), 2);
}

#[test]
fn settle_group_runs_one_group() {
    let d = doubles();
    let colonist = orchestrator(&d);
    colonist
        .settle_group(&mut Anthill, &Marker::new("soldiers"))
        .unwrap();
    assert_eq!(d.acceptor.accepted(), vec![SettlerId::new("Soldier")]);
}

#[test]
fn settle_group_with_unknown_marker_is_a_no_op() {
    let d = doubles();
    let colonist = orchestrator(&d);
    colonist
        .settle_group(&mut Anthill, &Marker::new("queens"))
        .unwrap();
    assert!(d.log.steps().is_empty());
}

#[test]
fn settle_dyn_dispatches_on_runtime_type() {
    let d = doubles();
    let colonist = orchestrator(&d);
    let mut colony: Box<dyn Any> = Box::new(Anthill);
    colonist
        .settle_dyn(&mut *colony, Some(&Marker::new("workers")))
        .unwrap();
    assert_eq!(d.log.steps()[0], Step::Select(Marker::new("workers")));
}

// --- Missing founder ---

#[test]
fn uncomposed_colony_fails_before_any_strategy_runs() {
    let d = doubles();
    let colonist = orchestrator(&d);
    let err = colonist.settle(&mut Beehive).unwrap_err();
    match err {
        SettleError::Composition(CompositionError::NoFounder { colony }) => {
            assert!(colony.as_str().ends_with("Beehive"));
        }
        other => panic!("expected NoFounder, got {other:?}"),
    }
    assert!(d.log.steps().is_empty());
}

#[test]
fn uncomposed_dyn_colony_fails_too() {
    let colonist = Colonist::new();
    let mut colony = Beehive;
    let err = colonist.settle_dyn(&mut colony, None).unwrap_err();
    assert!(matches!(
        err,
        SettleError::Composition(CompositionError::NoFounder { .. })
    ));
}

// --- Registration ---

#[test]
fn composing_a_colony_twice_is_rejected() {
    let d = doubles();
    let mut colonist = orchestrator(&d);
    let err = colonist.compose(anthill_founder(&d)).unwrap_err();
    assert!(matches!(err, CompositionError::DuplicateColony { .. }));
}

#[test]
fn registry_reports_composed_colonies() {
    let d = doubles();
    let mut colonist = orchestrator(&d);
    colonist
        .compose(Composition::<Beehive>::named("Beehive").build().unwrap())
        .unwrap();

    assert!(colonist.is_composed::<Anthill>());
    assert!(colonist.is_composed::<Beehive>());
    assert!(!colonist.is_composed::<String>());
    let colonies = colonist.colonies();
    assert_eq!(colonies.len(), 2);
    assert!(colonies.iter().any(|c| c.as_str() == "Beehive"));
    assert_eq!(
        colonist.founder::<Anthill>().unwrap().groups(),
        vec![Marker::new("workers"), Marker::new("soldiers")]
    );
}

#[test]
fn founder_registered_for_the_wrong_type_reports_mismatch() {
    let d = doubles();
    let mut colonist = Colonist::new();
    colonist
        .register::<Beehive>(Arc::new(anthill_founder(&d)))
        .unwrap();
    let err = colonist.settle(&mut Beehive).unwrap_err();
    assert!(matches!(
        err,
        SettleError::Composition(CompositionError::ColonyMismatch { .. })
    ));
}

// --- Failure propagation ---

#[test]
fn first_failure_reaches_the_caller_with_context() {
    let log = EventLog::new();
    let founder = Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::new(["Worker", "Drone"], log.clone())),
            Arc::new(CountingProducer::new(log.clone()).failing_on("Drone")),
            Arc::new(RecordingAcceptor::new(log.clone())),
        )
        .build()
        .unwrap();
    let mut colonist = Colonist::new();
    colonist.compose(founder).unwrap();

    let err = colonist.settle(&mut Anthill).unwrap_err();
    assert_eq!(err.group().map(Marker::as_str), Some("workers"));
    assert_eq!(err.settler().map(|s| s.as_str()), Some("Drone"));
    assert!(err.to_string().contains("Drone"));
}

// --- Concurrency ---

#[test]
fn independent_colonies_settle_concurrently() {
    let d = doubles();
    let colonist = orchestrator(&d);
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let mut hill = Anthill;
                colonist.settle(&mut hill).unwrap();
            });
        }
    });
    assert_eq!(d.producer.calls(), 16);
    assert_eq!(d.acceptor.accepted().len(), 16);
}
