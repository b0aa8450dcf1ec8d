use colonist_accept::ForgetAcceptor;
use colonist_core::composition::{AcceptanceMode, ProductionMode};
use colonist_core::error::{
    AcceptanceError, CompositionError, DiscoveryError, ProductionError, SettleError,
};
use colonist_core::founder::Founder;
use colonist_core::id::{Marker, SettlerId};
use colonist_core::test_utils::{CountingProducer, EventLog, FixedSelector, RecordingAcceptor, Step};
use colonist_core::settler::Candidate;
use colonist_founder::{ColonyFounder, Composition, CompositionDescriptor};
use colonist_produce::IdentityProducer;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Anthill;

#[derive(Debug, Default)]
struct Beehive;

fn ids(list: &[&str]) -> Vec<SettlerId> {
    list.iter().copied().map(SettlerId::new).collect()
}

struct TwoGroups {
    log: EventLog,
    producer: Arc<CountingProducer>,
    acceptor: Arc<RecordingAcceptor>,
    founder: ColonyFounder<Anthill>,
}

/// `workers` selects W1, W2; `soldiers` selects S1.
fn two_groups(producer: CountingProducer, acceptor: RecordingAcceptor, log: EventLog) -> TwoGroups {
    let producer = Arc::new(producer);
    let acceptor = Arc::new(acceptor);
    let founder = Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::new(["W1", "W2"], log.clone())),
            producer.clone(),
            acceptor.clone(),
        )
        .group(
            "soldiers",
            Arc::new(FixedSelector::new(["S1"], log.clone())),
            producer.clone(),
            acceptor.clone(),
        )
        .build()
        .unwrap();
    TwoGroups {
        log,
        producer,
        acceptor,
        founder,
    }
}

fn healthy() -> TwoGroups {
    let log = EventLog::new();
    two_groups(
        CountingProducer::new(log.clone()),
        RecordingAcceptor::new(log.clone()),
        log,
    )
}

// --- Ordering ---

#[test]
fn groups_run_in_declaration_order() {
    let t = healthy();
    t.founder.found_typed(&mut Anthill, None).unwrap();
    assert_eq!(t.acceptor.accepted(), ids(&["W1", "W2", "S1"]));
    assert_eq!(t.producer.calls(), 3);
}

#[test]
fn each_candidate_is_accepted_before_the_next_is_produced() {
    let t = healthy();
    t.founder.found_typed(&mut Anthill, None).unwrap();
    assert_eq!(
        t.log.steps(),
        vec![
            Step::Select(Marker::new("workers")),
            Step::Produce(SettlerId::new("W1")),
            Step::Accept(SettlerId::new("W1")),
            Step::Produce(SettlerId::new("W2")),
            Step::Accept(SettlerId::new("W2")),
            Step::Select(Marker::new("soldiers")),
            Step::Produce(SettlerId::new("S1")),
            Step::Accept(SettlerId::new("S1")),
        ]
    );
}

#[test]
fn groups_are_reported_in_declaration_order() {
    let t = healthy();
    assert_eq!(
        t.founder.groups(),
        vec![Marker::new("workers"), Marker::new("soldiers")]
    );
}

// --- Filtering ---

#[test]
fn filter_runs_only_the_matching_group() {
    let t = healthy();
    t.founder
        .found_typed(&mut Anthill, Some(&Marker::new("soldiers")))
        .unwrap();
    assert_eq!(t.acceptor.accepted(), ids(&["S1"]));
    assert_eq!(t.log.steps()[0], Step::Select(Marker::new("soldiers")));
}

#[test]
fn filter_matching_nothing_is_a_no_op() {
    let t = healthy();
    t.founder
        .found_typed(&mut Anthill, Some(&Marker::new("drones")))
        .unwrap();
    assert!(t.log.steps().is_empty());
    assert_eq!(t.producer.calls(), 0);
}

#[test]
fn a_colony_can_be_settled_twice() {
    let t = healthy();
    t.founder.found_typed(&mut Anthill, None).unwrap();
    t.founder.found_typed(&mut Anthill, None).unwrap();
    assert_eq!(t.producer.calls(), 6);
}

// --- Failure isolation ---

#[test]
fn acceptance_failure_stops_without_rollback() {
    let log = EventLog::new();
    let t = two_groups(
        CountingProducer::new(log.clone()),
        RecordingAcceptor::new(log.clone()).failing_on("W2"),
        log,
    );
    let err = t.founder.found_typed(&mut Anthill, None).unwrap_err();

    assert!(matches!(err, SettleError::Acceptance { .. }));
    assert_eq!(err.group(), Some(&Marker::new("workers")));
    assert_eq!(err.settler(), Some(&SettlerId::new("W2")));
    // W1 stays accepted, the soldiers group never starts.
    assert_eq!(t.acceptor.accepted(), ids(&["W1"]));
    assert!(!t.log.steps().contains(&Step::Select(Marker::new("soldiers"))));
}

#[test]
fn production_failure_skips_acceptance_of_that_candidate() {
    let log = EventLog::new();
    let t = two_groups(
        CountingProducer::new(log.clone()).failing_on("W1"),
        RecordingAcceptor::new(log.clone()),
        log,
    );
    let err = t.founder.found_typed(&mut Anthill, None).unwrap_err();

    match err {
        SettleError::Production {
            group,
            settler,
            source,
        } => {
            assert_eq!(group.as_str(), "workers");
            assert_eq!(settler.as_str(), "W1");
            assert!(matches!(source, ProductionError::Construction { .. }));
        }
        other => panic!("expected production failure, got {other:?}"),
    }
    assert!(t.acceptor.accepted().is_empty());
    assert_eq!(t.producer.calls(), 1);
}

#[test]
fn discovery_failure_aborts_before_any_production() {
    let log = EventLog::new();
    let producer = Arc::new(CountingProducer::new(log.clone()));
    let founder = Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::unavailable(log.clone())),
            producer.clone(),
            Arc::new(RecordingAcceptor::new(log.clone())),
        )
        .build()
        .unwrap();

    let err = founder.found_typed(&mut Anthill, None).unwrap_err();
    assert!(matches!(
        err,
        SettleError::Discovery {
            source: DiscoveryError::ScopeUnavailable(_),
            ..
        }
    ));
    assert_eq!(producer.calls(), 0);
}

// --- Strategies ---

#[test]
fn identity_production_with_forget_still_runs_every_candidate() {
    let log = EventLog::new();
    let acceptor = Arc::new(RecordingAcceptor::new(log.clone()));
    let founder = Composition::<Anthill>::new()
        .group(
            "scouts",
            Arc::new(FixedSelector::new(["A", "B"], log.clone())),
            Arc::new(IdentityProducer),
            acceptor.clone(),
        )
        .group(
            "ghosts",
            Arc::new(FixedSelector::new(["G"], log.clone())),
            Arc::new(CountingProducer::new(log.clone())),
            Arc::new(ForgetAcceptor),
        )
        .build()
        .unwrap();

    founder.found_typed(&mut Anthill, None).unwrap();
    assert_eq!(
        acceptor.entries(),
        vec![(SettlerId::new("A"), true), (SettlerId::new("B"), true)]
    );
    assert!(log.steps().contains(&Step::Produce(SettlerId::new("G"))));
}

fn overriding(id: &str, producer: Option<ProductionMode>, acceptor: Option<AcceptanceMode>) -> Candidate {
    let mut candidate = Candidate::new(id);
    candidate.producer = producer;
    candidate.acceptor = acceptor;
    candidate
}

#[test]
fn settler_override_picks_the_alternative_strategies() {
    let log = EventLog::new();
    let producer = Arc::new(CountingProducer::new(log.clone()));
    let acceptor = Arc::new(RecordingAcceptor::new(log.clone()));
    let selector = FixedSelector::candidates(
        vec![
            Candidate::new("W1"),
            overriding("Scout", Some(ProductionMode::Identity), None),
            overriding("Ghost", None, Some(AcceptanceMode::Forget)),
        ],
        log.clone(),
    );
    let founder = Composition::<Anthill>::new()
        .descriptor(
            CompositionDescriptor::new("workers", Arc::new(selector), producer.clone(), acceptor.clone())
                .with_alt_producer(Arc::new(IdentityProducer))
                .with_alt_acceptor(Arc::new(ForgetAcceptor)),
        )
        .build()
        .unwrap();

    founder.found_typed(&mut Anthill, None).unwrap();
    // Scout bypasses the counting producer; Ghost is produced but forgotten.
    assert_eq!(producer.calls(), 2);
    assert_eq!(
        acceptor.entries(),
        vec![(SettlerId::new("W1"), false), (SettlerId::new("Scout"), true)]
    );
}

#[test]
fn override_without_alternative_fails_that_settler() {
    let log = EventLog::new();
    let acceptor = Arc::new(RecordingAcceptor::new(log.clone()));
    let founder = Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::candidates(
                vec![
                    Candidate::new("W1"),
                    overriding("Scout", Some(ProductionMode::Callback), None),
                ],
                log.clone(),
            )),
            Arc::new(CountingProducer::new(log.clone())),
            acceptor.clone(),
        )
        .build()
        .unwrap();

    let err = founder.found_typed(&mut Anthill, None).unwrap_err();
    assert!(matches!(
        err,
        SettleError::Production {
            source: ProductionError::NoStrategy { mode: ProductionMode::Callback, .. },
            ..
        }
    ));
    assert_eq!(err.settler(), Some(&SettlerId::new("Scout")));
    assert_eq!(acceptor.accepted(), ids(&["W1"]));
}

#[test]
fn acceptance_override_without_alternative_fails_that_settler() {
    let log = EventLog::new();
    let founder = Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::candidates(
                vec![overriding("Ghost", None, Some(AcceptanceMode::Forget))],
                log.clone(),
            )),
            Arc::new(CountingProducer::new(log.clone())),
            Arc::new(RecordingAcceptor::new(log.clone())),
        )
        .build()
        .unwrap();

    let err = founder.found_typed(&mut Anthill, None).unwrap_err();
    assert!(matches!(
        err,
        SettleError::Acceptance {
            source: AcceptanceError::NoStrategy { mode: AcceptanceMode::Forget, .. },
            ..
        }
    ));
}

#[test]
fn override_matching_the_group_uses_the_group_strategy() {
    let log = EventLog::new();
    let producer = Arc::new(CountingProducer::new(log.clone()));
    let founder = Composition::<Anthill>::new()
        .group(
            "workers",
            Arc::new(FixedSelector::candidates(
                vec![overriding(
                    "W1",
                    Some(ProductionMode::Construct),
                    Some(AcceptanceMode::Callback),
                )],
                log.clone(),
            )),
            producer.clone(),
            Arc::new(RecordingAcceptor::new(log.clone())),
        )
        .build()
        .unwrap();

    founder.found_typed(&mut Anthill, None).unwrap();
    assert_eq!(producer.calls(), 1);
}

#[test]
fn empty_composition_founds_nothing() {
    let founder = Composition::<Anthill>::new().build().unwrap();
    founder.found_typed(&mut Anthill, None).unwrap();
    assert!(founder.groups().is_empty());
}

// --- Type erasure ---

#[test]
fn dyn_found_downcasts_to_the_colony_type() {
    let t = healthy();
    let founder: &dyn Founder = &t.founder;
    let mut colony = Anthill;
    founder.found(&mut colony, None).unwrap();
    assert_eq!(t.acceptor.accepted().len(), 3);
}

#[test]
fn dyn_found_rejects_a_foreign_colony() {
    let t = healthy();
    let founder: &dyn Founder = &t.founder;
    let err = founder.found(&mut Beehive, None).unwrap_err();
    assert!(matches!(
        err,
        SettleError::Composition(CompositionError::ColonyMismatch { .. })
    ));
    assert!(t.log.steps().is_empty());
}

// --- Concurrency ---

#[test]
fn founder_is_shared_across_threads() {
    let t = healthy();
    let founder = &t.founder;
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| founder.found_typed(&mut Anthill, None).unwrap());
        }
    });
    assert_eq!(t.producer.calls(), 12);
    assert_eq!(t.acceptor.accepted().len(), 12);
}

#[test]
fn founder_is_send_and_sync() {
    fn _assert_send_sync<T: Send + Sync>() {}
    _assert_send_sync::<ColonyFounder<Anthill>>();
}
