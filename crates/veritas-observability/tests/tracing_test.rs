use veritas_core::events::{DomainEvent, EventDispatcher, FactChange};
use veritas_core::traits::IEventBus;
use veritas_observability::tracing_setup::{init_tracing, init_tracing_with_filter};
use veritas_observability::EventLogger;

#[test]
fn first_init_installs_and_later_inits_are_no_ops() {
    assert!(init_tracing_with_filter("veritas=debug"));
    assert!(!init_tracing_with_filter("info"));
    assert!(!init_tracing());

    let bus = EventDispatcher::new();
    EventLogger::attach(&bus);
    bus.publish(DomainEvent::FoundationFactChanged {
        fact_id: "pi".into(),
        change: FactChange::Updated,
        revision: 3,
    });
    assert_eq!(bus.published_count(), 1);
}
