//! End-to-end flow: templates on disk → registration → dispatch → tick.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use questline_core::actor::ActorId;
use questline_core::capability::StaticCapabilities;
use questline_engine::application::audit::AuditSink;
use questline_engine::application::bus::InProcessEventBus;
use questline_engine::application::dispatch::Dispatcher;
use questline_engine::application::profiles::MemoryProfileProvider;
use questline_engine::application::registry::ObjectiveRegistry;
use questline_engine::application::tick::TickScheduler;
use questline_engine::domain::profile::PlayerProfile;
use questline_engine::domain::quest::QuestStatus;
use questline_objectives::events::PlayerPickupExpEvent;
use questline_objectives::register_builtins;
use questline_templates::store::TemplateStore;
use questline_test_support::{RecordingAuditSink, SteppingClock};

const TEMPLATES: &str = "
daily_1:
  task:
    0:
      objective: pickup exp
      condition:
        exp: 10
      goal:
        amount: 15
patience:
  task:
    0:
      objective: wait
      condition:
        duration: 60
";

struct World {
    registry: Arc<ObjectiveRegistry>,
    store: TemplateStore,
    profiles: Arc<MemoryProfileProvider>,
    clock: Arc<SteppingClock>,
    audit: Arc<RecordingAuditSink>,
    bus: InProcessEventBus,
    scheduler: TickScheduler,
}

fn world() -> World {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("quests.yml"), TEMPLATES).unwrap();

    let registry = Arc::new(ObjectiveRegistry::new());
    let host = StaticCapabilities::new(["minecraft"], 1);
    register_builtins(&registry, &host);

    let store = TemplateStore::new();
    store.load_all(root.path(), &registry).unwrap();

    let profiles = Arc::new(MemoryProfileProvider::new());
    let clock = Arc::new(SteppingClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    ));
    let audit = Arc::new(RecordingAuditSink::new());
    let audit_sink: Arc<dyn AuditSink> = Arc::clone(&audit) as _;

    let dispatcher = Arc::new(
        Dispatcher::new(
            Arc::clone(&registry),
            Arc::clone(&profiles) as _,
            Arc::clone(&clock) as _,
        )
        .with_audit(Arc::clone(&audit_sink)),
    );
    let bus = InProcessEventBus::new();
    dispatcher.subscribe_all(&bus);

    let scheduler = TickScheduler::new(Arc::clone(&profiles) as _, Arc::clone(&clock) as _)
        .with_audit(audit_sink);

    World {
        registry,
        store,
        profiles,
        clock,
        audit,
        bus,
        scheduler,
    }
}

#[tokio::test]
async fn test_pickup_exp_quest_completes_through_the_full_stack() {
    // Arrange
    let world = world();
    let actor = ActorId::new();
    let quest = world
        .store
        .instantiate("daily_1", &world.registry, world.clock.as_ref())
        .unwrap();
    let mut profile = PlayerProfile::new(actor);
    profile.add_quest(quest);
    let handle = world.profiles.insert(profile);

    // Act — one orb satisfying exp >= 10 and carrying the full goal.
    world
        .bus
        .publish(Arc::new(PlayerPickupExpEvent {
            actor,
            amount: 15,
            reason: "MOB_KILL".to_owned(),
        }))
        .await;

    // Assert
    let profile = handle.lock().await;
    assert_eq!(profile.quests[0].status(), QuestStatus::Completed);
    assert!(!world.audit.records().is_empty());
}

#[tokio::test]
async fn test_wait_quest_completes_through_the_tick_sweep() {
    // Arrange
    let world = world();
    let quest = world
        .store
        .instantiate("patience", &world.registry, world.clock.as_ref())
        .unwrap();
    let mut profile = PlayerProfile::new(ActorId::new());
    profile.add_quest(quest);
    let handle = world.profiles.insert(profile);

    // Act / Assert — nothing completes before the duration elapses.
    world.scheduler.run_sweep().await;
    assert_eq!(handle.lock().await.quests[0].status(), QuestStatus::Active);

    world.clock.advance(chrono::Duration::seconds(61));
    world.scheduler.run_sweep().await;
    assert_eq!(
        handle.lock().await.quests[0].status(),
        QuestStatus::Completed
    );
}
