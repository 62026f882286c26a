// tests/unit_events.rs
use coverlab_core::events::{read_events, EventKind, EventLogger, LOG_FILE};
use coverlab_core::graph::GraphFamily;

#[test]
fn test_events_append_as_json_lines() {
    let d = tempfile::tempdir().unwrap();
    let out = d.path().join("out");
    let logger = EventLogger::new(&out);
    logger.log(EventKind::RunStarted {
        command: "bench".to_string(),
        seed: 3,
    });
    logger.log(EventKind::GenerationRejected {
        family: GraphFamily::SmallWorld,
        nodes: 10,
        connections: 40,
        count: 2,
    });

    let path = out.join(LOG_FILE);
    assert_eq!(logger.path(), Some(path.as_path()));
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw.lines().count(), 2);
    assert!(raw.contains("\"run_started\""));
    assert!(raw.contains("\"small_world\""));

    let events = read_events(&path).unwrap();
    assert_eq!(
        events[0].kind,
        EventKind::RunStarted {
            command: "bench".to_string(),
            seed: 3
        }
    );
}

#[test]
fn test_disabled_logger_writes_nothing() {
    let logger = EventLogger::disabled();
    logger.log(EventKind::PlotWritten {
        path: "x.svg".to_string(),
    });
    assert!(logger.path().is_none());
}
