//! Integration tests for routing whole diagram documents

use bendpoint_router::model::format_points;
use bendpoint_router::{
    parse_document, route_document, route_document_with_config, write_document, DocumentError,
    Error, PipelineConfig, Point, RouterConfig,
};

const PROCESS: &str = r#"
[router]
stack_offset = 20

[[shapes]]
id = "start"
bounds = { x = 0, y = 0, width = 40, height = 40 }

[[shapes]]
id = "review"
bounds = { x = 200, y = 0, width = 100, height = 40 }
anchors = [{ id = "feedback", offset = { x = 50, y = 40 } }]

[[connections]]
id = "submit"
source = { shape = "start", anchor = "right" }
target = { shape = "review", anchor = "left" }
bendpoints = [{ x = 20, y = 20 }]

[[connections]]
id = "resubmit"
source = { shape = "start", anchor = "right" }
target = { shape = "review", anchor = "left" }

[[connections]]
id = "rework"
source = { shape = "review", anchor = "feedback" }
target = { shape = "review", anchor = "top" }
"#;

#[test]
fn test_route_whole_document() {
    let routed = route_document_with_config(PROCESS, &PipelineConfig::default())
        .expect("Should route");
    assert_eq!(
        routed.changed,
        vec!["submit".to_string(), "rework".to_string()]
    );

    let diagram = &routed.document.diagram;
    let submit = diagram.connection_by_name("submit").unwrap();
    let resubmit = diagram.connection_by_name("resubmit").unwrap();
    let rework = diagram.connection_by_name("rework").unwrap();

    // "resubmit" already covers the straight route, so "submit" jogs around it
    insta::assert_snapshot!(
        format_points(&diagram.connection(submit).unwrap().bendpoints),
        @"(93,20) (93,40) (147,40) (147,20)"
    );
    assert!(diagram.connection(resubmit).unwrap().bendpoints.is_empty());
    insta::assert_snapshot!(
        format_points(&diagram.connection(rework).unwrap().bendpoints),
        @"(320,20) (320,-20) (250,-20)"
    );
    assert_eq!(routed.interchange.sync_count(), 2);
}

#[test]
fn test_routed_document_round_trips() {
    let first = route_document(PROCESS).expect("Should route");
    let reloaded = parse_document(&first).expect("Should parse routed output");
    assert_eq!(reloaded.router.map(|r| r.stack_offset), Some(20));

    let second = route_document_with_config(&first, &PipelineConfig::default())
        .expect("Should route again");
    assert!(second.changed.is_empty());
    assert_eq!(second.to_toml().unwrap(), first);
}

#[test]
fn test_route_selected_connection_only() {
    let config = PipelineConfig::new().with_connection("rework");
    let routed = route_document_with_config(PROCESS, &config).expect("Should route");
    assert_eq!(routed.changed, vec!["rework".to_string()]);

    let diagram = &routed.document.diagram;
    let submit = diagram.connection_by_name("submit").unwrap();
    assert_eq!(diagram.connection(submit).unwrap().bendpoints.len(), 1);
}

#[test]
fn test_explicit_router_config_wins() {
    let config = PipelineConfig::new().with_router(RouterConfig::new().with_loop_clearance(40));
    let routed = route_document_with_config(PROCESS, &config).expect("Should route");
    let diagram = &routed.document.diagram;
    let rework = diagram.connection_by_name("rework").unwrap();
    insta::assert_snapshot!(
        format_points(&diagram.connection(rework).unwrap().bendpoints),
        @"(340,20) (340,-40) (250,-40)"
    );
}

#[test]
fn test_force_reroutes_shaped_loop() {
    let source = PROCESS.replace(
        "target = { shape = \"review\", anchor = \"top\" }",
        concat!(
            "target = { shape = \"review\", anchor = \"top\" }\n",
            "bendpoints = [{ x = 360, y = 20 }, { x = 360, y = -60 }, { x = 250, y = -60 }]",
        ),
    );
    let config = PipelineConfig::new().with_connection("rework");
    let kept = route_document_with_config(&source, &config).expect("Should route");
    assert!(kept.changed.is_empty());

    let forced = route_document_with_config(&source, &config.with_force(true))
        .expect("Should route");
    assert_eq!(forced.changed, vec!["rework".to_string()]);
}

#[test]
fn test_forced_run_does_not_persist_force() {
    let config = PipelineConfig::new().with_connection("rework").with_force(true);
    let forced = route_document_with_config(PROCESS, &config).expect("Should route");
    let output = forced.to_toml().expect("Should serialize");

    let mut reloaded = parse_document(&output).expect("Should parse routed output");
    let rework = reloaded.diagram.connection_by_name("rework").unwrap();
    let connection = reloaded.diagram.connection_mut(rework).unwrap();
    assert!(!connection.force_routing);

    // the user reshapes the loop after the forced run
    connection.bendpoints = vec![
        Point::new(360, 20),
        Point::new(360, -60),
        Point::new(250, -60),
    ];
    let reshaped = write_document(&reloaded.diagram, reloaded.router.as_ref()).unwrap();

    let rerouted = route_document_with_config(&reshaped, &PipelineConfig::default())
        .expect("Should route");
    assert!(!rerouted.changed.contains(&"rework".to_string()));
    let diagram = &rerouted.document.diagram;
    let rework = diagram.connection_by_name("rework").unwrap();
    insta::assert_snapshot!(
        format_points(&diagram.connection(rework).unwrap().bendpoints),
        @"(360,20) (360,-60) (250,-60)"
    );
}

#[test]
fn test_unknown_anchor_report_points_at_source() {
    let source = PROCESS.replace("anchor = \"feedback\"", "anchor = \"fedback\"");
    let doc_err = match route_document(&source).unwrap_err() {
        Error::Document(e) => e,
        other => panic!("expected a document error, got {other:?}"),
    };
    assert!(matches!(doc_err, DocumentError::UnknownAnchor { .. }));

    let report = doc_err.format(&source, "process.toml");
    assert!(report.contains("process.toml"));
    assert!(report.contains("shape 'review' has no anchor 'fedback'"));
}

#[test]
fn test_unknown_field_is_a_syntax_error() {
    let source = PROCESS.replace("[router]\n", "[router]\nmax_pases = 2\n");
    let err = route_document(&source).unwrap_err();
    assert!(matches!(err, Error::Document(DocumentError::Syntax { .. })));
}
