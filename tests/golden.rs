//! Golden tests for the guidance kernel.
//!
//! These tests pin the behavior of turn collapsing and verbosity reduction
//! on hand-built route legs.

use guidance_kernel::{
    canonical_hash_hex, check_route_invariants, collapse_turn_instructions,
    suppress_short_name_segments, DirectionModifier, GuidanceConfig, GuidanceProcessor,
    Intersection, InvariantViolation, RouteStep, Signage, TravelMode, TurnInstruction, TurnType,
    WaypointType,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Intersection entered from `in_bearing` and left towards `out_bearing`.
fn make_intersection(in_bearing: f64, out_bearing: f64) -> Intersection {
    Intersection::new(vec![in_bearing, out_bearing], vec![false, true], 0, 1)
}

fn make_step(
    name: (u32, &str),
    turn_type: TurnType,
    modifier: DirectionModifier,
    distance: f64,
    intersection: Intersection,
) -> RouteStep {
    RouteStep::new(
        Signage::named(name.0, name.1),
        TravelMode::Driving,
        TurnInstruction::new(turn_type, modifier),
        distance,
        distance / 10.0,
        vec![intersection],
    )
}

fn make_depart(name: (u32, &str), heading: f64, distance: f64) -> RouteStep {
    RouteStep::waypoint(
        WaypointType::Depart,
        Signage::named(name.0, name.1),
        TravelMode::Driving,
        distance,
        distance / 10.0,
        Intersection::new(vec![heading], vec![true], 0, 0),
    )
}

fn make_arrive(name: (u32, &str), heading: f64) -> RouteStep {
    RouteStep::waypoint(
        WaypointType::Arrive,
        Signage::named(name.0, name.1),
        TravelMode::Driving,
        0.0,
        0.0,
        Intersection::new(vec![(heading + 180.0) % 360.0], vec![true], 0, 0),
    )
}

fn total_distance(steps: &[RouteStep]) -> f64 {
    steps.iter().map(|step| step.distance).sum()
}

fn staggered_route() -> Vec<RouteStep> {
    vec![
        make_depart((5, "Elm St"), 0.0, 200.0),
        make_step((6, "Cross St"), TurnType::Turn, DirectionModifier::Right, 2.0, make_intersection(180.0, 85.0)),
        make_step((5, "Elm St"), TurnType::Turn, DirectionModifier::Left, 150.0, make_intersection(265.0, 5.0)),
        make_arrive((5, "Elm St"), 5.0),
    ]
}

fn u_turn_route() -> Vec<RouteStep> {
    vec![
        make_depart((1, "Main St"), 10.0, 300.0),
        make_step((2, "Gap"), TurnType::Turn, DirectionModifier::Left, 15.0, make_intersection(190.0, 280.0)),
        make_step((1, "Main St"), TurnType::Turn, DirectionModifier::Left, 300.0, make_intersection(100.0, 192.0)),
        make_arrive((1, "Main St"), 192.0),
    ]
}

/// A short right turn followed by two name changes.
fn chained_name_change_route() -> Vec<RouteStep> {
    vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((2, "Oak St"), TurnType::Turn, DirectionModifier::Right, 10.0, make_intersection(180.0, 90.0)),
        make_step((3, "Elm St"), TurnType::NewName, DirectionModifier::Straight, 10.0, make_intersection(270.0, 90.0)),
        make_step((4, "Pine St"), TurnType::NewName, DirectionModifier::Straight, 300.0, make_intersection(270.0, 90.0)),
        make_arrive((4, "Pine St"), 90.0),
    ]
}

fn suppressed_then_name_change_route() -> Vec<RouteStep> {
    vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((2, "Side St"), TurnType::Suppressed, DirectionModifier::Straight, 5.0, make_intersection(180.0, 0.0)),
        make_step((3, "Broad St"), TurnType::NewName, DirectionModifier::Straight, 200.0, make_intersection(180.0, 0.0)),
        make_arrive((3, "Broad St"), 0.0),
    ]
}

/// A suppressed right bend leading into a right turn onto `road`.
fn bend_then_turn_route(road: (u32, &str)) -> Vec<RouteStep> {
    vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((1, "Main St"), TurnType::Suppressed, DirectionModifier::SlightRight, 20.0, make_intersection(180.0, 30.0)),
        make_step(road, TurnType::Turn, DirectionModifier::Right, 200.0, make_intersection(210.0, 110.0)),
        make_arrive(road, 110.0),
    ]
}

fn turn_then_bend_route() -> Vec<RouteStep> {
    vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((2, "Oak St"), TurnType::Turn, DirectionModifier::Right, 20.0, make_intersection(180.0, 90.0)),
        make_step((2, "Oak St"), TurnType::Suppressed, DirectionModifier::SlightRight, 200.0, make_intersection(270.0, 125.0)),
        make_arrive((2, "Oak St"), 125.0),
    ]
}

fn straight_then_forced_turn_route() -> Vec<RouteStep> {
    vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((2, "Side St"), TurnType::Suppressed, DirectionModifier::Straight, 40.0, make_intersection(180.0, 0.0)),
        make_step((3, "Oak St"), TurnType::Turn, DirectionModifier::Left, 200.0, make_intersection(180.0, 270.0)),
        make_arrive((3, "Oak St"), 270.0),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Collapse Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_staggered_intersection_collapses_to_straight() {
    init_tracing();
    let steps = staggered_route();
    let before = total_distance(&steps);

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Suppressed, DirectionModifier::Straight)
    );
    assert_eq!(collapsed[1].signage.name, "Elm St");
    assert_eq!(collapsed[1].distance, 152.0);
    assert_eq!(collapsed[1].intersections.len(), 2);
    assert!((total_distance(&collapsed) - before).abs() < 1e-9);
}

#[test]
fn test_staggered_intersection_onto_other_road_is_name_change() {
    let mut steps = staggered_route();
    steps[2].signage = Signage::named(7, "Oak St");

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::NewName, DirectionModifier::Straight)
    );
    assert_eq!(collapsed[1].signage.name, "Oak St");
}

#[test]
fn test_u_turn_collapses_to_continue_uturn() {
    init_tracing();
    let collapsed = collapse_turn_instructions(u_turn_route(), &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Continue, DirectionModifier::UTurn)
    );
    assert_eq!(collapsed[1].signage.name, "Main St");
    assert_eq!(collapsed[1].distance, 315.0);
}

#[test]
fn test_u_turn_onto_other_road_not_collapsed() {
    let mut steps = u_turn_route();
    steps[2].signage = Signage::named(3, "Other St");

    let collapsed = collapse_turn_instructions(steps.clone(), &GuidanceConfig::default());
    assert_eq!(collapsed, steps);
}

#[test]
fn test_name_oscillation_suppressed() {
    let steps = vec![
        make_depart((1, "Main St"), 0.0, 400.0),
        make_step((2, "River Bridge"), TurnType::NewName, DirectionModifier::Straight, 80.0, make_intersection(180.0, 0.0)),
        make_step((1, "Main St"), TurnType::NewName, DirectionModifier::Straight, 250.0, make_intersection(180.0, 0.0)),
        make_arrive((1, "Main St"), 0.0),
    ];

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 2);
    assert_eq!(collapsed[0].maneuver.waypoint_type, WaypointType::Depart);
    assert_eq!(collapsed[0].turn_type(), TurnType::NoTurn);
    assert_eq!(collapsed[0].distance, 730.0);
    assert_eq!(collapsed[0].signage.name, "Main St");
}

#[test]
fn test_name_change_before_turn_folded_into_turn() {
    let steps = vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((2, "Broad St"), TurnType::NewName, DirectionModifier::Straight, 20.0, make_intersection(180.0, 0.0)),
        make_step((3, "Oak St"), TurnType::Turn, DirectionModifier::Right, 200.0, make_intersection(180.0, 90.0)),
        make_arrive((3, "Oak St"), 90.0),
    ];

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(collapsed[0].distance, 120.0);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Turn, DirectionModifier::Right)
    );
    assert_eq!(collapsed[1].signage.name, "Oak St");
}

#[test]
fn test_sliproad_merged_with_turn() {
    let steps = vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((0, ""), TurnType::Sliproad, DirectionModifier::SlightRight, 40.0, make_intersection(180.0, 45.0)),
        make_step((2, "Oak St"), TurnType::Turn, DirectionModifier::Right, 200.0, make_intersection(225.0, 90.0)),
        make_arrive((2, "Oak St"), 90.0),
    ];

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Turn, DirectionModifier::Right)
    );
    assert_eq!(collapsed[1].signage.name, "Oak St");
    assert_eq!(collapsed[1].distance, 240.0);
}

#[test]
fn test_roundabout_never_collapsed() {
    let steps = vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((3, "Circle"), TurnType::EnterRoundabout, DirectionModifier::Right, 5.0, make_intersection(180.0, 90.0)),
        make_step((3, "Circle"), TurnType::StayOnRoundabout, DirectionModifier::Straight, 5.0, make_intersection(270.0, 90.0)),
        make_step((4, "Exit Rd"), TurnType::LeaveRoundabout, DirectionModifier::Right, 5.0, make_intersection(270.0, 180.0)),
        make_arrive((4, "Exit Rd"), 180.0),
    ];

    let collapsed = collapse_turn_instructions(steps.clone(), &GuidanceConfig::default());
    assert_eq!(collapsed, steps);
}

#[test]
fn test_turn_followed_by_name_changes_absorbs_both() {
    init_tracing();
    let steps = chained_name_change_route();
    let before = total_distance(&steps);

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Turn, DirectionModifier::Right)
    );
    assert_eq!(collapsed[1].signage.name, "Pine St");
    assert_eq!(collapsed[1].distance, 320.0);
    assert_eq!(collapsed[1].intersections.len(), 3);
    assert!((total_distance(&collapsed) - before).abs() < 1e-9);
}

#[test]
fn test_name_change_after_tiny_suppressed_step_is_announced_early() {
    let steps = suppressed_then_name_change_route();
    let before = total_distance(&steps);

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::NewName, DirectionModifier::Straight)
    );
    assert_eq!(collapsed[1].signage.name, "Broad St");
    assert_eq!(collapsed[1].distance, 205.0);
    assert!((total_distance(&collapsed) - before).abs() < 1e-9);
}

#[test]
fn test_turn_followed_by_bend_takes_combined_direction() {
    let steps = turn_then_bend_route();
    let before = total_distance(&steps);

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    // 90° right then a 145° bend add up to a sharp right
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Turn, DirectionModifier::SharpRight)
    );
    assert_eq!(collapsed[1].signage.name, "Oak St");
    assert_eq!(collapsed[1].distance, 220.0);
    assert!((total_distance(&collapsed) - before).abs() < 1e-9);
}

#[test]
fn test_straight_step_before_forced_turn_becomes_the_turn() {
    let steps = straight_then_forced_turn_route();
    let before = total_distance(&steps);

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Turn, DirectionModifier::Left)
    );
    assert_eq!(collapsed[1].signage.name, "Oak St");
    assert_eq!(collapsed[1].distance, 240.0);
    assert!((total_distance(&collapsed) - before).abs() < 1e-9);
}

#[test]
fn test_bend_before_turn_onto_other_road_becomes_turn() {
    let steps = bend_then_turn_route((3, "Oak St"));
    let before = total_distance(&steps);

    let collapsed = collapse_turn_instructions(steps, &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Turn, DirectionModifier::Right)
    );
    assert_eq!(collapsed[1].signage.name, "Oak St");
    assert_eq!(collapsed[1].distance, 220.0);
    assert!((total_distance(&collapsed) - before).abs() < 1e-9);
}

#[test]
fn test_bend_before_turn_staying_on_road_becomes_continue() {
    let collapsed = collapse_turn_instructions(bend_then_turn_route((1, "Main St")), &GuidanceConfig::default());

    assert_eq!(collapsed.len(), 3);
    assert_eq!(
        collapsed[1].instruction(),
        TurnInstruction::new(TurnType::Continue, DirectionModifier::Right)
    );
    assert_eq!(collapsed[1].signage.name, "Main St");
    assert_eq!(collapsed[1].distance, 220.0);
}

#[test]
fn test_collapse_idempotent() {
    let config = GuidanceConfig::default();
    let routes = [
        staggered_route(),
        u_turn_route(),
        chained_name_change_route(),
        suppressed_then_name_change_route(),
        bend_then_turn_route((3, "Oak St")),
        turn_then_bend_route(),
        straight_then_forced_turn_route(),
    ];
    for route in routes {
        let once = collapse_turn_instructions(route, &config);
        let twice = collapse_turn_instructions(once.clone(), &config);
        assert_eq!(once, twice);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Verbosity Reduction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_short_name_segment_suppressed() {
    let steps = vec![
        make_depart((1, "Main St"), 0.0, 100.0),
        make_step((2, "Side St"), TurnType::NewName, DirectionModifier::Straight, 5.0, make_intersection(180.0, 0.0)),
        make_step((2, "Side St"), TurnType::Suppressed, DirectionModifier::Straight, 4.0, make_intersection(180.0, 0.0)),
        make_step((2, "Side St"), TurnType::Suppressed, DirectionModifier::Straight, 3.0, make_intersection(180.0, 0.0)),
        make_arrive((2, "Side St"), 0.0),
    ];
    let config = GuidanceConfig::default().with_name_segment_cutoff(20.0);

    let reduced = suppress_short_name_segments(steps.clone(), &config);

    assert_eq!(reduced.len(), steps.len());
    assert_eq!(reduced[1].turn_type(), TurnType::Suppressed);
    assert_eq!(reduced[1].distance, 5.0);
    assert_eq!(reduced[1].signage, steps[1].signage);
}

#[test]
fn test_verbosity_accepts_empty_input() {
    let reduced = suppress_short_name_segments(Vec::new(), &GuidanceConfig::default());
    assert!(reduced.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Processor
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_processor_reports_summary() {
    init_tracing();
    let config = GuidanceConfig::from_json(r#"{"name_segment_cutoff_length": 20.0}"#).unwrap();
    let processor = GuidanceProcessor::new(config.clone()).unwrap();

    let processed = processor.process(staggered_route());

    assert_eq!(processed.summary.input_steps, 4);
    assert_eq!(processed.summary.output_steps, 3);
    assert_eq!(processed.summary.merges, 1);
    assert_eq!(processed.summary.suppressed_announcements, 0);
    assert_eq!(processed.summary.config_params_hash, config.params_hash());
    assert!(check_route_invariants(&processed.steps).is_ok());
}

#[test]
fn test_processing_deterministic() {
    let processor = GuidanceProcessor::default();
    let a = processor.process(u_turn_route());
    let b = processor.process(u_turn_route());

    assert_eq!(a, b);
    assert_eq!(canonical_hash_hex(&a.steps), canonical_hash_hex(&b.steps));
}

#[test]
fn test_processed_route_serializes_flat_signage() {
    let processed = GuidanceProcessor::default().process(u_turn_route());
    let json = serde_json::to_value(&processed).unwrap();

    assert_eq!(json["steps"][1]["name"], "Main St");
    assert_eq!(json["steps"][1]["maneuver"]["instruction"]["type"], "continue");
    assert_eq!(json["summary"]["merges"], 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed Input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invariant_check_reports_missing_depart() {
    let mut steps = u_turn_route();
    steps.remove(0);

    assert!(matches!(
        check_route_invariants(&steps),
        Err(InvariantViolation::MissingSentinel { index: 0, .. })
    ));
}

#[test]
fn test_invariant_check_reports_step_without_intersections() {
    let mut steps = u_turn_route();
    steps[1].intersections.clear();

    assert_eq!(
        check_route_invariants(&steps),
        Err(InvariantViolation::NoIntersections(1))
    );
}

#[test]
#[should_panic(expected = "malformed route steps")]
fn test_collapse_panics_on_missing_arrive() {
    let mut steps = u_turn_route();
    steps.pop();
    collapse_turn_instructions(steps, &GuidanceConfig::default());
}
