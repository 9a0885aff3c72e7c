use acfgen_core::classify::{
    classify_by_name, classify_by_topology, classify_groups, GroupRole,
};
use acfgen_core::geom::Vec3;
use acfgen_core::mesh::{MeshGroup, ObjDocument};
use acfgen_core::report::{ConversionLog, LogLevel};

fn group(name: &str, vertices: Vec<Vec3>) -> MeshGroup {
    MeshGroup {
        name: name.to_string(),
        vertices,
        faces: Vec::new(),
    }
}

/// A flat plate spanning far wider in y than in x or z.
fn wide_plate() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, -5.0, 0.0),
        Vec3::new(1.0, -5.0, 0.0),
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(1.0, 5.0, 0.0),
    ]
}

/// Two octagonal rings at x=0 and x=4.
fn tube() -> Vec<Vec3> {
    let mut verts = Vec::new();
    for &x in &[0.0, 4.0] {
        for i in 0..8 {
            let a = std::f64::consts::TAU * i as f64 / 8.0;
            verts.push(Vec3::new(x, a.cos(), a.sin()));
        }
    }
    verts
}

#[test]
fn name_stage_matches_role_keywords() {
    assert_eq!(Some(GroupRole::Wing1), classify_by_name("Wing1"));
    assert_eq!(Some(GroupRole::Wing2), classify_by_name("wing2_outer"));
    assert_eq!(Some(GroupRole::HStab), classify_by_name("Horiz_Stab"));
    assert_eq!(Some(GroupRole::HStab), classify_by_name("hstab"));
    assert_eq!(Some(GroupRole::VStab), classify_by_name("stab_v"));
    assert_eq!(Some(GroupRole::VStab), classify_by_name("Vert_Stab"));
    assert_eq!(Some(GroupRole::LeftCowling), classify_by_name("LF_Cowling"));
    assert_eq!(Some(GroupRole::RightCowling), classify_by_name("rt_cowl"));
    assert_eq!(Some(GroupRole::Body), classify_by_name("Fuselage"));
    assert_eq!(Some(GroupRole::Body), classify_by_name("tail_fairing"));
    assert_eq!(None, classify_by_name("Cube.001"));
}

#[test]
fn cowl_without_side_is_unrecognized() {
    assert_eq!(Some(GroupRole::Unrecognized), classify_by_name("cowling"));
}

#[test]
fn topology_stage_reads_wide_groups_as_wings() {
    assert_eq!(
        GroupRole::Wing1,
        classify_by_topology(&group("Cube.001", wide_plate()))
    );
}

#[test]
fn topology_stage_reads_round_sections_as_body() {
    assert_eq!(GroupRole::Body, classify_by_topology(&group("Cube.002", tube())));
}

#[test]
fn topology_stage_rejects_degenerate_groups() {
    assert_eq!(
        GroupRole::Unrecognized,
        classify_by_topology(&group("dot", vec![Vec3::new(0.0, 0.0, 0.0)]))
    );
}

#[test]
fn ambiguous_compact_group_defaults_to_body() {
    // A unit cube: no lateral dominance, no round sections.
    let verts = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ];
    assert_eq!(GroupRole::Body, classify_by_topology(&group("Cube.003", verts)));
}

#[test]
fn duplicate_single_slot_role_keeps_later_group() {
    let doc = ObjDocument {
        groups: vec![
            group("wing_inner", wide_plate()),
            group("wing_outer", wide_plate()),
        ],
    };
    let mut log = ConversionLog::new();
    let classification = classify_groups(&doc, &mut log);

    assert_eq!(Some(GroupRole::Unrecognized), classification.role_of("wing_inner"));
    assert_eq!(Some(GroupRole::Wing1), classification.role_of("wing_outer"));
    assert!(log
        .messages
        .iter()
        .any(|m| m.level == LogLevel::Warning && m.code == "classification_conflict"));
}

#[test]
fn body_groups_share_the_role() {
    let doc = ObjDocument {
        groups: vec![group("Fuselage", tube()), group("tail_cone", tube())],
    };
    let mut log = ConversionLog::new();
    let classification = classify_groups(&doc, &mut log);

    assert_eq!(2, classification.names_with(GroupRole::Body).len());
    assert_eq!(0, log.warning_count());
}
