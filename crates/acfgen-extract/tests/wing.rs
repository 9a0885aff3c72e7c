use acfgen_core::classify::{Classification, GroupRole, Side};
use acfgen_core::geom::Vec3;
use acfgen_core::mesh::{MeshGroup, ObjDocument};
use acfgen_core::report::ConversionLog;
use acfgen_extract::wing::{airfoil_for_role, extract_wings, STAB_AIRFOIL, WING_AIRFOIL};
use acfgen_extract::ExtractConfig;

fn doc_with(name: &str, role: GroupRole, vertices: Vec<Vec3>) -> (ObjDocument, Classification) {
    let doc = ObjDocument {
        groups: vec![MeshGroup {
            name: name.to_string(),
            vertices,
            faces: Vec::new(),
        }],
    };
    let classification = Classification {
        assignments: vec![(name.to_string(), role)],
    };
    (doc, classification)
}

/// Rectangular right wing: chord 1 m (x 2..3), span 5 m (y 0..5), with an
/// optional tip rise.
fn right_wing(tip_rise: f64) -> Vec<Vec3> {
    vec![
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(2.0, 5.0, tip_rise),
        Vec3::new(3.0, 5.0, tip_rise),
    ]
}

#[test]
fn span_and_chords_from_bounding_extents() {
    let (doc, classification) = doc_with("Wing1", GroupRole::Wing1, right_wing(0.0));
    let mut log = ConversionLog::new();
    let wings = extract_wings(&doc, &classification, &ExtractConfig::default(), &mut log);

    assert_eq!(1, wings.len());
    let w = &wings[0];
    assert!((w.span - 5.0).abs() < 1e-9);
    assert!((w.root_chord - 1.0).abs() < 1e-9);
    assert!((w.tip_chord - 1.0).abs() < 1e-9);
    assert_eq!(Some(Side::Right), w.side);
    assert!(w.sweep_deg.abs() < 1e-9);
    assert!(w.dihedral_deg.abs() < 1e-9);
}

#[test]
fn mirrored_wings_carry_mirrored_angles() {
    let right = right_wing(0.5);
    let left: Vec<Vec3> = right.iter().map(|v| Vec3::new(v.x, -v.y, v.z)).collect();

    let (doc_r, cls_r) = doc_with("wing_r", GroupRole::Wing1, right);
    let (doc_l, cls_l) = doc_with("wing_l", GroupRole::Wing2, left);
    let cfg = ExtractConfig::default();
    let mut log = ConversionLog::new();

    let wr = extract_wings(&doc_r, &cls_r, &cfg, &mut log).remove(0);
    let wl = extract_wings(&doc_l, &cls_l, &cfg, &mut log).remove(0);

    assert_eq!(Some(Side::Right), wr.side);
    assert_eq!(Some(Side::Left), wl.side);
    assert!(wr.dihedral_deg > 0.0);
    assert_eq!(wr.dihedral_deg, -wl.dihedral_deg);
    assert!((wr.span - wl.span).abs() < 1e-9);
}

#[test]
fn swept_tip_yields_positive_sweep() {
    // Leading edge moves aft by 1 m over a 5 m span.
    let verts = vec![
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(3.0, 5.0, 0.0),
        Vec3::new(4.0, 5.0, 0.0),
    ];
    let (doc, classification) = doc_with("Wing1", GroupRole::Wing1, verts);
    let mut log = ConversionLog::new();
    let wings = extract_wings(&doc, &classification, &ExtractConfig::default(), &mut log);

    let expected = (1.0f64).atan2(5.0).to_degrees();
    assert!((wings[0].sweep_deg - expected).abs() < 1e-9);
}

#[test]
fn vertical_stab_spans_the_vertical_axis() {
    let verts = vec![
        Vec3::new(8.0, 0.0, 0.0),
        Vec3::new(9.5, 0.0, 0.0),
        Vec3::new(8.5, 0.0, 2.0),
        Vec3::new(9.5, 0.0, 2.0),
    ];
    let (doc, classification) = doc_with("Vert_Stab", GroupRole::VStab, verts);
    let mut log = ConversionLog::new();
    let wings = extract_wings(&doc, &classification, &ExtractConfig::default(), &mut log);

    let w = &wings[0];
    assert!((w.span - 2.0).abs() < 1e-9);
    assert_eq!(None, w.side);
    assert!((w.dihedral_deg - 90.0).abs() < 1e-9);
    assert!((w.root_chord - 1.5).abs() < 1e-9);
    assert!((w.tip_chord - 1.0).abs() < 1e-9);
}

#[test]
fn airfoil_follows_role_not_geometry() {
    assert_eq!(Some(WING_AIRFOIL), airfoil_for_role(GroupRole::Wing1));
    assert_eq!(Some(WING_AIRFOIL), airfoil_for_role(GroupRole::Wing2));
    assert_eq!(Some(STAB_AIRFOIL), airfoil_for_role(GroupRole::HStab));
    assert_eq!(Some(STAB_AIRFOIL), airfoil_for_role(GroupRole::VStab));
    assert_eq!(None, airfoil_for_role(GroupRole::Body));

    // Same geometry, different roles: the airfoil changes with the role.
    let cfg = ExtractConfig::default();
    let mut log = ConversionLog::new();
    let (doc_w, cls_w) = doc_with("surface", GroupRole::Wing1, right_wing(0.0));
    let (doc_s, cls_s) = doc_with("surface", GroupRole::HStab, right_wing(0.0));
    let as_wing = extract_wings(&doc_w, &cls_w, &cfg, &mut log).remove(0);
    let as_stab = extract_wings(&doc_s, &cls_s, &cfg, &mut log).remove(0);
    assert_eq!(WING_AIRFOIL, as_wing.airfoil);
    assert_eq!(STAB_AIRFOIL, as_stab.airfoil);
}

#[test]
fn degenerate_surface_is_skipped_with_warning() {
    let (doc, classification) = doc_with(
        "Wing1",
        GroupRole::Wing1,
        vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
    );
    let mut log = ConversionLog::new();
    let wings = extract_wings(&doc, &classification, &ExtractConfig::default(), &mut log);

    assert!(wings.is_empty());
    assert_eq!(1, log.warning_count());
}
