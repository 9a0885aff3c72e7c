use crate::structs::WingPlanform;
use crate::ExtractConfig;
use acfgen_core::classify::{Classification, GroupRole, Side};
use acfgen_core::mesh::{MeshGroup, ObjDocument};
use acfgen_core::report::ConversionLog;
use itertools::{Itertools, MinMaxResult};
use nalgebra::Point3;

/// Wing surfaces get a cambered section; stabilizers a thin symmetric one.
pub const WING_AIRFOIL: &str = "NACA 2412";
pub const STAB_AIRFOIL: &str = "NACA 0009 (symmetrical)";

/// Static policy: the airfoil follows the role, never the mesh shape.
pub fn airfoil_for_role(role: GroupRole) -> Option<&'static str> {
    match role {
        GroupRole::Wing1 | GroupRole::Wing2 => Some(WING_AIRFOIL),
        GroupRole::HStab | GroupRole::VStab => Some(STAB_AIRFOIL),
        _ => None,
    }
}

/// Extract one planform per recognized wing/stab group. Surfaces are
/// independent; nothing merges.
pub fn extract_wings(
    doc: &ObjDocument,
    classification: &Classification,
    cfg: &ExtractConfig,
    log: &mut ConversionLog,
) -> Vec<WingPlanform> {
    let mut wings = Vec::new();
    for role in [
        GroupRole::Wing1,
        GroupRole::Wing2,
        GroupRole::HStab,
        GroupRole::VStab,
    ] {
        let names = classification.names_with(role);
        let Some(name) = names.first() else { continue };
        let group = doc.group(name).expect("classified group exists");
        match planform(group, role, cfg) {
            Some(wing) => {
                log.info(
                    "wing_extracted",
                    format!(
                        "'{}' ({}): span {:.3} m, sweep {:.2}°, dihedral {:.2}°, airfoil {}",
                        wing.name,
                        role.as_str(),
                        wing.span,
                        wing.sweep_deg,
                        wing.dihedral_deg,
                        wing.airfoil
                    ),
                );
                wings.push(wing);
            }
            None => {
                log.warning(
                    "degenerate_wing",
                    format!("group '{name}' has no spanwise extent; skipped"),
                );
            }
        }
    }
    wings
}

fn planform(group: &MeshGroup, role: GroupRole, cfg: &ExtractConfig) -> Option<WingPlanform> {
    let pts: Vec<Point3<f64>> = group
        .vertices
        .iter()
        .map(|v| Point3::new(v.x, v.y, v.z))
        .collect();

    // Spanwise axis: lateral for wings and the horizontal stab, vertical
    // for the vertical stab. Chordwise is always longitudinal.
    let vertical_surface = role == GroupRole::VStab;
    let spanwise = |p: &Point3<f64>| if vertical_surface { p.z } else { p.y };

    let (s_min, s_max) = match pts.iter().map(spanwise).minmax() {
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
        _ => return None,
    };
    let span = s_max - s_min;
    if span <= 0.0 {
        return None;
    }

    // Root is the end nearer the fuselage centerline.
    let (s_root, s_tip) = if s_min.abs() <= s_max.abs() {
        (s_min, s_max)
    } else {
        (s_max, s_min)
    };

    let side = if vertical_surface {
        None
    } else if (s_root + s_tip) * 0.5 < 0.0 {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    };

    let band = (cfg.chord_band_frac * span).max(f64::EPSILON);
    let root_pts: Vec<&Point3<f64>> = pts
        .iter()
        .filter(|p| (spanwise(p) - s_root).abs() <= band)
        .collect();
    let tip_pts: Vec<&Point3<f64>> = pts
        .iter()
        .filter(|p| (spanwise(p) - s_tip).abs() <= band)
        .collect();
    if root_pts.is_empty() || tip_pts.is_empty() {
        return None;
    }

    let root_chord = chord_extent(&root_pts);
    let tip_chord = chord_extent(&tip_pts);

    // Leading edge runs root-to-tip along the forward-most vertices.
    let le_root = root_pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let le_tip = tip_pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let sweep_mag = (le_tip - le_root).atan2(span).to_degrees();

    let dihedral_mag = if vertical_surface {
        // A vertical surface is dihedral 90° by definition.
        90.0
    } else {
        let rise = mean(tip_pts.iter().map(|p| p.z)) - mean(root_pts.iter().map(|p| p.z));
        rise.atan2(span).to_degrees()
    };

    // Mirrored (left-side) groups carry mirrored signs.
    let sign = match side {
        Some(Side::Left) => -1.0,
        _ => 1.0,
    };

    let airfoil = airfoil_for_role(role).expect("wing role");

    Some(WingPlanform {
        name: group.name.clone(),
        role,
        side,
        span,
        root_chord,
        tip_chord,
        sweep_deg: sign * sweep_mag,
        dihedral_deg: if vertical_surface {
            dihedral_mag
        } else {
            sign * dihedral_mag
        },
        airfoil,
    })
}

fn chord_extent(pts: &[&Point3<f64>]) -> f64 {
    match pts.iter().map(|p| p.x).minmax() {
        MinMaxResult::MinMax(lo, hi) => hi - lo,
        MinMaxResult::OneElement(_) => 0.0,
        MinMaxResult::NoElements => 0.0,
    }
}

fn mean<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in iter {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
