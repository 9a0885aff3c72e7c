use crate::structs::{BodyGeometry, BodyKind, RingPoint, Station, Winding};
use crate::ExtractConfig;
use acfgen_core::classify::{Classification, GroupRole, Side};
use acfgen_core::mesh::ObjDocument;
use acfgen_core::report::ConversionLog;
use acfgen_core::Error;
use itertools::Itertools;
use nalgebra::{Point3, Vector2};
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Extract the merged fuselage plus one body per cowling group.
pub fn extract_bodies(
    doc: &ObjDocument,
    classification: &Classification,
    cfg: &ExtractConfig,
    log: &mut ConversionLog,
) -> Result<Vec<BodyGeometry>, Error> {
    let mut bodies = Vec::new();

    let body_names = classification.names_with(GroupRole::Body);
    if body_names.is_empty() {
        log.warning("no_body", "no body groups found; body block will be empty");
    } else {
        let mut verts = Vec::new();
        for name in &body_names {
            let group = doc.group(name).expect("classified group exists");
            verts.extend(group.vertices.iter().map(|v| Point3::new(v.x, v.y, v.z)));
        }
        let name = body_names.join("+");
        log.info(
            "body_merge",
            format!("merged {} body group(s) into '{name}'", body_names.len()),
        );
        bodies.push(build_body(&name, BodyKind::Fuselage, &verts, 0.0, cfg)?);
    }

    for (role, side) in [
        (GroupRole::LeftCowling, Side::Left),
        (GroupRole::RightCowling, Side::Right),
    ] {
        let names = classification.names_with(role);
        let Some(name) = names.first() else { continue };
        let group = doc.group(name).expect("classified group exists");
        let verts: Vec<Point3<f64>> = group
            .vertices
            .iter()
            .map(|v| Point3::new(v.x, v.y, v.z))
            .collect();
        // Mirrored pair: left rings rotate +φ, right rings −φ.
        let offset_deg = match side {
            Side::Left => cfg.cowl_offset_deg,
            Side::Right => -cfg.cowl_offset_deg,
        };
        bodies.push(build_body(name, BodyKind::Cowl(side), &verts, offset_deg, cfg)?);
    }

    Ok(bodies)
}

fn build_body(
    name: &str,
    kind: BodyKind,
    verts: &[Point3<f64>],
    offset_deg: f64,
    cfg: &ExtractConfig,
) -> Result<BodyGeometry, Error> {
    // Ring math is recentered on the mesh's own centroid so off-axis
    // meshes keep their cross-section shape.
    let n = verts.len().max(1) as f64;
    let center_lat = verts.iter().map(|p| p.y).sum::<f64>() / n;
    let center_vert = verts.iter().map(|p| p.z).sum::<f64>() / n;

    let mut bins: BTreeMap<i64, Vec<Point3<f64>>> = BTreeMap::new();
    for p in verts {
        let key = (p.x / cfg.station_tolerance).round() as i64;
        bins.entry(key).or_default().push(*p);
    }
    if bins.len() < 2 {
        return Err(Error::InsufficientGeometry {
            name: name.to_string(),
            found: bins.len(),
        });
    }

    let offset_rad = offset_deg.to_radians();
    let mut stations = Vec::with_capacity(bins.len());
    let mut max_radius: f64 = 0.0;
    for pts in bins.values() {
        let x = pts.iter().map(|p| p.x).sum::<f64>() / pts.len() as f64;
        let source_winding = source_winding(pts, center_lat, center_vert);
        let ring = build_ring(pts, center_lat, center_vert, offset_rad);
        for rp in &ring {
            max_radius = max_radius.max(rp.radius);
        }
        stations.push(Station {
            x,
            ring,
            source_winding,
        });
    }

    Ok(BodyGeometry {
        name: name.to_string(),
        kind,
        offset_deg,
        center: (center_lat, center_vert),
        stations,
        max_radius,
    })
}

/// Order a station's vertices into the canonical split ring.
///
/// Angle 0 points at positive-lateral; the positive-lateral arc runs
/// top-to-bottom (angle descending), the negative-lateral arc continues
/// bottom-to-top, giving one continuous rotational sweep however the
/// source mesh was authored.
fn build_ring(
    pts: &[Point3<f64>],
    center_lat: f64,
    center_vert: f64,
    offset_rad: f64,
) -> Vec<RingPoint> {
    let polar = pts.iter().map(|p| {
        let radial = Vector2::new(p.y - center_lat, p.z - center_vert);
        let angle = wrap_angle(radial.y.atan2(radial.x) + offset_rad);
        RingPoint {
            angle,
            radius: radial.norm(),
        }
    });

    let (near, far): (Vec<RingPoint>, Vec<RingPoint>) =
        polar.partition(|rp| rp.angle.cos() >= 0.0);

    let near = near
        .into_iter()
        .sorted_by(|a, b| b.angle.total_cmp(&a.angle))
        .collect::<Vec<_>>();
    let far = far
        .into_iter()
        .sorted_by(|a, b| unwrap_far(b.angle).total_cmp(&unwrap_far(a.angle)))
        .collect::<Vec<_>>();

    near.into_iter().chain(far).collect()
}

/// Wrap to (-π, π].
fn wrap_angle(a: f64) -> f64 {
    let mut a = a % TAU;
    if a <= -std::f64::consts::PI {
        a += TAU;
    } else if a > std::f64::consts::PI {
        a -= TAU;
    }
    a
}

/// Lift far-arc angles onto the continuous (π/2, 3π/2) branch.
fn unwrap_far(a: f64) -> f64 {
    if a >= 0.0 {
        a
    } else {
        a + TAU
    }
}

/// Shoelace sign over the source vertex order, in the (lateral, vertical)
/// plane.
fn source_winding(pts: &[Point3<f64>], center_lat: f64, center_vert: f64) -> Winding {
    let mut area = 0.0;
    for (a, b) in pts.iter().circular_tuple_windows() {
        let (ay, az) = (a.y - center_lat, a.z - center_vert);
        let (by, bz) = (b.y - center_lat, b.z - center_vert);
        area += ay * bz - by * az;
    }
    if area >= 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}
