use crate::structs::{BodyGeometry, WingPlanform};
use crate::GridConfig;
use acfgen_core::geom::ft_from_meters;
use acfgen_core::params::{ParameterSet, Value};
use acfgen_core::template::Template;
use acfgen_core::Error;
use std::fmt::Write as _;

/// Plane-Maker's property print order for grid indices: 0, 1, then the
/// two-digit indices, then 2..9. The target writes its own files this way
/// and re-reads them positionally.
pub fn pm_print_order(count: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(count);
    if count > 0 {
        order.push(0);
    }
    if count > 1 {
        order.push(1);
    }
    for i in 10..count {
        order.push(i);
    }
    for i in 2..count.min(10) {
        order.push(i);
    }
    order
}

/// Assemble one body's slots, including the `_geo_xyz` grid text.
pub fn body_parameter_set(body: &BodyGeometry, index: usize, grid: &GridConfig) -> ParameterSet {
    let max_ring_len = body
        .stations
        .iter()
        .map(|s| s.ring.len())
        .max()
        .unwrap_or(0);
    let r_dim = grid.min_ring_points.max(max_ring_len);
    let s_dim = body.stations.len();
    let grid_rows = grid.min_stations.max(s_dim);

    let mut params = ParameterSet::new();
    params.set("body_index", Value::Int(index as i64));
    params.set("part_x", Value::Num(ft_from_meters(body.center.0)));
    params.set("part_rad", Value::Num(ft_from_meters(body.max_radius)));
    params.set("r_dim", Value::Int(r_dim as i64));
    params.set("s_dim", Value::Int(s_dim as i64));
    params.set(
        "geo_xyz",
        Value::Text(geo_grid(body, index, grid_rows, r_dim)),
    );
    params
}

/// The `_geo_xyz` coordinate grid in Plane-Maker axes and print order.
/// Unused grid cells are zero rows.
fn geo_grid(body: &BodyGeometry, index: usize, grid_rows: usize, r_dim: usize) -> String {
    let (center_lat, center_vert) = body.center;
    let mut out = String::new();
    for i in pm_print_order(grid_rows) {
        let station = body.stations.get(i);
        for j in pm_print_order(r_dim) {
            // Plane-Maker axes: 0 lateral, 1 vertical, 2 longitudinal.
            let (lat, vert, lon) = match station.and_then(|s| s.ring.get(j).map(|rp| (s, rp))) {
                Some((s, rp)) => (
                    ft_from_meters(center_lat + rp.radius * rp.angle.cos()),
                    ft_from_meters(center_vert + rp.radius * rp.angle.sin()),
                    ft_from_meters(s.x),
                ),
                None => (0.0, 0.0, 0.0),
            };
            for (k, val) in [lat, vert, lon].into_iter().enumerate() {
                let _ = writeln!(
                    out,
                    "P _body/{index}/_geo_xyz/{i},{j},{k} {}",
                    Value::Num(val)
                );
            }
        }
    }
    // The surrounding template supplies the final newline.
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Assemble one wing surface's slots.
pub fn wing_parameter_set(wing: &WingPlanform, index: usize) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.set("wing_index", Value::Int(index as i64));
    params.set("root_chord", Value::Num(ft_from_meters(wing.root_chord)));
    params.set("tip_chord", Value::Num(ft_from_meters(wing.tip_chord)));
    params.set("semilen", Value::Num(ft_from_meters(wing.span)));
    params.set("sweep", Value::Num(wing.sweep_deg));
    params.set("dihedral", Value::Num(wing.dihedral_deg));
    params.set("airfoil", Value::Text(wing.airfoil.to_string()));
    params
}

/// Slots templates may ask for that the extractors never compute.
fn default_value(slot: &str) -> Option<Value> {
    match slot {
        "part_y" | "part_z" => Some(Value::Num(0.0)),
        _ => None,
    }
}

/// Fill defaults for any template placeholder the extractors left
/// uncovered; a slot with neither a value nor a default aborts.
pub fn apply_template_requirements(
    params: &mut ParameterSet,
    template: &Template,
) -> Result<(), Error> {
    for name in template.placeholders() {
        if params.contains(name) {
            continue;
        }
        match default_value(name) {
            Some(value) => params.set(name, value),
            None => {
                return Err(Error::MissingRequiredSlot {
                    slot: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Render the body and wing blocks: one template instantiation per body
/// and per wing surface, concatenated in index order.
pub fn render_blocks(
    bodies: &[BodyGeometry],
    wings: &[WingPlanform],
    body_template: &Template,
    wing_template: &Template,
    grid: &GridConfig,
) -> Result<(String, String), Error> {
    let mut body_block = String::new();
    for (index, body) in bodies.iter().enumerate() {
        let mut params = body_parameter_set(body, index, grid);
        apply_template_requirements(&mut params, body_template)?;
        body_block.push_str(&body_template.render(&params)?);
    }

    let mut wing_block = String::new();
    for (index, wing) in wings.iter().enumerate() {
        let mut params = wing_parameter_set(wing, index);
        apply_template_requirements(&mut params, wing_template)?;
        wing_block.push_str(&wing_template.render(&params)?);
    }

    Ok((body_block, wing_block))
}
