use acfgen_core::classify::{GroupRole, Side};

/// Rotational direction the source mesh authored a cross-section in.
///
/// Output rings are always re-wound canonically; this flag records what the
/// source looked like, for the log and for stability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// One point of a station ring, in polar form about the body's own center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPoint {
    /// Radians; already includes any cowling offset.
    pub angle: f64,
    pub radius: f64,
}

/// A fuselage cross-section at a fixed longitudinal position.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Longitudinal coordinate, meters.
    pub x: f64,
    /// Canonically ordered ring: positive-lateral arc top-to-bottom, then
    /// negative-lateral arc bottom-to-top.
    pub ring: Vec<RingPoint>,
    pub source_winding: Winding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Fuselage,
    Cowl(Side),
}

/// One extracted body: the merged fuselage, or a single cowling.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyGeometry {
    pub name: String,
    pub kind: BodyKind,
    /// Angular ring offset in degrees: +φ left cowl, −φ right cowl, 0 fuselage.
    pub offset_deg: f64,
    /// Ring center: (lateral, vertical), meters.
    pub center: (f64, f64),
    /// Stations in ascending longitudinal order, no duplicate positions.
    pub stations: Vec<Station>,
    /// Largest ring radius, meters.
    pub max_radius: f64,
}

/// Planform parameters for one wing or stabilizer surface.
#[derive(Debug, Clone, PartialEq)]
pub struct WingPlanform {
    pub name: String,
    pub role: GroupRole,
    /// None for the vertical stabilizer.
    pub side: Option<Side>,
    /// Meters.
    pub span: f64,
    pub root_chord: f64,
    pub tip_chord: f64,
    /// Degrees; sign mirrors the side flag.
    pub sweep_deg: f64,
    pub dihedral_deg: f64,
    pub airfoil: &'static str,
}
