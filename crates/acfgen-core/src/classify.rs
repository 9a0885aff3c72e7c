use crate::mesh::{MeshGroup, ObjDocument};
use crate::report::ConversionLog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupRole {
    Body,
    Wing1,
    Wing2,
    HStab,
    VStab,
    LeftCowling,
    RightCowling,
    Unrecognized,
}

impl GroupRole {
    /// Roles that accept at most one group. Body groups merge instead.
    pub fn is_single_slot(&self) -> bool {
        !matches!(self, GroupRole::Body | GroupRole::Unrecognized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Body => "body",
            GroupRole::Wing1 => "wing1",
            GroupRole::Wing2 => "wing2",
            GroupRole::HStab => "hstab",
            GroupRole::VStab => "vstab",
            GroupRole::LeftCowling => "left_cowling",
            GroupRole::RightCowling => "right_cowling",
            GroupRole::Unrecognized => "unrecognized",
        }
    }
}

/// Keyword stage: case-insensitive substring match against the naming
/// conventions the source meshes use. Returns None when the name says
/// nothing useful and the topology stage should decide.
pub fn classify_by_name(name: &str) -> Option<GroupRole> {
    let lname = name.to_ascii_lowercase();

    if lname.contains("cowl") {
        if lname.contains("left") || lname.contains("lf") {
            return Some(GroupRole::LeftCowling);
        }
        if lname.contains("right") || lname.contains("rt") {
            return Some(GroupRole::RightCowling);
        }
        // A cowl with no side discriminator cannot be placed.
        return Some(GroupRole::Unrecognized);
    }

    if lname.contains("hstab") || lname.contains("stab_h") || lname.contains("horiz") {
        return Some(GroupRole::HStab);
    }
    if lname.contains("vstab") || lname.contains("stab_v") || lname.contains("vert") {
        return Some(GroupRole::VStab);
    }

    if lname.contains("wing") {
        if lname.contains('2') {
            return Some(GroupRole::Wing2);
        }
        return Some(GroupRole::Wing1);
    }

    for key in ["fuselage", "body", "nose", "tail", "fairing", "boom"] {
        if lname.contains(key) {
            return Some(GroupRole::Body);
        }
    }

    None
}

/// Lateral extent must dominate both other axes by this factor to read as
/// a wing surface.
const WING_LATERAL_DOMINANCE: f64 = 1.5;
/// A cross-section counts as round when its radial spread stays below this
/// fraction of the mean radius.
const ROUND_SECTION_SPREAD: f64 = 0.35;
/// Longitudinal quantization for the closed-section probe.
const SECTION_BIN: f64 = 1e-3;

/// Topology stage: geometry-only fallback for ambiguous names.
///
/// Wide-in-lateral groups read as wings; groups showing round closed
/// sections at two or more longitudinal positions read as bodies. Ties
/// resolve to Body.
pub fn classify_by_topology(group: &MeshGroup) -> GroupRole {
    if group.vertices.len() < 3 {
        return GroupRole::Unrecognized;
    }
    let bbox = group.bbox();
    if bbox.is_empty() {
        return GroupRole::Unrecognized;
    }

    let length = bbox.length();
    let width = bbox.width();
    let height = bbox.height();
    if length <= 0.0 && width <= 0.0 && height <= 0.0 {
        return GroupRole::Unrecognized;
    }

    if round_section_count(group) >= 2 {
        return GroupRole::Body;
    }
    if width > WING_LATERAL_DOMINANCE * length && width > WING_LATERAL_DOMINANCE * height {
        return GroupRole::Wing1;
    }
    GroupRole::Body
}

fn round_section_count(group: &MeshGroup) -> usize {
    use std::collections::BTreeMap;

    let mut bins: BTreeMap<i64, Vec<(f64, f64)>> = BTreeMap::new();
    for v in &group.vertices {
        let key = (v.x / SECTION_BIN).round() as i64;
        bins.entry(key).or_default().push((v.y, v.z));
    }

    bins.values().filter(|pts| is_round_section(pts)).count()
}

fn is_round_section(pts: &[(f64, f64)]) -> bool {
    if pts.len() < 3 {
        return false;
    }
    let n = pts.len() as f64;
    let cy = pts.iter().map(|p| p.0).sum::<f64>() / n;
    let cz = pts.iter().map(|p| p.1).sum::<f64>() / n;

    let mut min_r = f64::INFINITY;
    let mut max_r: f64 = 0.0;
    let mut sum_r = 0.0;
    for (y, z) in pts {
        let r = ((y - cy) * (y - cy) + (z - cz) * (z - cz)).sqrt();
        min_r = min_r.min(r);
        max_r = max_r.max(r);
        sum_r += r;
    }
    let mean_r = sum_r / n;
    if mean_r <= 0.0 {
        return false;
    }
    (max_r - min_r) / mean_r < ROUND_SECTION_SPREAD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// One entry per group, in declaration order.
    pub assignments: Vec<(String, GroupRole)>,
}

impl Classification {
    pub fn role_of(&self, name: &str) -> Option<GroupRole> {
        self.assignments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| *r)
    }

    pub fn names_with(&self, role: GroupRole) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

/// Assign a role to every group, logging each decision.
///
/// Single-slot roles claimed twice are resolved last-write-wins: the
/// earlier group is demoted to Unrecognized and a warning is logged.
pub fn classify_groups(doc: &ObjDocument, log: &mut ConversionLog) -> Classification {
    let mut assignments: Vec<(String, GroupRole)> = Vec::new();

    for group in &doc.groups {
        let (role, stage) = resolve_role(group);
        log.info(
            "classified",
            format!("group '{}' classified as {} ({stage})", group.name, role.as_str()),
        );
        if role == GroupRole::Unrecognized {
            log.warning(
                "unrecognized_group",
                format!("group '{}' excluded from extraction", group.name),
            );
        }

        if role.is_single_slot() {
            if let Some(prev) = assignments.iter().position(|(_, r)| *r == role) {
                log.warning(
                    "classification_conflict",
                    format!(
                        "role {} claimed by both '{}' and '{}'; keeping the later group",
                        role.as_str(),
                        assignments[prev].0,
                        group.name
                    ),
                );
                assignments[prev].1 = GroupRole::Unrecognized;
            }
        }

        assignments.push((group.name.clone(), role));
    }

    Classification { assignments }
}

fn resolve_role(group: &MeshGroup) -> (GroupRole, &'static str) {
    if group.is_empty() {
        return (GroupRole::Unrecognized, "empty");
    }
    match classify_by_name(&group.name) {
        Some(role) => (role, "name"),
        None => (classify_by_topology(group), "topology"),
    }
}
