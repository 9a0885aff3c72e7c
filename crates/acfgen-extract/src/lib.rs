use acfgen_core::classify::classify_groups;
use acfgen_core::mesh::ObjDocument;
use acfgen_core::report::{ConversionLog, ConversionReport, GroupReport};
use acfgen_core::template::Template;
use acfgen_core::Error;

pub mod assemble;
pub mod body;
pub mod structs;
pub mod wing;

#[derive(Debug, Clone)]
pub struct GridConfig {
    /// The emitted station grid pads to at least this many rows.
    pub min_stations: usize,
    /// Points per ring, padded to at least this many.
    pub min_ring_points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_stations: 20,
            min_ring_points: 18,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Longitudinal coordinates within this distance share a station (meters).
    pub station_tolerance: f64,
    /// Cowling ring rotation magnitude φ, degrees. Left gets +φ, right −φ.
    pub cowl_offset_deg: f64,
    /// Fraction of span sampled at each end for root/tip chords.
    pub chord_band_frac: f64,
    pub grid: GridConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            station_tolerance: 1e-4,
            cowl_offset_deg: 5.0,
            chord_band_frac: 0.10,
            grid: GridConfig::default(),
        }
    }
}

/// Result of one conversion run: the two insertable blocks plus the report
/// the front ends show.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub body_block: String,
    pub wing_block: String,
    pub report: ConversionReport,
}

/// Runs the full pipeline over one parsed OBJ document.
pub struct Converter {
    cfg: ExtractConfig,
}

impl Converter {
    pub fn new(cfg: ExtractConfig) -> Self {
        Self { cfg }
    }

    pub fn convert(
        &self,
        doc: &ObjDocument,
        body_template: &Template,
        wing_template: &Template,
        log: &mut ConversionLog,
    ) -> Result<Conversion, Error> {
        let classification = classify_groups(doc, log);

        let bodies = body::extract_bodies(doc, &classification, &self.cfg, log)?;
        let wings = wing::extract_wings(doc, &classification, &self.cfg, log);

        let (body_block, wing_block) = assemble::render_blocks(
            &bodies,
            &wings,
            body_template,
            wing_template,
            &self.cfg.grid,
        )?;

        let groups = doc
            .groups
            .iter()
            .map(|g| GroupReport {
                name: g.name.clone(),
                role: classification
                    .role_of(&g.name)
                    .map(|r| r.as_str().to_string())
                    .unwrap_or_default(),
                vertex_count: g.vertices.len(),
                face_count: g.faces.len(),
            })
            .collect();

        let report = ConversionReport {
            groups,
            body_count: bodies.len(),
            station_counts: bodies.iter().map(|b| b.stations.len()).collect(),
            wing_count: wings.len(),
            log: log.clone(),
        };

        Ok(Conversion {
            body_block,
            wing_block,
            report,
        })
    }
}
