use acfgen_core::geom::Vec3;
use acfgen_core::mesh::{MeshGroup, ObjDocument};
use acfgen_core::report::ConversionLog;
use acfgen_core::Error;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

pub fn import_obj(path: &Path, log: &mut ConversionLog) -> Result<ObjDocument> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read OBJ: {path:?}"))?;
    let doc = parse_obj(&text, log).with_context(|| format!("parse OBJ: {path:?}"))?;
    Ok(doc)
}

/// Parse OBJ text into named groups with group-local vertex lists.
///
/// Both `o <name>` and `g <name>` introduce (or continue) a named group;
/// faces declared before any group land in a default group. Face tokens
/// accept `i`, `i/j`, `i/j/k` and `i//k` forms; indices are 1-based, and
/// negative indices count back from the most recent vertex. A face may only
/// reference vertices already declared.
pub fn parse_obj(text: &str, log: &mut ConversionLog) -> Result<ObjDocument, Error> {
    let mut parser = ObjParser::new();
    for (idx, raw) in text.lines().enumerate() {
        parser.line(idx + 1, raw)?;
    }
    Ok(parser.finish(log))
}

const DEFAULT_GROUP: &str = "_default";

struct ObjParser {
    verts: Vec<Vec3>,
    order: Vec<String>,
    faces: HashMap<String, Vec<Vec<u32>>>,
    current: Option<String>,
}

impl ObjParser {
    fn new() -> Self {
        Self {
            verts: Vec::new(),
            order: Vec::new(),
            faces: HashMap::new(),
            current: None,
        }
    }

    fn line(&mut self, line_no: usize, raw: &str) -> Result<(), Error> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        match keyword {
            "v" => self.vertex(line_no, tokens),
            "o" | "g" => {
                let name = line
                    .splitn(2, char::is_whitespace)
                    .nth(1)
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_GROUP)
                    .to_string();
                self.enter_group(name);
                Ok(())
            }
            "f" => self.face(line_no, tokens),
            // Normals, texcoords, smoothing and material statements carry
            // nothing the extraction pipeline needs.
            _ => Ok(()),
        }
    }

    fn vertex<'a, I: Iterator<Item = &'a str>>(
        &mut self,
        line_no: usize,
        mut tokens: I,
    ) -> Result<(), Error> {
        let mut coords = [0.0f64; 3];
        for slot in &mut coords {
            let tok = tokens.next().ok_or_else(|| Error::Parse {
                line: line_no,
                message: "vertex with fewer than 3 coordinates".to_string(),
            })?;
            *slot = tok.parse().map_err(|_| Error::Parse {
                line: line_no,
                message: format!("invalid vertex coordinate '{tok}'"),
            })?;
        }
        self.verts.push(Vec3::new(coords[0], coords[1], coords[2]));
        Ok(())
    }

    fn enter_group(&mut self, name: String) {
        if !self.faces.contains_key(&name) {
            self.faces.insert(name.clone(), Vec::new());
            self.order.push(name.clone());
        }
        self.current = Some(name);
    }

    fn face<'a, I: Iterator<Item = &'a str>>(
        &mut self,
        line_no: usize,
        tokens: I,
    ) -> Result<(), Error> {
        if self.current.is_none() {
            self.enter_group(DEFAULT_GROUP.to_string());
        }

        let mut face = Vec::new();
        for tok in tokens {
            let v_str = tok.split('/').next().unwrap_or("");
            let idx: i64 = v_str.parse().map_err(|_| Error::Parse {
                line: line_no,
                message: format!("invalid face index '{tok}'"),
            })?;
            let known = self.verts.len() as i64;
            // 1-based; negative counts back from the latest vertex.
            let resolved = if idx < 0 { known + idx + 1 } else { idx };
            if resolved < 1 || resolved > known {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!(
                        "face references vertex {idx} but only {known} are defined"
                    ),
                });
            }
            face.push((resolved - 1) as u32);
        }
        if face.len() < 3 {
            return Err(Error::Parse {
                line: line_no,
                message: format!("face with {} vertices", face.len()),
            });
        }

        let current = self.current.as_ref().expect("group entered above");
        self.faces.get_mut(current).expect("group registered").push(face);
        Ok(())
    }

    fn finish(self, log: &mut ConversionLog) -> ObjDocument {
        let mut groups = Vec::new();
        for name in self.order {
            let faces_global = &self.faces[&name];
            if faces_global.is_empty() {
                log.warning(
                    "empty_group",
                    format!("group '{name}' declared with no geometry"),
                );
                continue;
            }

            // Local vertex list in first-appearance order, faces remapped.
            let mut local_of: HashMap<u32, u32> = HashMap::new();
            let mut vertices = Vec::new();
            let mut faces = Vec::new();
            for face in faces_global {
                let mut local_face = Vec::with_capacity(face.len());
                for &gi in face {
                    let li = *local_of.entry(gi).or_insert_with(|| {
                        vertices.push(self.verts[gi as usize]);
                        (vertices.len() - 1) as u32
                    });
                    local_face.push(li);
                }
                faces.push(local_face);
            }

            groups.push(MeshGroup {
                name,
                vertices,
                faces,
            });
        }
        ObjDocument { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (ObjDocument, ConversionLog) {
        let mut log = ConversionLog::new();
        let doc = parse_obj(text, &mut log).expect("parse");
        (doc, log)
    }

    #[test]
    fn accepts_both_group_conventions() {
        let (doc, _) = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             o first\nf 1 2 3\n\
             g second\nf 1 2 3\n",
        );
        assert_eq!(2, doc.groups.len());
        assert_eq!("first", doc.groups[0].name);
        assert_eq!("second", doc.groups[1].name);
    }

    #[test]
    fn remaps_faces_to_group_local_vertices() {
        let (doc, _) = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\n\
             g quad\nf 4 2 3\n",
        );
        let g = &doc.groups[0];
        // Local list is first-appearance order: v4, v2, v3.
        assert_eq!(3, g.vertices.len());
        assert_eq!(Vec3::new(5.0, 5.0, 5.0), g.vertices[0]);
        assert_eq!(vec![vec![0, 1, 2]], g.faces);
    }

    #[test]
    fn faces_before_any_group_use_a_default_group() {
        let (doc, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(1, doc.groups.len());
        assert_eq!("_default", doc.groups[0].name);
    }

    #[test]
    fn negative_indices_count_back_from_latest_vertex() {
        let (doc, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\ng tri\nf -3 -2 -1\n");
        assert_eq!(vec![vec![0, 1, 2]], doc.groups[0].faces);
    }

    #[test]
    fn face_slash_forms_take_the_vertex_index() {
        let (doc, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\ng tri\nf 1/4 2/5/6 3//7\n");
        assert_eq!(vec![vec![0, 1, 2]], doc.groups[0].faces);
    }

    #[test]
    fn out_of_range_index_fails_with_line_number() {
        let mut log = ConversionLog::new();
        let err = parse_obj("v 0 0 0\ng bad\nf 1 2 3\n", &mut log).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(3, line),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn zero_index_is_rejected() {
        let mut log = ConversionLog::new();
        assert!(parse_obj("v 0 0 0\nf 0 1 1\n", &mut log).is_err());
    }

    #[test]
    fn empty_group_warns_but_does_not_fail() {
        let (doc, log) = parse("g nothing\nv 0 0 0\n");
        assert!(doc.groups.is_empty());
        assert_eq!(1, log.warning_count());
        assert_eq!("empty_group", log.messages.last().unwrap().code);
    }

    #[test]
    fn comments_and_unknown_statements_are_ignored() {
        let (doc, _) = parse(
            "# exported mesh\nmtllib a.mtl\nvn 0 0 1\nvt 0 0\ns off\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\ng tri\nusemtl m\nf 1 2 3\n",
        );
        assert_eq!(1, doc.groups.len());
    }
}
