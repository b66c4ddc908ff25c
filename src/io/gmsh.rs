//! Gmsh `.msh` reader.
//!
//! # Supported format
//! - ASCII `.msh` version **2.2**.
//! - Element types: 2 (triangle) and 3 (quad) become faces; 1 (line) and
//!   15 (point) are skipped.
//!
//! # Limitations
//! - Binary files are not supported.
//! - `.msh` v4.x (block-based) is not supported.
//! - Volume and higher-order elements are rejected.
//! - Element tags are ignored.

use crate::io::{MeshData, PolyMeshReader};
use crate::mesh_error::MeshLoopError;
use crate::topology::poly_mesh::PolyMesh;
use crate::topology::validation::ValidationOptions;
use hashbrown::HashMap;
use std::io::Read;

/// Options for reading Gmsh meshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GmshReadOptions {
    /// Checks applied while building the mesh.
    pub validation: ValidationOptions,
}

/// Gmsh `.msh` reader for ASCII v2.2 meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

#[derive(Clone, Copy)]
enum ElementRole {
    Face(usize),
    Skip(usize),
}

fn parse_error(message: impl Into<String>) -> MeshLoopError {
    MeshLoopError::MeshIoParse(message.into())
}

impl GmshReader {
    fn parse_version(line: &str) -> Result<&str, MeshLoopError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| parse_error("missing mesh format version"))?;
        let file_type = parts
            .next()
            .ok_or_else(|| parse_error("missing mesh format type"))?;
        if file_type != "0" {
            return Err(parse_error("binary .msh files are not supported"));
        }
        Ok(version)
    }

    fn element_role(elem_type: u32) -> Option<ElementRole> {
        match elem_type {
            1 => Some(ElementRole::Skip(2)),  // line
            2 => Some(ElementRole::Face(3)),  // triangle
            3 => Some(ElementRole::Face(4)),  // quad
            15 => Some(ElementRole::Skip(1)), // point
            _ => None,
        }
    }

    fn parse_id(raw: &str, what: &str) -> Result<u64, MeshLoopError> {
        raw.parse::<u64>()
            .map_err(|_| parse_error(format!("invalid {what} id: {raw}")))
    }

    fn parse_coord(raw: Option<&str>, axis: char) -> Result<f64, MeshLoopError> {
        let raw = raw.ok_or_else(|| parse_error(format!("missing {axis} coordinate")))?;
        raw.parse::<f64>()
            .map_err(|_| parse_error(format!("invalid coordinate: {raw}")))
    }

    fn parse_count(line: Option<&str>, what: &str) -> Result<usize, MeshLoopError> {
        let line = line.ok_or_else(|| parse_error(format!("missing {what} count")))?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| parse_error(format!("invalid {what} count: {line}")))
    }

    fn expect_end<'a>(
        lines: &mut impl Iterator<Item = &'a str>,
        marker: &str,
    ) -> Result<(), MeshLoopError> {
        match lines.next() {
            Some(line) if line.trim() == marker => Ok(()),
            _ => Err(parse_error(format!("missing {marker}"))),
        }
    }

    /// Parse with explicit options.
    pub fn read_with_options<R: Read>(
        &self,
        mut reader: R,
        options: GmshReadOptions,
    ) -> Result<MeshData, MeshLoopError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents.lines();

        let mut version: Option<String> = None;
        let mut nodes: Vec<(u64, [f64; 3])> = Vec::new();
        let mut faces: Vec<(u64, Vec<u64>)> = Vec::new();

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let format_line = lines
                        .next()
                        .ok_or_else(|| parse_error("missing MeshFormat"))?;
                    version = Some(Self::parse_version(format_line)?.to_string());
                    Self::expect_end(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    let node_count = Self::parse_count(lines.next(), "node")?;
                    for _ in 0..node_count {
                        let node_line = lines
                            .next()
                            .ok_or_else(|| parse_error("unexpected end of node list"))?;
                        let mut parts = node_line.split_whitespace();
                        let id = Self::parse_id(
                            parts.next().ok_or_else(|| parse_error("missing node id"))?,
                            "node",
                        )?;
                        let x = Self::parse_coord(parts.next(), 'x')?;
                        let y = Self::parse_coord(parts.next(), 'y')?;
                        let z = Self::parse_coord(parts.next(), 'z')?;
                        nodes.push((id, [x, y, z]));
                    }
                    Self::expect_end(&mut lines, "$EndNodes")?;
                }
                "$Elements" => {
                    let elem_count = Self::parse_count(lines.next(), "element")?;
                    for _ in 0..elem_count {
                        let elem_line = lines
                            .next()
                            .ok_or_else(|| parse_error("unexpected end of element list"))?;
                        let mut parts = elem_line.split_whitespace();
                        let elem_id = Self::parse_id(
                            parts.next().ok_or_else(|| parse_error("missing element id"))?,
                            "element",
                        )?;
                        let elem_type = parts
                            .next()
                            .ok_or_else(|| parse_error("missing element type"))?
                            .parse::<u32>()
                            .map_err(|_| parse_error("invalid element type"))?;
                        let role = Self::element_role(elem_type).ok_or_else(|| {
                            parse_error(format!("unsupported element type: {elem_type}"))
                        })?;
                        let num_tags = parts
                            .next()
                            .ok_or_else(|| parse_error("missing element tag count"))?
                            .parse::<usize>()
                            .map_err(|_| parse_error("invalid element tag count"))?;
                        for _ in 0..num_tags {
                            parts.next();
                        }
                        let node_count = match role {
                            ElementRole::Face(n) | ElementRole::Skip(n) => n,
                        };
                        let mut conn = Vec::with_capacity(node_count);
                        for _ in 0..node_count {
                            let node_id = parts
                                .next()
                                .ok_or_else(|| parse_error("missing element node id"))?;
                            conn.push(Self::parse_id(node_id, "node")?);
                        }
                        if let ElementRole::Face(_) = role {
                            faces.push((elem_id, conn));
                        }
                    }
                    Self::expect_end(&mut lines, "$EndElements")?;
                }
                _ => {
                    // ignore other sections
                }
            }
        }

        let version = version.unwrap_or_else(|| "2.2".to_string());
        if version != "2.2" {
            return Err(parse_error(format!("unsupported gmsh version: {version}")));
        }

        let mut vertex_of: HashMap<u64, u32> = HashMap::with_capacity(nodes.len());
        for (index, (id, _)) in nodes.iter().enumerate() {
            let index = u32::try_from(index)
                .map_err(|_| parse_error("node count exceeds the u32 id range"))?;
            if vertex_of.insert(*id, index).is_some() {
                return Err(parse_error(format!("duplicate node id: {id}")));
            }
        }

        let mut polygons = Vec::with_capacity(faces.len());
        for (elem_id, conn) in &faces {
            let polygon = conn
                .iter()
                .map(|node| {
                    vertex_of.get(node).copied().ok_or_else(|| {
                        parse_error(format!("element {elem_id} references unknown node {node}"))
                    })
                })
                .collect::<Result<Vec<u32>, _>>()?;
            polygons.push(polygon);
        }

        let mesh = PolyMesh::from_polygons_with(nodes.len(), polygons, options.validation)?;
        log::debug!(
            "read gmsh mesh: {} nodes, {} surface elements",
            nodes.len(),
            faces.len()
        );

        Ok(MeshData {
            mesh,
            positions: nodes.iter().map(|(_, xyz)| *xyz).collect(),
            node_ids: nodes.iter().map(|(id, _)| *id).collect(),
            element_ids: faces.iter().map(|(id, _)| *id).collect(),
        })
    }
}

impl PolyMeshReader for GmshReader {
    fn read<R: Read>(&self, reader: R) -> Result<MeshData, MeshLoopError> {
        self.read_with_options(reader, GmshReadOptions::default())
    }
}
