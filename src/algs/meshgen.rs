//! Basic generators for structured quad meshes: planar grids, open cylinders
//! and closed tori.
//!
//! All three lay faces out row by row, so face `(i, j)` (column `i`, row `j`)
//! has id `j * columns + i`, and every face lists its edges as bottom, right,
//! top, left.

use crate::mesh_error::MeshLoopError;
use crate::topology::point::FaceId;
use crate::topology::poly_mesh::PolyMesh;

fn invalid_geometry(message: impl Into<String>) -> MeshLoopError {
    MeshLoopError::InvalidGeometry(message.into())
}

/// Id of the grid face in column `i`, row `j` of a mesh with `columns` faces
/// per row.
pub fn grid_face(columns: usize, i: usize, j: usize) -> FaceId {
    FaceId::new((j * columns + i) as u32)
}

/// `nu`×`nv` quads over a vertex lattice whose columns wrap when `wrap_u`
/// and whose rows wrap when `wrap_v`.
fn lattice(nu: usize, nv: usize, wrap_u: bool, wrap_v: bool) -> Result<PolyMesh, MeshLoopError> {
    let cols = if wrap_u { nu } else { nu + 1 };
    let rows = if wrap_v { nv } else { nv + 1 };
    let vertex_count = cols
        .checked_mul(rows)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or_else(|| invalid_geometry(format!("{nu}x{nv} lattice exceeds the u32 id range")))?;

    let vertex = |i: usize, j: usize| ((j % rows) * cols + (i % cols)) as u32;
    let mut polygons = Vec::with_capacity(nu * nv);
    for j in 0..nv {
        for i in 0..nu {
            polygons.push([
                vertex(i, j),
                vertex(i + 1, j),
                vertex(i + 1, j + 1),
                vertex(i, j + 1),
            ]);
        }
    }
    PolyMesh::from_polygons(vertex_count, polygons)
}

/// Planar grid of `nx`×`ny` quads.
pub fn quad_grid(nx: usize, ny: usize) -> Result<PolyMesh, MeshLoopError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    lattice(nx, ny, false, false)
}

/// Open tube: `rings` rows of `around` quads, closed around its axis.
pub fn quad_cylinder(around: usize, rings: usize) -> Result<PolyMesh, MeshLoopError> {
    if around < 3 {
        return Err(invalid_geometry("a cylinder needs at least 3 faces around"));
    }
    if rings == 0 {
        return Err(invalid_geometry("rings must be positive"));
    }
    lattice(around, rings, true, false)
}

/// Closed torus of `nu`×`nv` quads; every vertex has valence four.
pub fn quad_torus(nu: usize, nv: usize) -> Result<PolyMesh, MeshLoopError> {
    if nu < 3 || nv < 3 {
        return Err(invalid_geometry("a torus needs at least 3 faces in each direction"));
    }
    lattice(nu, nv, true, true)
}
