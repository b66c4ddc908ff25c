#![allow(dead_code)]
use std::collections::BTreeSet;

use alt_face_loops::topology::point::FaceId;
use alt_face_loops::topology::poly_mesh::PolyMesh;

pub fn fid(i: u32) -> FaceId {
    FaceId::new(i)
}

/// Vertex `(i, j)` of a lattice with `nx + 1` vertices per row.
pub fn grid_vertex(nx: usize, i: usize, j: usize) -> u32 {
    (j * (nx + 1) + i) as u32
}

/// Quads of an `nx`×`ny` grid, row by row, each as bottom-left,
/// bottom-right, top-right, top-left.
pub fn grid_polygons(nx: usize, ny: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            out.push(vec![
                grid_vertex(nx, i, j),
                grid_vertex(nx, i + 1, j),
                grid_vertex(nx, i + 1, j + 1),
                grid_vertex(nx, i, j + 1),
            ]);
        }
    }
    out
}

/// Five quads around a valence-5 centre vertex 0, ring vertices `1..=10`,
/// plus quad 5 = `[11, 12, 2, 1]` glued to the outer edge of quad 0.
///
/// Quad `k` is `[0, r(2k), r(2k + 1), r(2k + 2)]` with `r(n) = 1 + n % 10`.
pub fn pole_fan() -> PolyMesh {
    let r = |n: u32| 1 + n % 10;
    let mut polygons: Vec<Vec<u32>> = (0..5)
        .map(|k| vec![0, r(2 * k), r(2 * k + 1), r(2 * k + 2)])
        .collect();
    polygons.push(vec![11, 12, 2, 1]);
    PolyMesh::from_polygons(13, polygons).unwrap()
}

/// Faces `(i, j)` of a `columns`-wide grid for which `keep` holds.
pub fn grid_faces_where(
    columns: usize,
    rows: usize,
    keep: impl Fn(usize, usize) -> bool,
) -> BTreeSet<FaceId> {
    let mut out = BTreeSet::new();
    for j in 0..rows {
        for i in 0..columns {
            if keep(i, j) {
                out.insert(FaceId::new((j * columns + i) as u32));
            }
        }
    }
    out
}

/// Closed box: faces bottom, top, then the four sides `[0, 1, 5, 4]`,
/// `[1, 2, 6, 5]`, `[2, 3, 7, 6]`, `[3, 0, 4, 7]`. Every corner has valence
/// three and no boundary edge, so all eight vertices are interior poles.
pub fn cube() -> PolyMesh {
    PolyMesh::from_polygons(
        8,
        [
            [0u32, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ],
    )
    .unwrap()
}
