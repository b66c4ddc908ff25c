mod util;
use util::*;

use std::collections::HashSet;

use alt_face_loops::algs::loop_walk::{
    LoopKind, LoopWalker, NonManifoldTraversal, Termination, WalkOptions,
};
use alt_face_loops::algs::meshgen::{grid_face, quad_cylinder, quad_grid, quad_torus};
use alt_face_loops::topology::mesh_topology::MeshTopology;
use alt_face_loops::topology::point::{FaceId, VertexId};
use alt_face_loops::topology::poly_mesh::PolyMesh;

#[test]
fn cylinder_ring_is_closed() {
    let mesh = quad_cylinder(8, 3).unwrap();
    let walker = LoopWalker::new(&mesh);
    for ring in 0..3 {
        let seed = grid_face(8, 5, ring);
        let lp = walker.face_loop(seed, mesh.edges_of(seed)[1]).unwrap();
        assert_eq!(lp.kind(), LoopKind::Closed);
        assert_eq!(lp.len(), 8);
        let unique: HashSet<FaceId> = lp.faces().iter().copied().collect();
        let expected: HashSet<FaceId> = (0..8).map(|i| grid_face(8, i, ring)).collect();
        assert_eq!(unique, expected);
    }
}

#[test]
fn cylinder_column_is_open_at_both_rims() {
    let mesh = quad_cylinder(8, 3).unwrap();
    let walker = LoopWalker::new(&mesh);
    let seed = grid_face(8, 2, 1);
    let lp = walker.face_loop(seed, mesh.edges_of(seed)[0]).unwrap();
    assert_eq!(lp.kind(), LoopKind::Open);
    assert_eq!(
        lp.faces(),
        &[grid_face(8, 2, 0), grid_face(8, 2, 1), grid_face(8, 2, 2)]
    );
    assert!(
        lp.ends()
            .iter()
            .all(|end| matches!(end, Termination::Boundary { .. }))
    );
}

#[test]
fn torus_loops_close_both_ways() {
    let mesh = quad_torus(6, 4).unwrap();
    let walker = LoopWalker::new(&mesh);
    let seed = grid_face(6, 3, 2);
    let around = walker.face_loop(seed, mesh.edges_of(seed)[3]).unwrap();
    let through = walker.face_loop(seed, mesh.edges_of(seed)[0]).unwrap();
    assert!(around.is_closed());
    assert!(through.is_closed());
    assert_eq!(around.len(), 6);
    assert_eq!(through.len(), 4);
}

#[test]
fn grid_row_stops_at_the_edges() {
    let mesh = quad_grid(6, 4).unwrap();
    let walker = LoopWalker::new(&mesh);
    let seed = grid_face(6, 4, 2);
    let lp = walker.face_loop(seed, mesh.edges_of(seed)[1]).unwrap();
    let row: Vec<FaceId> = (0..6).map(|i| grid_face(6, i, 2)).collect();
    let mut faces = lp.faces().to_vec();
    faces.sort();
    assert_eq!(faces, row);
    assert_eq!(lp.ends().len(), 2);
    assert_eq!(lp.travel_pair()[0], mesh.edges_of(seed)[1]);
}

#[test]
fn interior_pole_ends_the_loop() {
    let mesh = pole_fan();
    let walker = LoopWalker::new(&mesh);
    let start = fid(5);
    let lp = walker.face_loop(start, mesh.edges_of(start)[0]).unwrap();
    assert_eq!(lp.faces(), &[fid(5), fid(0)]);
    assert!(!lp.contains(fid(1)));
    assert!(matches!(
        lp.ends(),
        [Termination::Boundary { .. }, Termination::Pole { vertex, .. }]
            if *vertex == VertexId::new(0)
    ));
}

#[test]
fn pole_stop_can_be_disabled() {
    let mesh = pole_fan();
    let walker = LoopWalker::with_options(
        &mesh,
        WalkOptions {
            stop_at_poles: false,
            ..WalkOptions::default()
        },
    );
    let start = fid(5);
    let lp = walker.face_loop(start, mesh.edges_of(start)[0]).unwrap();
    assert_eq!(lp.faces(), &[fid(5), fid(0), fid(1)]);
    assert!(!lp.is_closed());
}

/// A 3x3 grid whose middle row is bridged by face 9 back into the top of
/// column 1, so the row re-enters the centre face sideways.
fn bridged_grid() -> PolyMesh {
    let mut polygons = grid_polygons(3, 3);
    polygons.push(vec![
        grid_vertex(3, 3, 1),
        grid_vertex(3, 3, 2),
        grid_vertex(3, 2, 3),
        grid_vertex(3, 1, 3),
    ]);
    PolyMesh::from_polygons(16, polygons).unwrap()
}

#[test]
fn revisiting_a_face_ends_the_walk() {
    let mesh = bridged_grid();
    let walker = LoopWalker::new(&mesh);
    let seed = fid(3);
    let lp = walker.face_loop(seed, mesh.edges_of(seed)[3]).unwrap();
    assert_eq!(lp.faces(), &[fid(3), fid(4), fid(5), fid(9), fid(7)]);
    assert_eq!(lp.ends()[1], Termination::Revisit { face: fid(4) });
    assert!(lp.len() <= mesh.face_count());
}

/// Three quads hinged on edge (0, 1).
fn fin() -> PolyMesh {
    PolyMesh::from_polygons(8, [[0u32, 1, 2, 3], [1, 0, 4, 5], [0, 1, 6, 7]]).unwrap()
}

#[test]
fn non_manifold_edge_picks_the_lowest_other_face() {
    let mesh = fin();
    let walker = LoopWalker::new(&mesh);
    let hinge = mesh.edges_of(fid(0))[0];
    assert!(mesh.is_non_manifold_edge(hinge));

    let from_first = walker.face_loop(fid(0), mesh.edges_of(fid(0))[2]).unwrap();
    assert_eq!(from_first.faces(), &[fid(0), fid(1)]);
    assert_eq!(from_first.non_manifold_edges(), &[hinge]);

    let from_last = walker.face_loop(fid(2), mesh.edges_of(fid(2))[2]).unwrap();
    assert!(from_last.contains(fid(0)));
    assert!(!from_last.contains(fid(1)));
}

#[test]
fn non_manifold_edge_can_stop_the_walk() {
    let mesh = fin();
    let walker = LoopWalker::with_options(
        &mesh,
        WalkOptions {
            non_manifold: NonManifoldTraversal::Stop,
            ..WalkOptions::default()
        },
    );
    let lp = walker.face_loop(fid(0), mesh.edges_of(fid(0))[2]).unwrap();
    assert_eq!(lp.faces(), &[fid(0)]);
    let hinge = mesh.edges_of(fid(0))[0];
    assert!(lp.ends().contains(&Termination::NonManifold { edge: hinge }));
}

#[test]
fn box_corners_stop_every_walk() {
    let mesh = cube();
    let walker = LoopWalker::new(&mesh);
    let side = fid(3);
    let lp = walker.face_loop(side, mesh.edges_of(side)[0]).unwrap();
    assert_eq!(lp.faces(), &[side]);
    assert_eq!(lp.ends().len(), 2);
    assert!(
        lp.ends()
            .iter()
            .all(|end| matches!(end, Termination::Pole { .. }))
    );

    let through = LoopWalker::with_options(
        &mesh,
        WalkOptions {
            stop_at_poles: false,
            ..WalkOptions::default()
        },
    );
    let ring = through.face_loop(side, mesh.edges_of(side)[0]).unwrap();
    assert!(ring.is_closed());
    let faces: HashSet<FaceId> = ring.faces().iter().copied().collect();
    assert_eq!(faces, HashSet::from([fid(0), fid(1), fid(3), fid(5)]));
}
