use std::cmp::Ordering;

use hashbrown::HashSet;
use tree_scheme::prelude::*;

const L: i32 = TetElement::ROOT_LEN;
const HALF: i32 = L / 2;

fn scheme() -> TetScheme {
    TetScheme::default()
}

#[test]
fn class_constants() {
    let s = scheme();
    let root = TetElement::root();
    assert_eq!(s.eclass(), ElementClass::Tetrahedron);
    assert_eq!(s.maxlevel(), 21);
    assert_eq!(s.element_size(), 16);
    assert_eq!(s.num_children(&root), 8);
    assert_eq!(s.num_faces(&root), 4);
    assert_eq!(s.num_face_children(&root, 2).unwrap(), 4);
    assert_eq!(s.child_eclass(7).unwrap(), ElementClass::Tetrahedron);
    assert!(s.child_eclass(8).is_err());
}

#[test]
fn children_of_root_round_trip() {
    let s = scheme();
    let root = TetElement::root();
    let mut kids = [TetElement::default(); 8];
    s.children(&root, &mut kids).unwrap();
    assert!(s.is_family(&kids));
    for (i, k) in kids.iter().enumerate() {
        assert_eq!(s.child_id(k), i);
        assert_eq!(s.parent(k).unwrap(), root);
        for j in 0..8 {
            assert_eq!(s.sibling(k, j).unwrap(), kids[j]);
        }
    }
    assert_eq!(kids[0], TetElement::new(0, 0, 0, 1, 0));
    assert_eq!(kids[7], TetElement::new(HALF, HALF, HALF, 1, 0));
}

#[test]
fn level_two_ids_are_a_bijection() {
    let s = scheme();
    let mut seen = HashSet::new();
    for id in 0..64 {
        let t = s.set_linear_id(2, id).unwrap();
        assert!(t.validate_invariants().is_ok(), "{t:?}");
        assert_eq!(s.linear_id(&t, 2).unwrap(), id);
        assert!(seen.insert(t));
    }
    assert!(matches!(
        s.set_linear_id(2, 64),
        Err(SchemeError::LinearIdOutOfRange { .. })
    ));
}

#[test]
fn successor_and_compare_agree() {
    let s = scheme();
    let mut prev = s.set_linear_id(2, 0).unwrap();
    for _ in 1..64 {
        let next = s.successor(&prev, 2).unwrap();
        assert_eq!(s.compare(&prev, &next), Ordering::Less);
        prev = next;
    }
    assert!(matches!(
        s.successor(&prev, 2),
        Err(SchemeError::NoSuccessor { level: 2, .. })
    ));
}

#[test]
fn type_is_recovered_when_climbing() {
    let s = scheme();
    let root = TetElement::root();
    // child 5 has type 1; its child 2 has type 4 at cube id 1
    let c = s.child(&root, 5).unwrap();
    assert_eq!(c.ty, 1);
    let g = s.child(&c, 2).unwrap();
    assert_eq!(g.ty, 4);
    assert_eq!(s.parent(&g).unwrap(), c);
    assert_eq!(s.ancestor(&g, 1).unwrap(), c);
    assert_eq!(s.ancestor(&g, 0).unwrap(), root);
    assert!(s.is_ancestor(&c, &g));
    assert!(!s.is_ancestor(&s.child(&root, 4).unwrap(), &g));
}

#[test]
fn nearest_common_ancestor_combines_cube_and_type() {
    let s = scheme();
    let root = TetElement::root();
    let c4 = s.child(&root, 4).unwrap();
    let c5 = s.child(&root, 5).unwrap();
    // same cube, different types
    assert_eq!((c4.x, c4.y, c4.z), (c5.x, c5.y, c5.z));
    assert_eq!(s.nearest_common_ancestor(&c4, &c5), root);

    let deep = s.child(&s.child(&c4, 6).unwrap(), 3).unwrap();
    assert_eq!(s.nearest_common_ancestor(&deep, &c4), c4);
    assert_eq!(s.nearest_common_ancestor(&c4, &deep), c4);
    assert_eq!(s.nearest_common_ancestor(&deep, &c5), root);
}

#[test]
fn descendants_of_root() {
    let s = scheme();
    let root = TetElement::root();
    let first = s.first_descendant(&root);
    let last = s.last_descendant(&root);
    assert_eq!(first, TetElement::new(0, 0, 0, 21, 0));
    assert_eq!(last, TetElement::new(L - 1, L - 1, L - 1, 21, 0));
    assert_eq!(s.linear_id(&first, 21).unwrap(), 0);
    assert_eq!(s.linear_id(&last, 21).unwrap(), (1u64 << 63) - 1);
}

#[test]
fn faces_on_root_boundary_map_to_triangles() {
    let s = scheme();
    let root = TetElement::root();
    let c1 = s.child(&root, 1).unwrap();
    // child 1 spans (H,0,0) (L,0,0) (L,H,0) (L,H,H)
    assert_eq!(s.tree_face(&c1, 0).unwrap(), 0);
    assert_eq!(s.tree_face(&c1, 3).unwrap(), 3);
    assert!(matches!(
        s.tree_face(&c1, 1),
        Err(SchemeError::FaceNotOnRootBoundary { face: 1, .. })
    ));

    let tri_half = TriElement::ROOT_LEN / 2;
    let f0 = s.boundary_face(&c1, 0).unwrap();
    assert_eq!(f0, TriElement::new(0, 0, 1, 0));
    let f3 = s.boundary_face(&c1, 3).unwrap();
    assert_eq!(f3, TriElement::new(tri_half, 0, 1, 0));

    assert_eq!(s.extrude_face(&f0, 0).unwrap(), c1);
    assert_eq!(s.extrude_face(&f3, 3).unwrap(), c1);
}

#[test]
fn every_root_face_triangle_extrudes_back() {
    let s = scheme();
    for id in 0..512 {
        let t = s.set_linear_id(3, id).unwrap();
        for face in 0..4 {
            if let Ok(root_face) = s.tree_face(&t, face) {
                let tri = s.boundary_face(&t, face).unwrap();
                assert!(tri.validate_invariants().is_ok());
                assert_eq!(s.extrude_face(&tri, root_face).unwrap(), t);
            }
        }
    }
}

#[test]
fn fine_triangles_are_rejected() {
    let s = scheme();
    let tri = TriElement::new(0, 0, 25, 0);
    assert!(matches!(
        s.extrude_face(&tri, 3),
        Err(SchemeError::LevelOutOfRange { level: 25, maxlevel: 21, .. })
    ));
}

#[test]
fn pool_runs_hold_families() {
    let mut s = scheme();
    let a = s.new_children(&TetElement::root()).unwrap();
    let b = s.new_elements(8).unwrap();
    assert_eq!(s.pool().live_records(), 16);
    let kids = s.elements(a).unwrap().to_vec();
    s.elements_mut(b).unwrap().copy_from_slice(&kids);
    assert!(s.is_family(s.elements(b).unwrap()));
    s.destroy_elements(a).unwrap();
    s.destroy_elements(b).unwrap();
    assert_eq!(s.pool().live_records(), 0);
}

#[test]
fn finest_level_uses_the_full_id_range() {
    let s = scheme();
    let last_id = (1u64 << 63) - 1;
    let t = s.set_linear_id(21, last_id).unwrap();
    assert!(t.validate_invariants().is_ok());
    assert_eq!(t, s.last_descendant(&TetElement::root()));
    assert_eq!(s.linear_id(&t, 21).unwrap(), last_id);
    assert!(matches!(
        s.successor(&t, 21),
        Err(SchemeError::NoSuccessor { level: 21, .. })
    ));
    let prev = s.set_linear_id(21, last_id - 1).unwrap();
    assert_eq!(s.successor(&prev, 21).unwrap(), t);
    assert!(matches!(
        s.child(&t, 0),
        Err(SchemeError::LevelOutOfRange { level: 22, .. })
    ));
}
