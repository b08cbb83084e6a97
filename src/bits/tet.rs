//! Bit arithmetic for tetrahedra of the cube-embedded simplex tree.
//!
//! Children are those of Bey's red refinement, numbered locally by
//! `(cube id, type)`. The three tables below encode that refinement for the
//! six tetrahedron types; together with the anchor bits they determine every
//! navigation step. The linear id is the base-8 number of local child
//! indices along the path from the root tetrahedron (type 0).

use crate::element::{TetElement, TriElement};

pub const CHILDREN: usize = 8;
pub const FACES: usize = 4;
pub const ROOT_LEN: i32 = TetElement::ROOT_LEN;

/// `(cube id, type)` of the child with local index `i` of a parent of type `t`,
/// indexed `[t][i]`.
const CHILD_CID_TYPE: [[(u8, u8); CHILDREN]; 6] = [
    [(0, 0), (1, 0), (1, 2), (1, 3), (3, 0), (3, 1), (3, 4), (7, 0)],
    [(0, 1), (1, 1), (1, 4), (1, 5), (5, 0), (5, 1), (5, 3), (7, 1)],
    [(0, 2), (2, 2), (2, 4), (2, 5), (6, 0), (6, 2), (6, 3), (7, 2)],
    [(0, 3), (2, 0), (2, 1), (2, 3), (3, 2), (3, 3), (3, 5), (7, 3)],
    [(0, 4), (4, 0), (4, 1), (4, 4), (5, 2), (5, 4), (5, 5), (7, 4)],
    [(0, 5), (4, 2), (4, 3), (4, 5), (6, 1), (6, 4), (6, 5), (7, 5)],
];

/// Parent type of a tetrahedron with the given cube id and type, `[cid][t]`.
const PARENT_TYPE: [[u8; 6]; CHILDREN] = [
    [0, 1, 2, 3, 4, 5],
    [0, 1, 0, 0, 1, 1],
    [3, 3, 2, 3, 2, 2],
    [0, 0, 3, 3, 0, 3],
    [4, 4, 5, 5, 4, 5],
    [1, 1, 4, 1, 4, 4],
    [2, 5, 2, 2, 5, 5],
    [0, 1, 2, 3, 4, 5],
];

/// Local index among the siblings of a tetrahedron with cube id and type, `[cid][t]`.
const LOCAL_INDEX: [[u8; 6]; CHILDREN] = [
    [0, 0, 0, 0, 0, 0],
    [1, 1, 2, 3, 2, 3],
    [1, 2, 1, 3, 2, 3],
    [4, 5, 4, 5, 6, 6],
    [1, 2, 1, 2, 3, 3],
    [4, 5, 4, 6, 5, 6],
    [4, 4, 5, 6, 5, 6],
    [7, 7, 7, 7, 7, 7],
];

/// Edge length of the cube cell at `level`.
#[inline]
pub const fn len_at(level: u8) -> i32 {
    1 << (TetElement::MAXLEVEL - level)
}

/// Octant of the parent cube that holds the anchor of a tet at `level`.
#[inline]
pub fn cube_id(t: &TetElement, level: u8) -> usize {
    if level == 0 {
        return 0;
    }
    let h = len_at(level);
    usize::from(t.x & h != 0) | usize::from(t.y & h != 0) << 1 | usize::from(t.z & h != 0) << 2
}

pub fn parent(t: &TetElement) -> TetElement {
    debug_assert!(t.level > 0);
    let h = len_at(t.level);
    let cid = cube_id(t, t.level);
    TetElement::new(
        t.x & !h,
        t.y & !h,
        t.z & !h,
        t.level - 1,
        PARENT_TYPE[cid][usize::from(t.ty)],
    )
}

pub fn child(t: &TetElement, child_id: usize) -> TetElement {
    debug_assert!(t.level < TetElement::MAXLEVEL && child_id < CHILDREN);
    let (cid, ty) = CHILD_CID_TYPE[usize::from(t.ty)][child_id];
    let h = len_at(t.level + 1);
    let step = |bit: u8| if cid & bit != 0 { h } else { 0 };
    TetElement::new(
        t.x | step(1),
        t.y | step(2),
        t.z | step(4),
        t.level + 1,
        ty,
    )
}

pub fn child_id(t: &TetElement) -> usize {
    if t.level == 0 {
        return 0;
    }
    usize::from(LOCAL_INDEX[cube_id(t, t.level)][usize::from(t.ty)])
}

/// Ancestor at `level <= t.level`; the type is recovered by climbing.
pub fn ancestor(t: &TetElement, level: u8) -> TetElement {
    debug_assert!(level <= t.level);
    let mut ty = t.ty;
    for l in (level + 1..=t.level).rev() {
        ty = PARENT_TYPE[cube_id(t, l)][usize::from(ty)];
    }
    let mask = !(len_at(level) - 1);
    TetElement::new(t.x & mask, t.y & mask, t.z & mask, level, ty)
}

/// Tetrahedral Morton index of `t` projected to `level`.
///
/// Digits below `t.level` are zero when `level > t.level`, which is the
/// index of the first descendant at that level.
pub fn linear_id(t: &TetElement, level: u8) -> u64 {
    let mut id = 0u64;
    let mut ty = usize::from(t.ty);
    for l in (1..=t.level).rev() {
        let cid = cube_id(t, l);
        if l <= level {
            id |= u64::from(LOCAL_INDEX[cid][ty]) << (3 * u32::from(level - l));
        }
        ty = usize::from(PARENT_TYPE[cid][ty]);
    }
    id
}

pub fn from_linear_id(level: u8, id: u64) -> TetElement {
    let mut t = TetElement::root();
    for l in 1..=level {
        let digit = (id >> (3 * u32::from(level - l))) & 7;
        t = child(&t, digit as usize);
    }
    t
}

pub fn first_descendant(t: &TetElement, level: u8) -> TetElement {
    TetElement::new(t.x, t.y, t.z, level, t.ty)
}

/// The last child of every tet keeps its type and sits in the upper cube corner.
pub fn last_descendant(t: &TetElement, level: u8) -> TetElement {
    let shift = len_at(t.level) - len_at(level);
    TetElement::new(t.x + shift, t.y + shift, t.z + shift, level, t.ty)
}

/// Deepest tetrahedron containing both `t1` and `t2`.
///
/// The common cube ancestor is read off the anchor bits; from there the two
/// ancestors share an anchor and we climb until their types agree as well.
pub fn nearest_common_ancestor(t1: &TetElement, t2: &TetElement) -> TetElement {
    let exclor = ((t1.x ^ t2.x) | (t1.y ^ t2.y) | (t1.z ^ t2.z)) as u32;
    let differing_bits = (u32::BITS - exclor.leading_zeros()) as u8;
    let mut level = TetElement::MAXLEVEL
        .saturating_sub(differing_bits)
        .min(t1.level)
        .min(t2.level);
    loop {
        let a1 = ancestor(t1, level);
        let a2 = ancestor(t2, level);
        if a1.ty == a2.ty || level == 0 {
            return a1;
        }
        level -= 1;
    }
}

/// Corner `vertex` (0..4) of `t`.
pub fn vertex(t: &TetElement, vertex: usize) -> [i32; 3] {
    debug_assert!(vertex < 4);
    let h = len_at(t.level);
    let mut coords = [t.x, t.y, t.z];
    match vertex {
        0 => {}
        3 => coords.iter_mut().for_each(|c| *c += h),
        _ => {
            let ei = usize::from(t.ty / 2);
            coords[ei] += h;
            if vertex == 2 {
                let ej = (ei + if t.ty % 2 == 1 { 2 } else { 1 }) % 3;
                coords[ej] += h;
            }
        }
    }
    coords
}

pub fn vertices(t: &TetElement) -> [[i32; 3]; 4] {
    [0, 1, 2, 3].map(|v| vertex(t, v))
}

/// All four corners inside the closed root tetrahedron `L >= x >= y >= z >= 0`.
pub fn is_inside_root(t: &TetElement) -> bool {
    t.level <= TetElement::MAXLEVEL
        && vertices(t)
            .iter()
            .all(|&[x, y, z]| ROOT_LEN >= x && x >= y && y >= z && z >= 0)
}

/// Whether point `p` lies on the plane of root face `root_face`.
fn on_root_face(root_face: usize, [x, y, z]: [i32; 3]) -> bool {
    match root_face {
        0 => x == ROOT_LEN,
        1 => x == y,
        2 => y == z,
        3 => z == 0,
        _ => false,
    }
}

/// Root face that local face `face` of `t` lies on, if any.
pub fn root_face(t: &TetElement, face: usize) -> Option<usize> {
    let corners = vertices(t);
    (0..FACES).find(|&root_face| {
        (0..4)
            .filter(|&v| v != face)
            .all(|v| on_root_face(root_face, corners[v]))
    })
}

/// Drops the coordinate that is constant on a root face.
fn project(root_face: usize, [x, y, z]: [i32; 3]) -> [i32; 2] {
    match root_face {
        0 => [y, z],
        1 => [x, z],
        _ => [x, y],
    }
}

/// Resolution gap between the triangle and tetrahedron trees.
const FACE_SHIFT: u8 = TriElement::MAXLEVEL - TetElement::MAXLEVEL;

/// Triangle on local face `face` of `t`, which lies on root face `root_face`.
///
/// The triangle anchor is rescaled to triangle-tree resolution.
pub fn boundary_face(t: &TetElement, face: usize, root_face: usize) -> TriElement {
    let h = len_at(t.level);
    let corners = vertices(t);
    let mut projected = (0..4).filter(|&v| v != face).map(|v| project(root_face, corners[v]));
    let mut points = [[0i32; 2]; 3];
    for p in points.iter_mut() {
        *p = projected.next().unwrap_or_default();
    }
    let u = points.iter().map(|p| p[0]).min().unwrap_or_default();
    let v = points.iter().map(|p| p[1]).min().unwrap_or_default();
    let ty = if points.contains(&[u + h, v]) { 0 } else { 1 };
    TriElement::new(u << FACE_SHIFT, v << FACE_SHIFT, t.level, ty)
}

/// The unique tetrahedron inside the root whose face is `tri` on `root_face`.
pub fn extrude(tri: &TriElement, root_face: usize) -> TetElement {
    debug_assert!(tri.level <= TetElement::MAXLEVEL && root_face < FACES);
    let h = len_at(tri.level);
    let (u, v) = (tri.x >> FACE_SHIFT, tri.y >> FACE_SHIFT);
    let ([x, y, z], upper_ty) = match root_face {
        0 => ([ROOT_LEN - h, u, v], 1),
        1 => ([u, u, v], 4),
        2 => ([u, v, v], 2),
        _ => ([u, v, 0], 3),
    };
    let ty = if tri.ty == 0 { 0 } else { upper_ty };
    TetElement::new(x, y, z, tri.level, ty)
}
