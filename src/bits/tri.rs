//! Bit arithmetic for triangles of the square-embedded simplex tree.
//!
//! Same scheme as the tetrahedra one dimension down: two types per square
//! cell, four children per triangle, base-4 linear ids from the type-0 root.

use crate::element::{LineElement, TriElement};

pub const CHILDREN: usize = 4;
pub const FACES: usize = 3;
pub const ROOT_LEN: i32 = TriElement::ROOT_LEN;

/// `(cube id, type)` of child `i` of a parent of type `t`, `[t][i]`.
const CHILD_CID_TYPE: [[(u8, u8); CHILDREN]; 2] = [
    [(0, 0), (1, 0), (1, 1), (3, 0)],
    [(0, 1), (2, 0), (2, 1), (3, 1)],
];

/// `[cid][t]`
const PARENT_TYPE: [[u8; 2]; CHILDREN] = [[0, 1], [0, 0], [1, 1], [0, 1]];

/// `[cid][t]`
const LOCAL_INDEX: [[u8; 2]; CHILDREN] = [[0, 0], [1, 2], [1, 2], [3, 3]];

#[inline]
pub const fn len_at(level: u8) -> i32 {
    1 << (TriElement::MAXLEVEL - level)
}

#[inline]
pub fn cube_id(t: &TriElement, level: u8) -> usize {
    if level == 0 {
        return 0;
    }
    let h = len_at(level);
    usize::from(t.x & h != 0) | usize::from(t.y & h != 0) << 1
}

pub fn parent(t: &TriElement) -> TriElement {
    debug_assert!(t.level > 0);
    let h = len_at(t.level);
    let cid = cube_id(t, t.level);
    TriElement::new(
        t.x & !h,
        t.y & !h,
        t.level - 1,
        PARENT_TYPE[cid][usize::from(t.ty)],
    )
}

pub fn child(t: &TriElement, child_id: usize) -> TriElement {
    debug_assert!(t.level < TriElement::MAXLEVEL && child_id < CHILDREN);
    let (cid, ty) = CHILD_CID_TYPE[usize::from(t.ty)][child_id];
    let h = len_at(t.level + 1);
    TriElement::new(
        if cid & 1 != 0 { t.x | h } else { t.x },
        if cid & 2 != 0 { t.y | h } else { t.y },
        t.level + 1,
        ty,
    )
}

pub fn child_id(t: &TriElement) -> usize {
    if t.level == 0 {
        return 0;
    }
    usize::from(LOCAL_INDEX[cube_id(t, t.level)][usize::from(t.ty)])
}

pub fn ancestor(t: &TriElement, level: u8) -> TriElement {
    debug_assert!(level <= t.level);
    let mut ty = t.ty;
    for l in (level + 1..=t.level).rev() {
        ty = PARENT_TYPE[cube_id(t, l)][usize::from(ty)];
    }
    let mask = !(len_at(level) - 1);
    TriElement::new(t.x & mask, t.y & mask, level, ty)
}

pub fn linear_id(t: &TriElement, level: u8) -> u64 {
    let mut id = 0u64;
    let mut ty = usize::from(t.ty);
    for l in (1..=t.level).rev() {
        let cid = cube_id(t, l);
        if l <= level {
            id |= u64::from(LOCAL_INDEX[cid][ty]) << (2 * u32::from(level - l));
        }
        ty = usize::from(PARENT_TYPE[cid][ty]);
    }
    id
}

pub fn from_linear_id(level: u8, id: u64) -> TriElement {
    let mut t = TriElement::root();
    for l in 1..=level {
        let digit = (id >> (2 * u32::from(level - l))) & 3;
        t = child(&t, digit as usize);
    }
    t
}

pub fn first_descendant(t: &TriElement, level: u8) -> TriElement {
    TriElement::new(t.x, t.y, level, t.ty)
}

pub fn last_descendant(t: &TriElement, level: u8) -> TriElement {
    let shift = len_at(t.level) - len_at(level);
    TriElement::new(t.x + shift, t.y + shift, level, t.ty)
}

pub fn nearest_common_ancestor(t1: &TriElement, t2: &TriElement) -> TriElement {
    let exclor = ((t1.x ^ t2.x) | (t1.y ^ t2.y)) as u32;
    let differing_bits = (u32::BITS - exclor.leading_zeros()) as u8;
    let mut level = TriElement::MAXLEVEL
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

pub fn vertex(t: &TriElement, vertex: usize) -> [i32; 2] {
    debug_assert!(vertex < 3);
    let h = len_at(t.level);
    match (vertex, t.ty) {
        (0, _) => [t.x, t.y],
        (1, 0) => [t.x + h, t.y],
        (1, _) => [t.x, t.y + h],
        _ => [t.x + h, t.y + h],
    }
}

/// All corners inside the closed root triangle `L >= x >= y >= 0`.
pub fn is_inside_root(t: &TriElement) -> bool {
    t.level <= TriElement::MAXLEVEL
        && (0..3)
            .map(|v| vertex(t, v))
            .all(|[x, y]| ROOT_LEN >= x && x >= y && y >= 0)
}

fn on_root_face(root_face: usize, [x, y]: [i32; 2]) -> bool {
    match root_face {
        0 => x == ROOT_LEN,
        1 => x == y,
        2 => y == 0,
        _ => false,
    }
}

pub fn root_face(t: &TriElement, face: usize) -> Option<usize> {
    (0..FACES).find(|&root_face| {
        (0..3)
            .filter(|&v| v != face)
            .all(|v| on_root_face(root_face, vertex(t, v)))
    })
}

/// Line on local face `face` of `t`; the face lies on root face `root_face`.
pub fn boundary_face(t: &TriElement, face: usize, root_face: usize) -> LineElement {
    let axis = if root_face == 0 { 1 } else { 0 };
    let x = (0..3)
        .filter(|&v| v != face)
        .map(|v| vertex(t, v)[axis])
        .min()
        .unwrap_or_default();
    LineElement::new(x, t.level)
}

/// Every triangle touching the root boundary with a full edge has type 0.
pub fn extrude(line: &LineElement, root_face: usize) -> TriElement {
    debug_assert!(line.level <= TriElement::MAXLEVEL && root_face < FACES);
    let h = len_at(line.level);
    let [x, y] = match root_face {
        0 => [ROOT_LEN - h, line.x],
        1 => [line.x, line.x],
        _ => [line.x, 0],
    };
    TriElement::new(x, y, line.level, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const H1: i32 = 1 << 29;

    #[test]
    fn root_children() {
        let root = TriElement::root();
        assert_eq!(child(&root, 0), TriElement::new(0, 0, 1, 0));
        assert_eq!(child(&root, 1), TriElement::new(H1, 0, 1, 0));
        assert_eq!(child(&root, 2), TriElement::new(H1, 0, 1, 1));
        assert_eq!(child(&root, 3), TriElement::new(H1, H1, 1, 0));
    }

    #[test]
    fn ids_round_trip_at_level_three() {
        for id in 0..64 {
            let t = from_linear_id(3, id);
            assert!(is_inside_root(&t));
            assert_eq!(linear_id(&t, 3), id);
            assert_eq!(child(&parent(&t), child_id(&t)), t);
        }
    }

    #[test]
    fn boundary_lines_extrude_back() {
        for id in 0..16 {
            let t = from_linear_id(2, id);
            for face in 0..FACES {
                if let Some(rf) = root_face(&t, face) {
                    let line = boundary_face(&t, face, rf);
                    assert_eq!(extrude(&line, rf), t);
                }
            }
        }
    }
}
