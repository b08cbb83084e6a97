//! Element classes known to the scheme registry.

use std::fmt;

/// Element classes, in registry slot order.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum ElementClass {
    /// 0D vertex.
    Vertex = 0,
    /// 1D line segment.
    Line = 1,
    /// 2D tensor-product cell (quad).
    Quadrilateral = 2,
    /// 2D simplex (triangle).
    Triangle = 3,
    /// 3D tensor-product cell (hex).
    Hexahedron = 4,
    /// 3D simplex (tet).
    Tetrahedron = 5,
    /// 3D wedge/prism.
    Prism = 6,
    /// 3D pyramid.
    Pyramid = 7,
}

/// Number of boundary entities of class `b` on an element of class `c`,
/// indexed `[c][b]`.
const BOUNDARY_COUNT: [[usize; ElementClass::COUNT]; ElementClass::COUNT] = [
    // vertex line quad tri hex tet prism pyramid
    [0, 0, 0, 0, 0, 0, 0, 0],
    [2, 0, 0, 0, 0, 0, 0, 0],
    [4, 4, 0, 0, 0, 0, 0, 0],
    [3, 3, 0, 0, 0, 0, 0, 0],
    [8, 12, 6, 0, 0, 0, 0, 0],
    [4, 6, 0, 4, 0, 0, 0, 0],
    [6, 9, 3, 2, 0, 0, 0, 0],
    [5, 8, 1, 4, 0, 0, 0, 0],
];

impl ElementClass {
    /// Number of element classes (registry slots).
    pub const COUNT: usize = 8;

    /// All classes in slot order.
    pub const ALL: [ElementClass; ElementClass::COUNT] = [
        ElementClass::Vertex,
        ElementClass::Line,
        ElementClass::Quadrilateral,
        ElementClass::Triangle,
        ElementClass::Hexahedron,
        ElementClass::Tetrahedron,
        ElementClass::Prism,
        ElementClass::Pyramid,
    ];

    /// Registry slot index of this class.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the topological dimension of the class.
    pub const fn dimension(self) -> u8 {
        match self {
            ElementClass::Vertex => 0,
            ElementClass::Line => 1,
            ElementClass::Quadrilateral | ElementClass::Triangle => 2,
            ElementClass::Hexahedron
            | ElementClass::Tetrahedron
            | ElementClass::Prism
            | ElementClass::Pyramid => 3,
        }
    }

    /// Number of corners.
    pub const fn num_vertices(self) -> usize {
        match self {
            ElementClass::Vertex => 1,
            ElementClass::Line => 2,
            ElementClass::Triangle => 3,
            ElementClass::Quadrilateral | ElementClass::Tetrahedron => 4,
            ElementClass::Pyramid => 5,
            ElementClass::Prism => 6,
            ElementClass::Hexahedron => 8,
        }
    }

    /// Number of codimension-1 faces.
    pub const fn num_faces(self) -> usize {
        match self {
            ElementClass::Vertex => 0,
            ElementClass::Line => 2,
            ElementClass::Triangle => 3,
            ElementClass::Quadrilateral | ElementClass::Tetrahedron => 4,
            ElementClass::Prism | ElementClass::Pyramid => 5,
            ElementClass::Hexahedron => 6,
        }
    }

    /// Number of boundary entities of class `boundary` on an element of this class.
    pub const fn boundary_count(self, boundary: ElementClass) -> usize {
        BOUNDARY_COUNT[self.index()][boundary.index()]
    }

    /// Counts the boundary entities of dimension `min_dim..dimension()`.
    ///
    /// Returns the total together with the per-class breakdown.
    pub fn count_boundary(self, min_dim: u8) -> (usize, [usize; ElementClass::COUNT]) {
        let dim = self.dimension();
        let mut per_class = [0usize; ElementClass::COUNT];
        let mut sum = 0;
        for other in ElementClass::ALL {
            let d = other.dimension();
            if d >= min_dim && d < dim {
                per_class[other.index()] = self.boundary_count(other);
                sum += per_class[other.index()];
            }
        }
        (sum, per_class)
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementClass::Vertex => "vertex",
            ElementClass::Line => "line",
            ElementClass::Quadrilateral => "quadrilateral",
            ElementClass::Triangle => "triangle",
            ElementClass::Hexahedron => "hexahedron",
            ElementClass::Tetrahedron => "tetrahedron",
            ElementClass::Prism => "prism",
            ElementClass::Pyramid => "pyramid",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_matches_index() {
        for (i, class) in ElementClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn codim_one_boundary_equals_face_count() {
        for class in ElementClass::ALL {
            if class.dimension() == 0 {
                continue;
            }
            let (sum, _) = class.count_boundary(class.dimension() - 1);
            assert_eq!(sum, class.num_faces(), "{class}");
        }
    }

    #[test]
    fn quad_full_boundary_counts_vertices_and_lines() {
        let (sum, per_class) = ElementClass::Quadrilateral.count_boundary(0);
        assert_eq!(sum, 8);
        assert_eq!(per_class[ElementClass::Vertex.index()], 4);
        assert_eq!(per_class[ElementClass::Line.index()], 4);
    }

    #[test]
    fn display_is_lowercase_name() {
        assert_eq!(ElementClass::Tetrahedron.to_string(), "tetrahedron");
    }
}
