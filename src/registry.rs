//! Scheme registry: the owned table from element class to element scheme.
//!
//! Slots are populated explicitly, so only the classes a mesh actually uses
//! are instantiated. Each slot owns its scheme and therefore its element
//! pool. Schemes are torn down in reverse creation order, either by
//! [`SchemeRegistry::clear`] or when the registry is dropped.

use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::scheme::{HexScheme, LineScheme, QuadScheme, Scheme, TetScheme, TriScheme, VertexScheme};
use crate::scheme_error::SchemeError;

/// Element classes that have a scheme implementation.
pub const IMPLEMENTED_CLASSES: [ElementClass; 6] = [
    ElementClass::Vertex,
    ElementClass::Line,
    ElementClass::Quadrilateral,
    ElementClass::Triangle,
    ElementClass::Hexahedron,
    ElementClass::Tetrahedron,
];

#[derive(Debug)]
pub struct SchemeRegistry {
    config: SchemeConfig,
    slots: [Option<Scheme>; ElementClass::COUNT],
    /// Classes in the order their schemes were created.
    order: Vec<ElementClass>,
}

macro_rules! typed_lookup {
    ($($class:ident, $ty:ty, $get:ident, $get_mut:ident, $as:ident, $as_mut:ident;)*) => {
        $(
            pub fn $get(&self) -> Result<&$ty, SchemeError> {
                self.get(ElementClass::$class)?
                    .$as()
                    .ok_or(SchemeError::ClassNotRegistered(ElementClass::$class))
            }

            pub fn $get_mut(&mut self) -> Result<&mut $ty, SchemeError> {
                self.get_mut(ElementClass::$class)?
                    .$as_mut()
                    .ok_or(SchemeError::ClassNotRegistered(ElementClass::$class))
            }
        )*
    };
}

impl SchemeRegistry {
    /// An empty registry; schemes are created with `config` on registration.
    pub fn new(config: SchemeConfig) -> Self {
        Self {
            config,
            slots: Default::default(),
            order: Vec::new(),
        }
    }

    /// A registry holding exactly `classes`, created in the given order.
    pub fn with_classes(config: SchemeConfig, classes: &[ElementClass]) -> Result<Self, SchemeError> {
        let mut registry = Self::new(config);
        for &class in classes {
            registry.register(class)?;
        }
        Ok(registry)
    }

    /// A registry holding every implemented class.
    pub fn with_defaults(config: SchemeConfig) -> Self {
        let mut registry = Self::new(config);
        let defaults = [
            Scheme::Vertex(VertexScheme::new(&registry.config)),
            Scheme::Line(LineScheme::new(&registry.config)),
            Scheme::Quad(QuadScheme::new(&registry.config)),
            Scheme::Triangle(TriScheme::new(&registry.config)),
            Scheme::Hex(HexScheme::new(&registry.config)),
            Scheme::Tet(TetScheme::new(&registry.config)),
        ];
        for scheme in defaults {
            registry.insert(scheme);
        }
        registry
    }

    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Instantiates the scheme for `class` and returns it.
    pub fn register(&mut self, class: ElementClass) -> Result<&mut Scheme, SchemeError> {
        if self.slots[class.index()].is_some() {
            return Err(SchemeError::ClassAlreadyRegistered(class));
        }
        let scheme = Scheme::new(class, &self.config)?;
        Ok(self.insert(scheme))
    }

    fn insert(&mut self, scheme: Scheme) -> &mut Scheme {
        let class = scheme.eclass();
        log::debug!("registering {class} scheme");
        self.order.push(class);
        self.slots[class.index()].insert(scheme)
    }

    pub fn is_registered(&self, class: ElementClass) -> bool {
        self.slots[class.index()].is_some()
    }

    /// Registered classes in creation order.
    pub fn classes(&self) -> &[ElementClass] {
        &self.order
    }

    pub fn get(&self, class: ElementClass) -> Result<&Scheme, SchemeError> {
        self.slots[class.index()]
            .as_ref()
            .ok_or(SchemeError::ClassNotRegistered(class))
    }

    pub fn get_mut(&mut self, class: ElementClass) -> Result<&mut Scheme, SchemeError> {
        self.slots[class.index()]
            .as_mut()
            .ok_or(SchemeError::ClassNotRegistered(class))
    }

    typed_lookup! {
        Vertex, VertexScheme, vertex, vertex_mut, as_vertex, as_vertex_mut;
        Line, LineScheme, line, line_mut, as_line, as_line_mut;
        Quadrilateral, QuadScheme, quad, quad_mut, as_quad, as_quad_mut;
        Triangle, TriScheme, tri, tri_mut, as_tri, as_tri_mut;
        Hexahedron, HexScheme, hex, hex_mut, as_hex, as_hex_mut;
        Tetrahedron, TetScheme, tet, tet_mut, as_tet, as_tet_mut;
    }

    /// Destroys every scheme, newest first, and returns the destroyed classes
    /// in teardown order.
    pub fn clear(&mut self) -> Vec<ElementClass> {
        let mut destroyed = Vec::with_capacity(self.order.len());
        while let Some(class) = self.order.pop() {
            if let Some(scheme) = self.slots[class.index()].take() {
                let live = scheme.live_records();
                if live > 0 {
                    log::warn!("{class} scheme destroyed with {live} live records");
                }
                log::debug!("destroying {class} scheme");
                destroyed.push(class);
            }
        }
        destroyed
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::new(SchemeConfig::default())
    }
}

impl Drop for SchemeRegistry {
    fn drop(&mut self) {
        let _ = self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::ElementScheme;

    #[test]
    fn only_requested_classes_are_instantiated() {
        let reg = SchemeRegistry::with_classes(
            SchemeConfig::default(),
            &[ElementClass::Quadrilateral],
        )
        .unwrap();
        assert!(reg.is_registered(ElementClass::Quadrilateral));
        assert!(!reg.is_registered(ElementClass::Line));
        assert_eq!(
            reg.get(ElementClass::Tetrahedron).unwrap_err(),
            SchemeError::ClassNotRegistered(ElementClass::Tetrahedron)
        );
        assert_eq!(reg.quad().unwrap().maxlevel(), 30);
    }

    #[test]
    fn clear_destroys_newest_first() {
        let mut reg = SchemeRegistry::with_defaults(SchemeConfig::default());
        assert_eq!(reg.classes(), &IMPLEMENTED_CLASSES);
        let mut newest_first = IMPLEMENTED_CLASSES.to_vec();
        newest_first.reverse();
        assert_eq!(reg.clear(), newest_first);
        assert!(reg.clear().is_empty());
        assert!(reg.classes().is_empty());
        assert!(ElementClass::ALL.iter().all(|&c| !reg.is_registered(c)));
        reg.register(ElementClass::Line).unwrap();
        assert_eq!(reg.classes(), &[ElementClass::Line]);
    }
}
