use tree_scheme::prelude::*;
use tree_scheme::registry::IMPLEMENTED_CLASSES;

#[test]
fn lookup_is_by_class() {
    let reg = SchemeRegistry::with_defaults(SchemeConfig::default());
    for class in IMPLEMENTED_CLASSES {
        let scheme = reg.get(class).unwrap();
        assert_eq!(scheme.eclass(), class);
    }
    for class in [ElementClass::Prism, ElementClass::Pyramid] {
        assert_eq!(
            reg.get(class).unwrap_err(),
            SchemeError::ClassNotRegistered(class)
        );
    }
}

#[test]
fn registration_errors() {
    let mut reg = SchemeRegistry::default();
    reg.register(ElementClass::Tetrahedron).unwrap();
    assert_eq!(
        reg.register(ElementClass::Tetrahedron).unwrap_err(),
        SchemeError::ClassAlreadyRegistered(ElementClass::Tetrahedron)
    );
    assert_eq!(
        reg.register(ElementClass::Prism).unwrap_err(),
        SchemeError::UnsupportedClass(ElementClass::Prism)
    );
    assert!(!reg.is_registered(ElementClass::Prism));
    assert!(matches!(
        reg.quad(),
        Err(SchemeError::ClassNotRegistered(ElementClass::Quadrilateral))
    ));
    assert!(SchemeRegistry::with_classes(
        SchemeConfig::default(),
        &[ElementClass::Line, ElementClass::Line]
    )
    .is_err());
}

#[test]
fn boundary_crosses_between_registered_schemes() {
    let reg = SchemeRegistry::with_classes(
        SchemeConfig::default(),
        &[ElementClass::Hexahedron, ElementClass::Quadrilateral],
    )
    .unwrap();
    let hex = reg.hex().unwrap();
    let quad = reg.quad().unwrap();

    let e = hex.set_linear_id(2, 9).unwrap();
    let mut faces = [QuadElement::default(); 6];
    hex.boundary(&e, 2, &mut faces).unwrap();
    for f in &faces {
        assert!(f.validate_invariants().is_ok());
        assert_eq!(quad.level(f), 2);
        // face quads stay tagged through navigation
        let c = quad.child(f, 1).unwrap();
        assert!(quad.surround_matches(&c, f));
    }
}

#[test]
fn pools_honour_the_configured_capacity() {
    let config = SchemeConfig {
        pool_block_size: 4,
        pool_capacity: Some(8),
    };
    let mut reg = SchemeRegistry::with_classes(config, &[ElementClass::Quadrilateral]).unwrap();
    let quad = reg.quad_mut().unwrap();
    let root = QuadElement::root();
    let a = quad.new_children(&root).unwrap();
    let b = quad.new_children(&root).unwrap();
    assert!(matches!(
        quad.new_children(&root),
        Err(SchemeError::PoolExhausted { capacity: 8, live: 8, .. })
    ));
    quad.destroy_elements(a).unwrap();
    let c = quad.new_children(&root).unwrap();
    assert_eq!(quad.pool().reserved_records(), 8);
    quad.destroy_elements(b).unwrap();
    quad.destroy_elements(c).unwrap();
    assert_eq!(reg.get(ElementClass::Quadrilateral).unwrap().live_records(), 0);
}

#[test]
fn config_deserialises_from_json() {
    let config: SchemeConfig =
        serde_json::from_str(r#"{ "pool_block_size": 16, "pool_capacity": null }"#).unwrap();
    assert_eq!(config.pool_block_size, 16);
    assert_eq!(config.pool_capacity, None);
    let reg = SchemeRegistry::new(config.clone());
    assert_eq!(reg.config(), &config);
}

#[test]
fn teardown_follows_reverse_registration_order() {
    let mut reg = SchemeRegistry::with_classes(
        SchemeConfig::default(),
        &[ElementClass::Hexahedron, ElementClass::Quadrilateral],
    )
    .unwrap();
    reg.register(ElementClass::Line).unwrap();
    assert_eq!(
        reg.clear(),
        vec![
            ElementClass::Line,
            ElementClass::Quadrilateral,
            ElementClass::Hexahedron
        ]
    );

    // a registry dropped in scope releases its pools with live records
    {
        let mut scoped = SchemeRegistry::with_classes(
            SchemeConfig::default(),
            &[ElementClass::Hexahedron, ElementClass::Quadrilateral],
        )
        .unwrap();
        let run = scoped.hex_mut().unwrap().new_elements(3).unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(scoped.classes(), &[ElementClass::Hexahedron, ElementClass::Quadrilateral]);
    }
}
