//! Construction indirection: Simple Factory, Factory and Factory Method.
//!
//! Selectors are closed enums. A factory maps each variant it supports to a
//! constructor function; anything else is rejected with
//! [`PatternError::UnsupportedVariant`] before any value is built.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::PatternError;

pub trait Factory {
    type Selector;
    type Product: ?Sized;

    fn create(&self, selector: Self::Selector) -> Result<Box<Self::Product>, PatternError>;

    /// Parses `name` into a selector first, so unknown names fail the same way.
    fn create_named(&self, name: &str) -> Result<Box<Self::Product>, PatternError>
    where
        Self::Selector: FromStr<Err = PatternError>,
    {
        let selector = name.parse::<Self::Selector>()?;
        self.create(selector)
    }
}

/// Factory Method: the creator decides the concrete product.
pub trait Creator {
    type Product: ?Sized;

    fn create_product(&self) -> Box<Self::Product>;
}

/// Variant-to-constructor mapping for one product family.
pub struct VariantTable<K, P: ?Sized> {
    family: &'static str,
    entries: Vec<(K, fn() -> Box<P>)>,
}

impl<K, P> VariantTable<K, P>
where
    K: Copy + PartialEq + fmt::Display,
    P: ?Sized,
{
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            entries: Vec::new(),
        }
    }

    /// Registers `constructor` for `kind`, replacing any earlier one.
    pub fn with(mut self, kind: K, constructor: fn() -> Box<P>) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = constructor,
            None => self.entries.push((kind, constructor)),
        }
        self
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn supports(&self, kind: K) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    pub fn variants(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl<K, P> Factory for VariantTable<K, P>
where
    K: Copy + PartialEq + fmt::Display,
    P: ?Sized,
{
    type Selector = K;
    type Product = P;

    fn create(&self, selector: K) -> Result<Box<P>, PatternError> {
        let (_, constructor) = self
            .entries
            .iter()
            .find(|(k, _)| *k == selector)
            .ok_or_else(|| PatternError::unsupported_variant(self.family, selector.to_string()))?;
        debug!(family = self.family, variant = %selector, "creating product");
        Ok(constructor())
    }
}

impl<K: fmt::Debug, P: ?Sized> fmt::Debug for VariantTable<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantTable")
            .field("family", &self.family)
            .field("variants", &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shape {
        Circle,
        Square,
        Triangle,
    }

    impl fmt::Display for Shape {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let name = match self {
                Shape::Circle => "circle",
                Shape::Square => "square",
                Shape::Triangle => "triangle",
            };
            f.write_str(name)
        }
    }

    impl FromStr for Shape {
        type Err = PatternError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "circle" => Ok(Shape::Circle),
                "square" => Ok(Shape::Square),
                "triangle" => Ok(Shape::Triangle),
                other => Err(PatternError::unsupported_variant("shape", other)),
            }
        }
    }

    trait Area {
        fn sides(&self) -> u32;
    }

    struct Circle;
    impl Area for Circle {
        fn sides(&self) -> u32 {
            0
        }
    }

    struct Square;
    impl Area for Square {
        fn sides(&self) -> u32 {
            4
        }
    }

    fn shapes() -> VariantTable<Shape, dyn Area> {
        VariantTable::<Shape, dyn Area>::new("shape factory")
            .with(Shape::Circle, || Box::new(Circle))
            .with(Shape::Square, || Box::new(Square))
    }

    #[test]
    fn test_create_supported() {
        let factory = shapes();
        assert_eq!(factory.create(Shape::Circle).unwrap().sides(), 0);
        assert_eq!(factory.create(Shape::Square).unwrap().sides(), 4);
    }

    #[test]
    fn test_create_is_deterministic() {
        let factory = shapes();
        for _ in 0..5 {
            assert_eq!(factory.create(Shape::Square).unwrap().sides(), 4);
        }
    }

    #[test]
    fn test_unsupported_variant_rejected() {
        let factory = shapes();
        let err = factory.create(Shape::Triangle).err().unwrap();
        assert_eq!(
            err,
            PatternError::unsupported_variant("shape factory", "triangle")
        );
    }

    #[test]
    fn test_create_named() {
        let factory = shapes();
        assert_eq!(factory.create_named("square").unwrap().sides(), 4);

        let err = factory.create_named("hexagon").err().unwrap();
        assert!(matches!(err, PatternError::UnsupportedVariant { .. }));
    }

    static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn counted_circle() -> Box<dyn Area> {
        COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
        Box::new(Circle)
    }

    #[test]
    fn test_rejected_selectors_construct_nothing() {
        let factory = VariantTable::<Shape, dyn Area>::new("counted shapes")
            .with(Shape::Circle, counted_circle);

        assert!(factory.create(Shape::Triangle).is_err());
        assert!(factory.create(Shape::Square).is_err());
        assert!(factory.create_named("hexagon").is_err());
        assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 0);

        factory.create(Shape::Circle).unwrap();
        assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_replaces_constructor() {
        let factory = shapes().with(Shape::Circle, || Box::new(Square));
        assert_eq!(factory.create(Shape::Circle).unwrap().sides(), 4);
        assert_eq!(factory.variants().count(), 2);
    }

    #[test]
    fn test_supports_and_variants() {
        let factory = shapes();
        assert!(factory.supports(Shape::Circle));
        assert!(!factory.supports(Shape::Triangle));
        assert_eq!(
            factory.variants().collect::<Vec<_>>(),
            vec![Shape::Circle, Shape::Square]
        );
        assert_eq!(factory.family(), "shape factory");
    }
}
