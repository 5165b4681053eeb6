//! The factory family, told with vehicles.
//!
//! - Simple Factory: one table building cars and trucks.
//! - Factory: one table building cars and bicycles.
//! - Factory Method: a creator per vehicle, each driving what it creates.
//! - Abstract Factory: part families whose engine and wheels always match.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;
use crate::factory::{Creator, Factory, VariantTable};
use crate::sink::Sink;

pub trait Vehicle {
    fn kind(&self) -> VehicleKind;
    fn drive(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    Car,
    Truck,
    Bicycle,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Truck, VehicleKind::Bicycle];

    pub fn name(self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Truck => "truck",
            VehicleKind::Bicycle => "bike",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(VehicleKind::Car),
            "truck" => Ok(VehicleKind::Truck),
            "bike" | "bicycle" => Ok(VehicleKind::Bicycle),
            other => Err(PatternError::unsupported_variant("vehicle", other)),
        }
    }
}

#[derive(Debug, Default)]
pub struct Car;

impl Vehicle for Car {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Car
    }

    fn drive(&self) -> String {
        "Driving a car...".to_string()
    }
}

#[derive(Debug, Default)]
pub struct Truck;

impl Vehicle for Truck {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Truck
    }

    fn drive(&self) -> String {
        "Driving a truck...".to_string()
    }
}

#[derive(Debug, Default)]
pub struct Bicycle;

impl Vehicle for Bicycle {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Bicycle
    }

    fn drive(&self) -> String {
        "Riding a bicycle...".to_string()
    }
}

pub type VehicleFactory = VariantTable<VehicleKind, dyn Vehicle>;

pub fn simple_vehicle_factory() -> VehicleFactory {
    VariantTable::<VehicleKind, dyn Vehicle>::new("simple vehicle factory")
        .with(VehicleKind::Car, || Box::new(Car))
        .with(VehicleKind::Truck, || Box::new(Truck))
}

pub fn vehicle_factory() -> VehicleFactory {
    VariantTable::<VehicleKind, dyn Vehicle>::new("vehicle factory")
        .with(VehicleKind::Car, || Box::new(Car))
        .with(VehicleKind::Bicycle, || Box::new(Bicycle))
}

// ============================================================================
// Factory Method
// ============================================================================

/// A creator that can also put its own product to use.
pub trait VehicleCreator: Creator<Product = dyn Vehicle> {
    fn start_driving(&self) -> String {
        self.create_product().drive()
    }
}

impl<C: Creator<Product = dyn Vehicle>> VehicleCreator for C {}

#[derive(Debug, Default)]
pub struct CarCreator;

impl Creator for CarCreator {
    type Product = dyn Vehicle;

    fn create_product(&self) -> Box<dyn Vehicle> {
        Box::new(Car)
    }
}

#[derive(Debug, Default)]
pub struct BicycleCreator;

impl Creator for BicycleCreator {
    type Product = dyn Vehicle;

    fn create_product(&self) -> Box<dyn Vehicle> {
        Box::new(Bicycle)
    }
}

// ============================================================================
// Abstract Factory
// ============================================================================

pub trait Engine {
    fn family(&self) -> &'static str;
    fn start(&self) -> String;
}

pub trait Wheels {
    fn family(&self) -> &'static str;
    fn count(&self) -> u8;
}

/// One family of parts. The associated types tie engine and wheels to the
/// same factory, so mixing families does not type-check.
pub trait PartsFactory {
    type Engine: Engine;
    type Wheels: Wheels;

    fn create_engine(&self) -> Self::Engine;
    fn create_wheels(&self) -> Self::Wheels;
}

#[derive(Debug)]
pub struct CarEngine;

impl Engine for CarEngine {
    fn family(&self) -> &'static str {
        "car"
    }

    fn start(&self) -> String {
        "V4 engine purrs".to_string()
    }
}

#[derive(Debug)]
pub struct CarWheels;

impl Wheels for CarWheels {
    fn family(&self) -> &'static str {
        "car"
    }

    fn count(&self) -> u8 {
        4
    }
}

#[derive(Debug)]
pub struct BikeEngine;

impl Engine for BikeEngine {
    fn family(&self) -> &'static str {
        "bike"
    }

    fn start(&self) -> String {
        "Single-cylinder engine rattles".to_string()
    }
}

#[derive(Debug)]
pub struct BikeWheels;

impl Wheels for BikeWheels {
    fn family(&self) -> &'static str {
        "bike"
    }

    fn count(&self) -> u8 {
        2
    }
}

#[derive(Debug, Default)]
pub struct CarPartsFactory;

impl PartsFactory for CarPartsFactory {
    type Engine = CarEngine;
    type Wheels = CarWheels;

    fn create_engine(&self) -> CarEngine {
        CarEngine
    }

    fn create_wheels(&self) -> CarWheels {
        CarWheels
    }
}

#[derive(Debug, Default)]
pub struct BikePartsFactory;

impl PartsFactory for BikePartsFactory {
    type Engine = BikeEngine;
    type Wheels = BikeWheels;

    fn create_engine(&self) -> BikeEngine {
        BikeEngine
    }

    fn create_wheels(&self) -> BikeWheels {
        BikeWheels
    }
}

/// A vehicle put together from a single factory's parts.
pub struct Assembly<F: PartsFactory> {
    engine: F::Engine,
    wheels: F::Wheels,
}

impl<F: PartsFactory> Assembly<F> {
    pub fn build(factory: &F) -> Self {
        Self {
            engine: factory.create_engine(),
            wheels: factory.create_wheels(),
        }
    }

    pub fn engine(&self) -> &F::Engine {
        &self.engine
    }

    pub fn wheels(&self) -> &F::Wheels {
        &self.wheels
    }

    pub fn summary(&self) -> String {
        format!(
            "{} assembly with {} wheels: {}",
            self.engine.family(),
            self.wheels.count(),
            self.engine.start()
        )
    }
}

// ============================================================================
// Demonstrations
// ============================================================================

pub fn run_simple(sink: &dyn Sink) -> Result<(), PatternError> {
    let factory = simple_vehicle_factory();
    for name in ["car", "truck"] {
        sink.emit(&factory.create_named(name)?.drive());
    }
    if let Err(err) = factory.create_named("spaceship") {
        sink.emit(&format!("Rejected: {err}"));
    }
    Ok(())
}

pub fn run_factory(sink: &dyn Sink) -> Result<(), PatternError> {
    let factory = vehicle_factory();
    sink.emit(&factory.create(VehicleKind::Car)?.drive());
    sink.emit(&factory.create(VehicleKind::Bicycle)?.drive());
    if let Err(err) = factory.create(VehicleKind::Truck) {
        sink.emit(&format!("Rejected: {err}"));
    }
    Ok(())
}

pub fn run_factory_method(sink: &dyn Sink) -> Result<(), PatternError> {
    let creators: [&dyn VehicleCreator; 2] = [&CarCreator, &BicycleCreator];
    for creator in creators {
        sink.emit(&creator.start_driving());
    }
    Ok(())
}

pub fn run_abstract(sink: &dyn Sink) -> Result<(), PatternError> {
    sink.emit(&Assembly::build(&CarPartsFactory).summary());
    sink.emit(&Assembly::build(&BikePartsFactory).summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_create_car_by_name() {
        let car = simple_vehicle_factory().create_named("car").unwrap();
        assert_eq!(car.kind(), VehicleKind::Car);
        assert!(car.drive().contains("car"));
    }

    #[test]
    fn test_create_spaceship_fails() {
        for factory in [simple_vehicle_factory(), vehicle_factory()] {
            let err = factory.create_named("spaceship").err().unwrap();
            assert_eq!(err, PatternError::unsupported_variant("vehicle", "spaceship"));
        }
    }

    #[test]
    fn test_factories_reject_variants_they_do_not_build() {
        let err = simple_vehicle_factory()
            .create(VehicleKind::Bicycle)
            .err()
            .unwrap();
        assert_eq!(
            err,
            PatternError::unsupported_variant("simple vehicle factory", "bike")
        );
        assert!(vehicle_factory().create(VehicleKind::Truck).is_err());
    }

    #[test]
    fn test_create_is_deterministic() {
        let factory = vehicle_factory();
        for kind in [VehicleKind::Car, VehicleKind::Bicycle] {
            let first = factory.create(kind).unwrap();
            let second = factory.create(kind).unwrap();
            assert_eq!(first.kind(), kind);
            assert_eq!(first.kind(), second.kind());
        }
    }

    #[test]
    fn test_vehicle_kind_parsing() {
        for kind in VehicleKind::ALL {
            assert_eq!(kind.name().parse::<VehicleKind>().unwrap(), kind);
        }
        assert_eq!("bicycle".parse::<VehicleKind>().unwrap(), VehicleKind::Bicycle);
        assert!("Car".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn test_factory_method_creators() {
        assert_eq!(CarCreator.create_product().kind(), VehicleKind::Car);
        assert_eq!(BicycleCreator.start_driving(), "Riding a bicycle...");
    }

    #[test]
    fn test_abstract_factory_families_match() {
        let car = Assembly::build(&CarPartsFactory);
        assert_eq!(car.engine().family(), car.wheels().family());
        assert_eq!(car.wheels().count(), 4);

        let bike = Assembly::build(&BikePartsFactory);
        assert_eq!(bike.engine().family(), bike.wheels().family());
        assert_eq!(bike.wheels().count(), 2);
    }

    #[test]
    fn test_run_simple() {
        let sink = MemorySink::new();
        run_simple(&sink).unwrap();
        let lines = sink.lines();
        assert_eq!(lines[0], "Driving a car...");
        assert_eq!(lines[1], "Driving a truck...");
        assert!(lines[2].contains("spaceship"));
    }

    #[test]
    fn test_run_factory_and_method() {
        let sink = MemorySink::new();
        run_factory(&sink).unwrap();
        assert!(sink.contains("Riding a bicycle"));
        assert!(sink.contains("Rejected"));

        sink.clear();
        run_factory_method(&sink).unwrap();
        assert_eq!(sink.lines(), vec!["Driving a car...", "Riding a bicycle..."]);
    }

    #[test]
    fn test_run_abstract() {
        let sink = MemorySink::new();
        run_abstract(&sink).unwrap();
        assert!(sink.lines()[0].starts_with("car assembly with 4 wheels"));
        assert!(sink.lines()[1].starts_with("bike assembly with 2 wheels"));
    }
}
