//! Decorator: coffee priced and described layer by layer.

use crate::compose::{Decorator, Wrap};
use crate::error::PatternError;
use crate::sink::Sink;

pub trait Beverage {
    fn cost(&self) -> f64;
    fn description(&self) -> String;
}

impl<B: Beverage + ?Sized> Beverage for Box<B> {
    fn cost(&self) -> f64 {
        (**self).cost()
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCoffee;

impl Beverage for SimpleCoffee {
    fn cost(&self) -> f64 {
        2.0
    }

    fn description(&self) -> String {
        "Simple Coffee".to_string()
    }
}

/// What one layer adds on top of the beverage it wraps.
pub trait Topping {
    fn extra_cost(&self) -> f64;
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Milk;

impl Topping for Milk {
    fn extra_cost(&self) -> f64 {
        1.0
    }

    fn label(&self) -> &str {
        "Milk"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Whip;

impl Topping for Whip {
    fn extra_cost(&self) -> f64 {
        0.5
    }

    fn label(&self) -> &str {
        "Whip"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Syrup {
    pub flavour: &'static str,
}

impl Topping for Syrup {
    fn extra_cost(&self) -> f64 {
        0.75
    }

    fn label(&self) -> &str {
        self.flavour
    }
}

impl<B: Beverage, T: Topping> Beverage for Decorator<B, T> {
    fn cost(&self) -> f64 {
        self.inner().cost() + self.layer().extra_cost()
    }

    fn description(&self) -> String {
        format!("{}, {}", self.inner().description(), self.layer().label())
    }
}

fn receipt(beverage: &dyn Beverage) -> String {
    format!("{} ${:.2}", beverage.description(), beverage.cost())
}

pub fn run(sink: &dyn Sink) -> Result<(), PatternError> {
    let simple = SimpleCoffee;
    sink.emit(&receipt(&simple));

    let milk = simple.wrap(Milk);
    sink.emit(&receipt(&milk));

    let whip_milk = milk.wrap(Whip);
    sink.emit(&receipt(&whip_milk));

    // Runtime-chosen toppings share one boxed type.
    let mut order: Box<dyn Beverage> = Box::new(SimpleCoffee);
    for flavour in ["Vanilla", "Caramel"] {
        order = Box::new(order.wrap(Syrup { flavour }));
    }
    sink.emit(&receipt(order.as_ref()));
    Ok(())
}
