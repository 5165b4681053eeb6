//! Runnable demonstrations, one per pattern.
//!
//! Each module wires a contract, a few units and one mechanic together and
//! writes what happens to a [`Sink`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::config::ConfigError;
use crate::error::PatternError;
use crate::sink::Sink;

pub mod command;
pub mod decorator;
pub mod factory;
pub mod observer;
pub mod singleton;
pub mod strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    Strategy,
    Command,
    Observer,
    Decorator,
    SimpleFactory,
    Factory,
    FactoryMethod,
    AbstractFactory,
    Singleton,
}

impl PatternKind {
    pub const ALL: [PatternKind; 9] = [
        PatternKind::Strategy,
        PatternKind::Command,
        PatternKind::Observer,
        PatternKind::Decorator,
        PatternKind::SimpleFactory,
        PatternKind::Factory,
        PatternKind::FactoryMethod,
        PatternKind::AbstractFactory,
        PatternKind::Singleton,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Strategy => "strategy",
            PatternKind::Command => "command",
            PatternKind::Observer => "observer",
            PatternKind::Decorator => "decorator",
            PatternKind::SimpleFactory => "simple-factory",
            PatternKind::Factory => "factory",
            PatternKind::FactoryMethod => "factory-method",
            PatternKind::AbstractFactory => "abstract-factory",
            PatternKind::Singleton => "singleton",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PatternKind::Strategy => "Strategy",
            PatternKind::Command => "Command",
            PatternKind::Observer => "Observer",
            PatternKind::Decorator => "Decorator",
            PatternKind::SimpleFactory => "Simple Factory",
            PatternKind::Factory => "Factory",
            PatternKind::FactoryMethod => "Factory Method",
            PatternKind::AbstractFactory => "Abstract Factory",
            PatternKind::Singleton => "Singleton",
        }
    }

    /// Runs the demonstration. The sink is shared because subscribers in the
    /// observer demonstration keep their own handle to it.
    pub fn run(self, sink: &Arc<dyn Sink>) -> Result<(), PatternError> {
        sink.heading(self.title());
        let out = sink.as_ref();
        match self {
            PatternKind::Strategy => strategy::run(out),
            PatternKind::Command => command::run(out),
            PatternKind::Observer => observer::run(Arc::clone(sink)),
            PatternKind::Decorator => decorator::run(out),
            PatternKind::SimpleFactory => factory::run_simple(out),
            PatternKind::Factory => factory::run_factory(out),
            PatternKind::FactoryMethod => factory::run_factory_method(out),
            PatternKind::AbstractFactory => factory::run_abstract(out),
            PatternKind::Singleton => singleton::run(out),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        PatternKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ConfigError::unknown_pattern(s))
    }
}

/// Runs `patterns` in order, stopping at the first failure.
pub fn run_all(patterns: &[PatternKind], sink: &Arc<dyn Sink>) -> Result<(), PatternError> {
    for pattern in patterns {
        info!(pattern = %pattern, "running demonstration");
        pattern.run(sink)?;
    }
    Ok(())
}
