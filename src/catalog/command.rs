//! Command: a remote control pressing whichever smart-home command is loaded.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::PatternError;
use crate::holder::{History, Holder, Reversible};
use crate::sink::Sink;

/// The receiver. Commands act on it; it knows nothing about them.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartHomeDevices {
    lights_on: bool,
    tv_on: bool,
    temperature: i32,
}

impl Default for SmartHomeDevices {
    fn default() -> Self {
        Self {
            lights_on: false,
            tv_on: false,
            temperature: 18,
        }
    }
}

impl SmartHomeDevices {
    pub fn turn_on_lights(&mut self) -> String {
        self.lights_on = true;
        "Turning on the lights.".to_string()
    }

    pub fn turn_off_lights(&mut self) -> String {
        self.lights_on = false;
        "Turning off the lights.".to_string()
    }

    pub fn adjust_thermostat(&mut self, temperature: i32) -> String {
        self.temperature = temperature;
        format!("Adjusting thermostat to {temperature} degrees.")
    }

    pub fn turn_on_tv(&mut self) -> String {
        self.tv_on = true;
        "Turning on the smart TV.".to_string()
    }

    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    pub fn tv_on(&self) -> bool {
        self.tv_on
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }
}

pub type SharedDevices = Rc<RefCell<SmartHomeDevices>>;

pub trait Command {
    fn execute(&self) -> String;
}

/// Remembers whether the lights were already on, so undo leaves them that way.
pub struct TurnOnLightsCommand {
    devices: SharedDevices,
    was_on: Cell<Option<bool>>,
}

impl TurnOnLightsCommand {
    pub fn new(devices: &SharedDevices) -> Self {
        Self {
            devices: Rc::clone(devices),
            was_on: Cell::new(None),
        }
    }
}

impl Command for TurnOnLightsCommand {
    fn execute(&self) -> String {
        let mut devices = self.devices.borrow_mut();
        self.was_on.set(Some(devices.lights_on()));
        devices.turn_on_lights()
    }
}

impl Reversible for TurnOnLightsCommand {
    fn apply(&self) {
        self.execute();
    }

    fn revert(&self) {
        if self.was_on.take() == Some(false) {
            self.devices.borrow_mut().turn_off_lights();
        }
    }

    fn describe(&self) -> String {
        "turn on lights".to_string()
    }
}

/// Remembers the temperature it replaced so it can be undone.
pub struct AdjustThermostatCommand {
    devices: SharedDevices,
    temperature: i32,
    previous: Cell<Option<i32>>,
}

impl AdjustThermostatCommand {
    pub fn new(devices: &SharedDevices, temperature: i32) -> Self {
        Self {
            devices: Rc::clone(devices),
            temperature,
            previous: Cell::new(None),
        }
    }
}

impl Command for AdjustThermostatCommand {
    fn execute(&self) -> String {
        let mut devices = self.devices.borrow_mut();
        self.previous.set(Some(devices.temperature()));
        devices.adjust_thermostat(self.temperature)
    }
}

impl Reversible for AdjustThermostatCommand {
    fn apply(&self) {
        self.execute();
    }

    fn revert(&self) {
        if let Some(previous) = self.previous.take() {
            self.devices.borrow_mut().adjust_thermostat(previous);
        }
    }

    fn describe(&self) -> String {
        format!("set thermostat to {}", self.temperature)
    }
}

pub struct TurnOnTvCommand {
    devices: SharedDevices,
}

impl TurnOnTvCommand {
    pub fn new(devices: &SharedDevices) -> Self {
        Self {
            devices: Rc::clone(devices),
        }
    }
}

impl Command for TurnOnTvCommand {
    fn execute(&self) -> String {
        self.devices.borrow_mut().turn_on_tv()
    }
}

/// The invoker: one button, one loaded command at a time.
pub struct RemoteControl {
    slot: Holder<dyn Command>,
}

impl Default for RemoteControl {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteControl {
    pub fn new() -> Self {
        Self {
            slot: Holder::new("remote control"),
        }
    }

    pub fn set_command(&mut self, command: Box<dyn Command>) {
        self.slot.set_active(command);
    }

    pub fn press_button(&self) -> Result<String, PatternError> {
        self.slot.invoke(|command| command.execute())
    }
}

pub fn run(sink: &dyn Sink) -> Result<(), PatternError> {
    let devices: SharedDevices = Rc::default();
    let mut remote = RemoteControl::new();

    remote.set_command(Box::new(TurnOnLightsCommand::new(&devices)));
    sink.emit(&remote.press_button()?);

    remote.set_command(Box::new(AdjustThermostatCommand::new(&devices, 22)));
    sink.emit(&remote.press_button()?);

    remote.set_command(Box::new(TurnOnTvCommand::new(&devices)));
    sink.emit(&remote.press_button()?);

    let mut history = History::new();
    history.execute(Box::new(AdjustThermostatCommand::new(&devices, 25)));
    sink.emit(&format!(
        "Thermostat now at {} degrees.",
        devices.borrow().temperature()
    ));
    history.undo();
    sink.emit(&format!(
        "Undo restored thermostat to {} degrees.",
        devices.borrow().temperature()
    ));
    Ok(())
}
