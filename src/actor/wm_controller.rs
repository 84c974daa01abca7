//! The WM controller sits between the host's input and the reactor. It owns
//! the hotkey bindings and turns key events into commands.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::reactor::Reactor;
use crate::common::config::Config;
use crate::model::WorkspaceStore;
use crate::sys::framebuffer::Canvas;
use crate::sys::hotkey::Hotkey;
use crate::ui::{Palette, RenderOutcome, Renderer};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WmCommand {
    FocusNext,
    FocusPrev,
    CycleLayout,
    CloseWindow,
    NewWindow,
    NextWorkspace,
    PrevWorkspace,
    SwitchToWorkspace(usize),
}

impl fmt::Display for WmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WmCommand::FocusNext => f.write_str("focus_next"),
            WmCommand::FocusPrev => f.write_str("focus_prev"),
            WmCommand::CycleLayout => f.write_str("cycle_layout"),
            WmCommand::CloseWindow => f.write_str("close_window"),
            WmCommand::NewWindow => f.write_str("new_window"),
            WmCommand::NextWorkspace => f.write_str("next_workspace"),
            WmCommand::PrevWorkspace => f.write_str("prev_workspace"),
            WmCommand::SwitchToWorkspace(index) => write!(f, "switch_to_workspace {index}"),
        }
    }
}

impl FromStr for WmCommand {
    type Err = String;

    /// Parses the same names the config file uses; `switch_to_workspace`
    /// takes its index as a second word.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match (words.next(), words.next()) {
            (Some("focus_next"), None) => WmCommand::FocusNext,
            (Some("focus_prev"), None) => WmCommand::FocusPrev,
            (Some("cycle_layout"), None) => WmCommand::CycleLayout,
            (Some("close_window"), None) => WmCommand::CloseWindow,
            (Some("new_window"), None) => WmCommand::NewWindow,
            (Some("next_workspace"), None) => WmCommand::NextWorkspace,
            (Some("prev_workspace"), None) => WmCommand::PrevWorkspace,
            (Some("switch_to_workspace"), Some(index)) => WmCommand::SwitchToWorkspace(
                index.parse().map_err(|_| format!("invalid workspace index '{index}'"))?,
            ),
            _ => return Err(format!("unknown command '{s}'")),
        };
        if words.next().is_some() {
            return Err(format!("trailing input in '{s}'"));
        }
        Ok(command)
    }
}

/// The host capability for binding keys. The host calls back into the
/// controller with the raw scancode and modifier mask when a bound key fires.
pub trait HotkeyRegistry {
    fn register(&mut self, hotkey: Hotkey, command: WmCommand);
}

/// In-process registry: a lookup table from hotkey to command.
#[derive(Debug, Default, Clone)]
pub struct HotkeyTable {
    bindings: FxHashMap<Hotkey, WmCommand>,
}

impl HotkeyTable {
    pub fn lookup(&self, hotkey: &Hotkey) -> Option<WmCommand> { self.bindings.get(hotkey).copied() }

    pub fn len(&self) -> usize { self.bindings.len() }

    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&Hotkey, &WmCommand)> { self.bindings.iter() }
}

impl HotkeyRegistry for HotkeyTable {
    fn register(&mut self, hotkey: Hotkey, command: WmCommand) {
        if let Some(previous) = self.bindings.insert(hotkey, command) {
            debug!(%hotkey, %previous, %command, "hotkey rebound");
        }
    }
}

pub fn register_hotkeys(registry: &mut impl HotkeyRegistry, config: &Config) {
    for (hotkey, command) in &config.keys {
        info!(%hotkey, %command, "registering hotkey");
        registry.register(*hotkey, *command);
    }
}

pub struct WmController<C> {
    reactor: Reactor<C>,
    hotkeys: HotkeyTable,
}

impl<C: Canvas> WmController<C> {
    /// Builds the state from `config`, registers its bindings, and paints
    /// the first frame onto `canvas`.
    pub fn new(config: &Config, canvas: C) -> Self {
        let settings = &config.settings;
        let store = WorkspaceStore::new(
            config.layouts.presets(),
            settings.default_layout,
            &settings.new_window_title,
        );
        let renderer = Renderer::new(settings.top_bar_height, Palette::from(&settings.colors));
        let mut hotkeys = HotkeyTable::default();
        register_hotkeys(&mut hotkeys, config);
        Self { reactor: Reactor::new(store, renderer, canvas), hotkeys }
    }

    pub fn hotkeys(&self) -> &HotkeyTable { &self.hotkeys }

    pub fn reactor(&self) -> &Reactor<C> { &self.reactor }

    pub fn into_reactor(self) -> Reactor<C> { self.reactor }

    /// Handles one key event from the host. Keys without a binding are
    /// ignored and return `None`.
    pub fn handle_key(&mut self, scancode: u8, modifier_mask: u8) -> Option<RenderOutcome> {
        let hotkey = Hotkey::from_raw(scancode, modifier_mask)?;
        let Some(command) = self.hotkeys.lookup(&hotkey) else {
            trace!(%hotkey, "unbound key");
            return None;
        };
        Some(self.handle_command(&command))
    }

    pub fn handle_command(&mut self, command: &WmCommand) -> RenderOutcome {
        self.reactor.handle_command(command)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::layout_engine::LayoutKind;
    use crate::sys::framebuffer::Framebuffer;
    use crate::sys::hotkey::{KeyCode, Modifiers};

    fn controller() -> WmController<Framebuffer> {
        WmController::new(&Config::default(), Framebuffer::allocate(800, 600, 800).unwrap())
    }

    #[test]
    fn default_bindings() {
        let controller = controller();
        let table = controller.hotkeys();
        assert_eq!(table.len(), 4);
        let alt = |key| Hotkey::new(Modifiers::ALT, key);
        assert_eq!(table.lookup(&alt(KeyCode::KeyD)), Some(WmCommand::FocusNext));
        assert_eq!(table.lookup(&alt(KeyCode::KeyL)), Some(WmCommand::CycleLayout));
        assert_eq!(table.lookup(&alt(KeyCode::KeyQ)), Some(WmCommand::CloseWindow));
        assert_eq!(table.lookup(&alt(KeyCode::KeyW)), Some(WmCommand::NewWindow));
    }

    #[test]
    fn raw_key_events_reach_the_store() {
        let mut controller = controller();
        assert!(matches!(
            controller.handle_key(0x11, 1),
            Some(RenderOutcome::Structural { windows: 1, .. })
        ));
        assert_eq!(controller.handle_key(0x11, 0), None);
        assert_eq!(controller.handle_key(0x39, 1), None);
        controller.handle_key(0x26, 1);
        let store = controller.reactor().store();
        assert_eq!(store.active_workspace().layout().kind, LayoutKind::Fullscreen);
        assert_eq!(
            store.active_workspace().windows()[0].title().as_str(),
            "template"
        );
    }

    #[test]
    fn later_registration_wins() {
        let mut table = HotkeyTable::default();
        let key = Hotkey::new(Modifiers::ALT, KeyCode::KeyD);
        table.register(key, WmCommand::FocusNext);
        table.register(key, WmCommand::FocusPrev);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&key), Some(WmCommand::FocusPrev));
    }

    #[test]
    fn command_names_round_trip_through_display() {
        for command in [
            WmCommand::FocusNext,
            WmCommand::FocusPrev,
            WmCommand::CycleLayout,
            WmCommand::CloseWindow,
            WmCommand::NewWindow,
            WmCommand::NextWorkspace,
            WmCommand::PrevWorkspace,
            WmCommand::SwitchToWorkspace(2),
        ] {
            assert_eq!(command.to_string().parse::<WmCommand>(), Ok(command));
        }
        assert!("switch_to_workspace".parse::<WmCommand>().is_err());
        assert!("switch_to_workspace x".parse::<WmCommand>().is_err());
        assert!("new_window now".parse::<WmCommand>().is_err());
        assert!("".parse::<WmCommand>().is_err());
    }
}
