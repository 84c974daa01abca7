//! The window manager's logical state: every workspace, which one is active,
//! and the transitions between states. Nothing in here knows about pixels.

use tracing::debug;

use super::workspace::{Window, WindowHandle, WindowTitle, Workspace};
use crate::actor::wm_controller::WmCommand;
use crate::layout_engine::{FocusDirection, LayoutKind, LayoutPresets};

pub const WORKSPACE_COUNT: usize = 4;

static_assertions::const_assert!(WORKSPACE_COUNT > 0);

/// Owns every [`Workspace`] and [`Window`].
///
/// Every operation is total: invalid requests (adding to a full workspace,
/// closing on an empty one) leave the state untouched and report that nothing
/// happened through their return value.
#[derive(Clone, Debug)]
pub struct WorkspaceStore {
    workspaces: [Workspace; WORKSPACE_COUNT],
    active: usize,
    presets: LayoutPresets,
    new_window_title: WindowTitle,
    next_handle: u32,
}

impl Default for WorkspaceStore {
    fn default() -> Self { Self::new(LayoutPresets::default(), LayoutKind::Grid, "template") }
}

impl WorkspaceStore {
    pub fn new(presets: LayoutPresets, initial: LayoutKind, new_window_title: &str) -> Self {
        let layout = presets.get(initial);
        Self {
            workspaces: std::array::from_fn(|_| Workspace::new(layout)),
            active: 0,
            presets,
            new_window_title: WindowTitle::truncated(new_window_title),
            next_handle: 0,
        }
    }

    pub fn active_index(&self) -> usize { self.active }

    pub fn active_workspace(&self) -> &Workspace { &self.workspaces[self.active] }

    pub fn workspace(&self, index: usize) -> Option<&Workspace> { self.workspaces.get(index) }

    pub fn workspaces(&self) -> &[Workspace] { &self.workspaces }

    pub fn presets(&self) -> &LayoutPresets { &self.presets }

    fn active_mut(&mut self) -> &mut Workspace { &mut self.workspaces[self.active] }

    /// Opens a window titled `title` (truncated to fit) on the active
    /// workspace and focuses it. Returns `None` when the workspace is full.
    pub fn add_window(&mut self, title: &str) -> Option<WindowHandle> {
        if self.active_workspace().is_full() {
            debug!(workspace = self.active, "workspace full, dropping new window");
            return None;
        }
        let handle = WindowHandle::new(self.next_handle);
        let window = Window::new(WindowTitle::truncated(title), handle);
        // Capacity was checked above.
        self.active_mut().push(window).ok()?;
        self.next_handle = self.next_handle.wrapping_add(1);
        debug!(workspace = self.active, ?handle, title, "added window");
        Some(handle)
    }

    /// Opens a window with the configured placeholder title.
    pub fn add_placeholder_window(&mut self) -> Option<WindowHandle> {
        let title = self.new_window_title.clone();
        self.add_window(title.as_str())
    }

    pub fn close_current_window(&mut self) -> Option<Window> {
        let removed = self.active_mut().remove_focused();
        match &removed {
            Some(window) => debug!(
                workspace = self.active,
                handle = ?window.handle(),
                focused = self.active_workspace().focused_index(),
                "closed window"
            ),
            None => debug!(workspace = self.active, "nothing to close"),
        }
        removed
    }

    pub fn cycle_focus(&mut self, direction: FocusDirection) -> bool {
        let moved = self.active_mut().cycle_focus(direction);
        if moved {
            debug!(
                workspace = self.active,
                ?direction,
                focused = self.active_workspace().focused_index(),
                "cycled focus"
            );
        }
        moved
    }

    /// Replaces the active workspace's layout with the preset of the next
    /// layout kind and returns that kind.
    pub fn cycle_layout(&mut self) -> LayoutKind {
        let next = self.active_workspace().layout().kind.next();
        let preset = self.presets.get(next);
        self.active_mut().set_layout(preset);
        debug!(workspace = self.active, layout = next.name(), "cycled layout");
        next
    }

    /// Makes workspace `index` active. Out-of-range indices and the already
    /// active workspace are no-ops.
    pub fn switch_workspace(&mut self, index: usize) -> bool {
        if index >= WORKSPACE_COUNT || index == self.active {
            return false;
        }
        debug!(from = self.active, to = index, "switched workspace");
        self.active = index;
        true
    }

    pub fn next_workspace(&mut self) -> bool { self.switch_workspace((self.active + 1) % WORKSPACE_COUNT) }

    pub fn prev_workspace(&mut self) -> bool {
        self.switch_workspace((self.active + WORKSPACE_COUNT - 1) % WORKSPACE_COUNT)
    }

    /// Runs one command. Returns whether any state changed.
    pub fn apply(&mut self, command: &WmCommand) -> bool {
        match command {
            WmCommand::FocusNext => self.cycle_focus(FocusDirection::Next),
            WmCommand::FocusPrev => self.cycle_focus(FocusDirection::Prev),
            WmCommand::CycleLayout => {
                self.cycle_layout();
                true
            }
            WmCommand::CloseWindow => self.close_current_window().is_some(),
            WmCommand::NewWindow => self.add_placeholder_window().is_some(),
            WmCommand::NextWorkspace => self.next_workspace(),
            WmCommand::PrevWorkspace => self.prev_workspace(),
            WmCommand::SwitchToWorkspace(index) => self.switch_workspace(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::layout_engine::{LAYOUT_COUNT, LayoutConfig};
    use crate::model::MAX_WINDOWS_PER_WORKSPACE;

    fn store_with(n: usize) -> WorkspaceStore {
        let mut store = WorkspaceStore::default();
        for i in 0..n {
            store.add_window(&format!("w{i}")).unwrap();
        }
        store
    }

    fn titles(store: &WorkspaceStore) -> Vec<String> {
        store.active_workspace().windows().iter().map(|w| w.title().to_string()).collect()
    }

    #[test]
    fn starts_empty_in_grid() {
        let store = WorkspaceStore::default();
        for ws in store.workspaces() {
            assert!(ws.is_empty());
            assert_eq!(ws.focused_index(), 0);
            assert_eq!(ws.layout().kind, LayoutKind::Grid);
        }
        assert_eq!(store.active_index(), 0);
    }

    #[test]
    fn add_window_drops_when_full() {
        let mut store = store_with(MAX_WINDOWS_PER_WORKSPACE);
        let before = store.active_workspace().clone();
        assert_eq!(store.add_window("overflow"), None);
        assert_eq!(store.active_workspace(), &before);
    }

    #[test]
    fn handles_stay_unique_after_close() {
        let mut store = store_with(2);
        store.close_current_window();
        let handle = store.add_window("again").unwrap();
        let handles: Vec<_> =
            store.active_workspace().windows().iter().map(Window::handle).collect();
        assert_eq!(handles, vec![WindowHandle::new(0), handle]);
        assert_eq!(handle, WindowHandle::new(2));
    }

    #[test]
    fn close_with_focus_on_second_of_three() {
        let mut store = store_with(3);
        store.cycle_focus(FocusDirection::Next);
        store.cycle_focus(FocusDirection::Next);
        assert_eq!(store.active_workspace().focused_index(), 1);

        let closed = store.close_current_window().unwrap();
        assert_eq!(closed.title().as_str(), "w1");
        assert_eq!(titles(&store), vec!["w0", "w2"]);
        assert_eq!(store.active_workspace().window_count(), 2);
        assert_eq!(store.active_workspace().focused_index(), 1);
    }

    #[test]
    fn close_on_empty_is_noop() {
        let mut store = WorkspaceStore::default();
        assert!(store.close_current_window().is_none());
        assert!(!store.cycle_focus(FocusDirection::Prev));
    }

    #[test]
    fn cycle_layout_replaces_whole_config() {
        let mut presets = LayoutPresets::default();
        presets.set(LayoutConfig { gap: 10, ..LayoutConfig::preset(LayoutKind::Fullscreen) });
        let mut store = WorkspaceStore::new(presets, LayoutKind::Grid, "t");

        assert_eq!(store.cycle_layout(), LayoutKind::Fullscreen);
        assert_eq!(store.active_workspace().layout().gap, 10);
        assert_eq!(store.cycle_layout(), LayoutKind::MasterStack);
        assert_eq!(
            store.active_workspace().layout(),
            &LayoutConfig::preset(LayoutKind::MasterStack)
        );
        assert_eq!(store.active_workspace().layout().master_ratio, 60);
    }

    #[test]
    fn workspaces_are_independent() {
        let mut store = store_with(2);
        assert!(store.switch_workspace(2));
        assert!(store.active_workspace().is_empty());
        store.add_window("other");
        store.cycle_layout();

        assert!(store.prev_workspace());
        assert!(store.prev_workspace());
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.active_workspace().window_count(), 2);
        assert_eq!(store.active_workspace().layout().kind, LayoutKind::Grid);
        assert_eq!(store.workspace(2).unwrap().layout().kind, LayoutKind::Fullscreen);
    }

    #[test]
    fn switch_workspace_rejects_bad_index() {
        let mut store = WorkspaceStore::default();
        assert!(!store.switch_workspace(WORKSPACE_COUNT));
        assert!(!store.switch_workspace(0));
        assert!(store.prev_workspace());
        assert_eq!(store.active_index(), WORKSPACE_COUNT - 1);
        assert!(store.next_workspace());
        assert_eq!(store.active_index(), 0);
    }

    #[test]
    fn apply_routes_commands() {
        let mut store = WorkspaceStore::default();
        assert!(store.apply(&WmCommand::NewWindow));
        assert_eq!(titles(&store), vec!["template"]);
        assert!(store.apply(&WmCommand::FocusNext));
        assert!(store.apply(&WmCommand::CycleLayout));
        assert_eq!(store.active_workspace().layout().kind, LayoutKind::Fullscreen);
        assert!(store.apply(&WmCommand::CloseWindow));
        assert!(!store.apply(&WmCommand::CloseWindow));
        assert!(store.apply(&WmCommand::SwitchToWorkspace(3)));
        assert!(!store.apply(&WmCommand::SwitchToWorkspace(9)));
        assert_eq!(store.active_index(), 3);
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut store = WorkspaceStore::default();
        store.add_window(&"a".repeat(100)).unwrap();
        assert_eq!(store.active_workspace().windows()[0].title().as_str().len(), 31);
    }

    fn command() -> impl Strategy<Value = WmCommand> {
        prop_oneof![
            Just(WmCommand::FocusNext),
            Just(WmCommand::FocusPrev),
            Just(WmCommand::CycleLayout),
            Just(WmCommand::CloseWindow),
            Just(WmCommand::NewWindow),
            Just(WmCommand::NextWorkspace),
            Just(WmCommand::PrevWorkspace),
            (0usize..WORKSPACE_COUNT + 2).prop_map(WmCommand::SwitchToWorkspace),
        ]
    }

    proptest! {
        #[test]
        fn focus_stays_in_range(commands in prop::collection::vec(command(), 0..64)) {
            let mut store = WorkspaceStore::default();
            for command in &commands {
                store.apply(command);
                for ws in store.workspaces() {
                    prop_assert!(ws.window_count() <= MAX_WINDOWS_PER_WORKSPACE);
                    if ws.is_empty() {
                        prop_assert_eq!(ws.focused_index(), 0);
                    } else {
                        prop_assert!(ws.focused_index() < ws.window_count());
                    }
                }
            }
        }

        #[test]
        fn closing_every_window_empties_workspace(n in 1usize..=MAX_WINDOWS_PER_WORKSPACE, focus in 0usize..6) {
            let mut store = store_with(n);
            for _ in 0..focus {
                store.cycle_focus(FocusDirection::Next);
            }
            for _ in 0..n {
                prop_assert!(store.close_current_window().is_some());
            }
            prop_assert_eq!(store.active_workspace().window_count(), 0);
            prop_assert_eq!(store.active_workspace().focused_index(), 0);
        }

        #[test]
        fn focus_round_trips(n in 1usize..=MAX_WINDOWS_PER_WORKSPACE, start in 0usize..6, forward in any::<bool>()) {
            let mut store = store_with(n);
            for _ in 0..start {
                store.cycle_focus(FocusDirection::Next);
            }
            let original = store.active_workspace().focused_index();
            let direction = if forward { FocusDirection::Next } else { FocusDirection::Prev };
            for _ in 0..n {
                store.cycle_focus(direction);
            }
            prop_assert_eq!(store.active_workspace().focused_index(), original);
        }

        #[test]
        fn layout_round_trips(steps in 0usize..LAYOUT_COUNT) {
            let mut store = WorkspaceStore::default();
            for _ in 0..steps {
                store.cycle_layout();
            }
            let original = *store.active_workspace().layout();
            for _ in 0..LAYOUT_COUNT {
                store.cycle_layout();
            }
            prop_assert_eq!(store.active_workspace().layout(), &original);
        }
    }
}
