use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::bail;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::actor::wm_controller::WmCommand;
use crate::layout_engine::{
    DEFAULT_BORDER, DEFAULT_GAP, DEFAULT_TOP_BAR_HEIGHT, LayoutConfig, LayoutKind, LayoutPresets,
};
use crate::model::{MAX_TITLE_LEN, WORKSPACE_COUNT};
use crate::sys::framebuffer::Color;
use crate::sys::hotkey::Hotkey;

const MAX_GAP: u32 = 256;
const MAX_BORDER: u32 = 64;
const MAX_TOP_BAR_HEIGHT: u32 = 512;

pub fn config_file() -> Option<PathBuf> { dirs::home_dir().map(|home| home.join(".fbtile.toml")) }

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    layouts: LayoutSettings,
    #[serde(default = "default_keys")]
    keys: FxHashMap<String, WmCommand>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Config {
    pub settings: Settings,
    pub layouts: LayoutSettings,
    pub keys: Vec<(Hotkey, WmCommand)>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_top_bar_height")]
    pub top_bar_height: u32,
    #[serde(default = "default_layout")]
    pub default_layout: LayoutKind,
    /// Title given to windows opened with `new_window`.
    #[serde(default = "default_new_window_title")]
    pub new_window_title: String,
    #[serde(default)]
    pub colors: ColorSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct ColorSettings {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_background")]
    pub top_bar: Color,
    #[serde(default = "default_window")]
    pub window: Color,
    #[serde(default = "default_empty_desktop")]
    pub empty_desktop: Color,
}

/// One `[layouts.<kind>]` table per layout kind.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    #[serde(default)]
    pub horizontal: PresetSettings,
    #[serde(default)]
    pub vertical: PresetSettings,
    #[serde(default)]
    pub grid: PresetSettings,
    #[serde(default)]
    pub fullscreen: PresetSettings,
    #[serde(default = "PresetSettings::master_stack")]
    pub master_stack: PresetSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct PresetSettings {
    #[serde(default = "default_gap")]
    pub gap: u32,
    #[serde(default = "default_border")]
    pub border: u32,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    /// Percent of the screen width given to the master window. Unset means
    /// the built-in value for the layout kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_ratio: Option<u32>,
}

fn default_top_bar_height() -> u32 { DEFAULT_TOP_BAR_HEIGHT }

fn default_layout() -> LayoutKind { LayoutKind::Grid }

fn default_new_window_title() -> String { "template".to_string() }

fn default_background() -> Color { Color(0x1d2021) }

fn default_window() -> Color { Color(0x282828) }

fn default_empty_desktop() -> Color { Color(0x3c3836) }

fn default_gap() -> u32 { DEFAULT_GAP }

fn default_border() -> u32 { DEFAULT_BORDER }

fn default_border_color() -> Color { crate::layout_engine::engine::DEFAULT_BORDER_COLOR }

fn default_keys() -> FxHashMap<String, WmCommand> {
    [
        ("Alt + D", WmCommand::FocusNext),
        ("Alt + L", WmCommand::CycleLayout),
        ("Alt + Q", WmCommand::CloseWindow),
        ("Alt + W", WmCommand::NewWindow),
    ]
    .into_iter()
    .map(|(key, command)| (key.to_string(), command))
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_bar_height: default_top_bar_height(),
            default_layout: default_layout(),
            new_window_title: default_new_window_title(),
            colors: ColorSettings::default(),
        }
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: default_background(),
            top_bar: default_background(),
            window: default_window(),
            empty_desktop: default_empty_desktop(),
        }
    }
}

impl Default for PresetSettings {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            border: default_border(),
            border_color: default_border_color(),
            master_ratio: None,
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            horizontal: PresetSettings::default(),
            vertical: PresetSettings::default(),
            grid: PresetSettings::default(),
            fullscreen: PresetSettings::default(),
            master_stack: PresetSettings::master_stack(),
        }
    }
}

impl PresetSettings {
    fn master_stack() -> Self {
        Self {
            master_ratio: Some(LayoutConfig::preset(LayoutKind::MasterStack).master_ratio),
            ..Self::default()
        }
    }

    pub fn to_layout(&self, kind: LayoutKind) -> LayoutConfig {
        LayoutConfig {
            kind,
            gap: self.gap,
            border: self.border,
            border_color: self.border_color,
            master_ratio: self
                .master_ratio
                .unwrap_or_else(|| LayoutConfig::preset(kind).master_ratio),
        }
    }

    pub fn validate(&self, kind: LayoutKind) -> Vec<String> {
        let mut issues = Vec::new();
        let name = kind.name();

        if self.gap > MAX_GAP {
            issues.push(format!("layouts.{name}.gap must be at most {MAX_GAP}, got {}", self.gap));
        }
        if self.border == 0 || self.border > MAX_BORDER {
            issues.push(format!(
                "layouts.{name}.border must be between 1 and {MAX_BORDER}, got {}",
                self.border
            ));
        }
        if let Some(ratio) = self.master_ratio {
            if !(1..=99).contains(&ratio) {
                issues.push(format!(
                    "layouts.{name}.master_ratio must be between 1 and 99, got {ratio}"
                ));
            }
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.gap > MAX_GAP {
            self.gap = default_gap();
            fixes += 1;
        }
        if self.border == 0 || self.border > MAX_BORDER {
            self.border = default_border();
            fixes += 1;
        }
        if self.master_ratio.is_some_and(|ratio| !(1..=99).contains(&ratio)) {
            self.master_ratio = None;
            fixes += 1;
        }

        fixes
    }
}

impl LayoutSettings {
    fn each(&self) -> [(LayoutKind, &PresetSettings); 5] {
        [
            (LayoutKind::Horizontal, &self.horizontal),
            (LayoutKind::Vertical, &self.vertical),
            (LayoutKind::Grid, &self.grid),
            (LayoutKind::Fullscreen, &self.fullscreen),
            (LayoutKind::MasterStack, &self.master_stack),
        ]
    }

    /// Turns the tables into the whole-config presets workspaces cycle through.
    pub fn presets(&self) -> LayoutPresets {
        let mut presets = LayoutPresets::default();
        for (kind, settings) in self.each() {
            presets.set(settings.to_layout(kind));
        }
        presets
    }

    pub fn validate(&self) -> Vec<String> {
        self.each().into_iter().flat_map(|(kind, preset)| preset.validate(kind)).collect()
    }

    pub fn auto_fix_values(&mut self) -> usize {
        [
            &mut self.horizontal,
            &mut self.vertical,
            &mut self.grid,
            &mut self.fullscreen,
            &mut self.master_stack,
        ]
        .into_iter()
        .map(PresetSettings::auto_fix_values)
        .sum()
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.top_bar_height > MAX_TOP_BAR_HEIGHT {
            issues.push(format!(
                "top_bar_height must be at most {MAX_TOP_BAR_HEIGHT}, got {}",
                self.top_bar_height
            ));
        }
        if self.new_window_title.len() > MAX_TITLE_LEN {
            issues.push(format!(
                "new_window_title is {} bytes and will be truncated to {MAX_TITLE_LEN}",
                self.new_window_title.len()
            ));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.top_bar_height > MAX_TOP_BAR_HEIGHT {
            self.top_bar_height = default_top_bar_height();
            fixes += 1;
        }

        fixes
    }
}

fn targets_missing_workspace(command: &WmCommand) -> bool {
    matches!(command, WmCommand::SwitchToWorkspace(index) if *index >= WORKSPACE_COUNT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            layouts: LayoutSettings::default(),
            keys: Self::parse_keys(default_keys()).unwrap_or_default(),
        }
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        issues.extend(self.settings.validate());
        issues.extend(self.layouts.validate());

        for (hotkey, command) in &self.keys {
            if targets_missing_workspace(command) {
                issues.push(format!(
                    "key {hotkey} is bound to {command}, but only {WORKSPACE_COUNT} workspaces exist"
                ));
            }
        }

        issues
    }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        fixes += self.settings.auto_fix_values();
        fixes += self.layouts.auto_fix_values();

        let before = self.keys.len();
        self.keys.retain(|(_, command)| !targets_missing_workspace(command));
        fixes += before - self.keys.len();

        fixes
    }

    fn parse_keys(keys: FxHashMap<String, WmCommand>) -> anyhow::Result<Vec<(Hotkey, WmCommand)>> {
        let mut parsed = Vec::with_capacity(keys.len());
        for (key, command) in keys {
            let hotkey = match Hotkey::from_str(&key) {
                Ok(hotkey) => hotkey,
                Err(e) => bail!("Could not parse hotkey {key:?}: {e}"),
            };
            parsed.push((hotkey, command));
        }
        parsed.sort_by_key(|(hotkey, _)| (hotkey.key_code.scancode(), hotkey.modifiers.bits()));
        Ok(parsed)
    }

    fn parse(buf: &str) -> anyhow::Result<Config> {
        let c: ConfigFile = toml::from_str(buf)?;
        Ok(Config {
            settings: c.settings,
            layouts: c.layouts,
            keys: Self::parse_keys(c.keys)?,
        })
    }
}
