use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

bitflags! {
    /// Modifier mask as delivered by the host keyboard driver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const ALT = 0b0001;
        const CONTROL = 0b0010;
        const SHIFT = 0b0100;
        const META = 0b1000;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.contains(Modifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.contains(Modifiers::ALT) {
            parts.push("Alt");
        }
        if self.contains(Modifiers::SHIFT) {
            parts.push("Shift");
        }
        if self.contains(Modifiers::META) {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join(" + "))
    }
}

/// PC scancode set 1 make codes for the keys we can bind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum KeyCode {
    Escape = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    Digit8 = 0x09,
    Digit9 = 0x0A,
    Digit0 = 0x0B,
    Minus = 0x0C,
    Equal = 0x0D,
    Backspace = 0x0E,
    Tab = 0x0F,
    KeyQ = 0x10,
    KeyW = 0x11,
    KeyE = 0x12,
    KeyR = 0x13,
    KeyT = 0x14,
    KeyY = 0x15,
    KeyU = 0x16,
    KeyI = 0x17,
    KeyO = 0x18,
    KeyP = 0x19,
    BracketLeft = 0x1A,
    BracketRight = 0x1B,
    Enter = 0x1C,
    KeyA = 0x1E,
    KeyS = 0x1F,
    KeyD = 0x20,
    KeyF = 0x21,
    KeyG = 0x22,
    KeyH = 0x23,
    KeyJ = 0x24,
    KeyK = 0x25,
    KeyL = 0x26,
    Semicolon = 0x27,
    Quote = 0x28,
    Backquote = 0x29,
    Backslash = 0x2B,
    KeyZ = 0x2C,
    KeyX = 0x2D,
    KeyC = 0x2E,
    KeyV = 0x2F,
    KeyB = 0x30,
    KeyN = 0x31,
    KeyM = 0x32,
    Comma = 0x33,
    Period = 0x34,
    Slash = 0x35,
    Space = 0x39,
}

impl KeyCode {
    pub fn scancode(self) -> u8 { self.into() }

    pub fn from_scancode(code: u8) -> Option<Self> { Self::try_from(code).ok() }

    fn from_token(token: &str) -> Option<Self> {
        use KeyCode::*;
        let key = match token.to_uppercase().as_str() {
            "A" => KeyA,
            "B" => KeyB,
            "C" => KeyC,
            "D" => KeyD,
            "E" => KeyE,
            "F" => KeyF,
            "G" => KeyG,
            "H" => KeyH,
            "I" => KeyI,
            "J" => KeyJ,
            "K" => KeyK,
            "L" => KeyL,
            "M" => KeyM,
            "N" => KeyN,
            "O" => KeyO,
            "P" => KeyP,
            "Q" => KeyQ,
            "R" => KeyR,
            "S" => KeyS,
            "T" => KeyT,
            "U" => KeyU,
            "V" => KeyV,
            "W" => KeyW,
            "X" => KeyX,
            "Y" => KeyY,
            "Z" => KeyZ,
            "0" => Digit0,
            "1" => Digit1,
            "2" => Digit2,
            "3" => Digit3,
            "4" => Digit4,
            "5" => Digit5,
            "6" => Digit6,
            "7" => Digit7,
            "8" => Digit8,
            "9" => Digit9,
            "TAB" => Tab,
            "SPACE" => Space,
            "ENTER" | "RETURN" => Enter,
            "ESC" | "ESCAPE" => Escape,
            "BACKSPACE" => Backspace,
            "-" | "MINUS" => Minus,
            "=" | "EQUAL" => Equal,
            "[" => BracketLeft,
            "]" => BracketRight,
            ";" | "SEMICOLON" => Semicolon,
            "'" | "QUOTE" => Quote,
            "`" | "BACKQUOTE" => Backquote,
            "\\" | "BACKSLASH" => Backslash,
            "," | "COMMA" => Comma,
            "." | "PERIOD" => Period,
            "/" | "SLASH" => Slash,
            _ => {
                // Raw scancodes, e.g. "0x20".
                let hex = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X"))?;
                return u8::from_str_radix(hex, 16).ok().and_then(Self::from_scancode);
            }
        };
        Some(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use KeyCode::*;
        let s = match self {
            KeyA => "A",
            KeyB => "B",
            KeyC => "C",
            KeyD => "D",
            KeyE => "E",
            KeyF => "F",
            KeyG => "G",
            KeyH => "H",
            KeyI => "I",
            KeyJ => "J",
            KeyK => "K",
            KeyL => "L",
            KeyM => "M",
            KeyN => "N",
            KeyO => "O",
            KeyP => "P",
            KeyQ => "Q",
            KeyR => "R",
            KeyS => "S",
            KeyT => "T",
            KeyU => "U",
            KeyV => "V",
            KeyW => "W",
            KeyX => "X",
            KeyY => "Y",
            KeyZ => "Z",
            Digit0 => "0",
            Digit1 => "1",
            Digit2 => "2",
            Digit3 => "3",
            Digit4 => "4",
            Digit5 => "5",
            Digit6 => "6",
            Digit7 => "7",
            Digit8 => "8",
            Digit9 => "9",
            Tab => "Tab",
            Space => "Space",
            Enter => "Enter",
            Escape => "Escape",
            Backspace => "Backspace",
            Minus => "-",
            Equal => "=",
            BracketLeft => "[",
            BracketRight => "]",
            Semicolon => ";",
            Quote => "'",
            Backquote => "`",
            Backslash => "\\",
            Comma => ",",
            Period => ".",
            Slash => "/",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HotkeyParseError {
    #[error("no key specified in hotkey {0:?}")]
    MissingKey(String),
    #[error("unrecognized key token {0:?}")]
    UnknownKey(String),
    #[error("hotkey {0:?} names more than one key")]
    MultipleKeys(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key_code: KeyCode,
}

impl Hotkey {
    pub fn new(modifiers: Modifiers, key_code: KeyCode) -> Self { Self { modifiers, key_code } }

    /// Builds a hotkey from the raw values the host keyboard driver reports.
    /// Unknown scancodes and undefined modifier bits yield `None`.
    pub fn from_raw(scancode: u8, modifier_mask: u8) -> Option<Self> {
        let key_code = KeyCode::from_scancode(scancode)?;
        let modifiers = Modifiers::from_bits(modifier_mask)?;
        Some(Self::new(modifiers, key_code))
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key_code)
        } else {
            write!(f, "{} + {}", self.modifiers, self.key_code)
        }
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = Modifiers::empty();
        let mut key_opt: Option<KeyCode> = None;

        for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "alt" | "option" => mods.insert(Modifiers::ALT),
                "ctrl" | "control" => mods.insert(Modifiers::CONTROL),
                "shift" => mods.insert(Modifiers::SHIFT),
                "meta" | "super" | "win" => mods.insert(Modifiers::META),
                _ => {
                    let code = KeyCode::from_token(part)
                        .ok_or_else(|| HotkeyParseError::UnknownKey(part.to_string()))?;
                    if key_opt.replace(code).is_some() {
                        return Err(HotkeyParseError::MultipleKeys(s.to_string()));
                    }
                }
            }
        }

        let key_code = key_opt.ok_or_else(|| HotkeyParseError::MissingKey(s.to_string()))?;
        Ok(Hotkey::new(mods, key_code))
    }
}

impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Hotkey, D::Error>
    where D: serde::Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        Hotkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
