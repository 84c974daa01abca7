use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusDirection {
    Next,
    Prev,
}

/// The geometry policy a workspace tiles its windows with. Declaration order
/// is the cycling order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumCount,
    EnumIter,
    IntoStaticStr
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutKind {
    Horizontal,
    Vertical,
    Grid,
    Fullscreen,
    MasterStack,
}

pub const LAYOUT_COUNT: usize = LayoutKind::COUNT;

impl LayoutKind {
    pub(crate) fn index(self) -> usize { self as usize }

    pub(crate) fn from_index(index: usize) -> Self {
        use LayoutKind::*;
        match index % LAYOUT_COUNT {
            0 => Horizontal,
            1 => Vertical,
            2 => Grid,
            3 => Fullscreen,
            _ => MasterStack,
        }
    }

    pub fn next(self) -> Self { Self::from_index(self.index() + 1) }

    pub fn prev(self) -> Self { Self::from_index(self.index() + LAYOUT_COUNT - 1) }

    pub fn name(self) -> &'static str { self.into() }

    /// Whether windows in this layout intentionally share the same rectangle.
    pub fn overlaps(self) -> bool { matches!(self, LayoutKind::Fullscreen) }
}
