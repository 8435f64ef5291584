use serde::{Deserialize, Serialize};

/// Geometric relationship used to pick and display the target slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Target cursor follows the source cursor's physical position.
    #[default]
    Auto,
    /// Target shown on its native grid.
    Original,
    /// Target shown under the user's manual transform.
    Manual,
}

/// Orientation the aligned target is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayDirection {
    #[default]
    Normal,
    Reverse,
}

impl DisplayDirection {
    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }
}

/// Direction requested from the registration collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationDirection {
    #[default]
    Normal,
    Reverse,
    /// Let the collaborator pick; the job reports the direction it used.
    Auto,
}

impl RegistrationDirection {
    /// Display direction implied by an explicit request, `None` for `Auto`.
    #[must_use]
    pub fn display_direction(self) -> Option<DisplayDirection> {
        match self {
            Self::Normal => Some(DisplayDirection::Normal),
            Self::Reverse => Some(DisplayDirection::Reverse),
            Self::Auto => None,
        }
    }
}
