use serde::{Deserialize, Serialize};

/// Which target mask overlay is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskDisplayMode {
    #[default]
    Off,
    /// Mask produced by the registration job.
    Registered,
    /// Mask loaded by the user.
    Custom,
}

/// Mask flags forwarded to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskQuery {
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<MaskDisplayMode>,
}

impl MaskQuery {
    pub const HIDDEN: Self = Self {
        visible: false,
        mode: None,
    };

    #[must_use]
    pub const fn plain(visible: bool) -> Self {
        Self {
            visible,
            mode: None,
        }
    }

    #[must_use]
    pub const fn with_mode(mode: MaskDisplayMode) -> Self {
        Self {
            visible: true,
            mode: Some(mode),
        }
    }
}

/// Target mask availability and the selected display mode.
///
/// Every mutation re-runs demotion, so `mode` is always one the target
/// currently supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetMaskState {
    mode: MaskDisplayMode,
    has_registered: bool,
    has_custom: bool,
}

impl TargetMaskState {
    #[must_use]
    pub fn mode(&self) -> MaskDisplayMode {
        self.mode
    }

    #[must_use]
    pub fn has_registered(&self) -> bool {
        self.has_registered
    }

    #[must_use]
    pub fn has_custom(&self) -> bool {
        self.has_custom
    }

    #[must_use]
    pub fn any_available(&self) -> bool {
        self.has_registered || self.has_custom
    }

    #[must_use]
    pub fn supports(&self, mode: MaskDisplayMode) -> bool {
        match mode {
            MaskDisplayMode::Off => true,
            MaskDisplayMode::Registered => self.has_registered,
            MaskDisplayMode::Custom => self.has_custom,
        }
    }

    /// Selects `mode` if the target supports it. Returns whether it was accepted.
    pub fn select(&mut self, mode: MaskDisplayMode) -> bool {
        if !self.supports(mode) {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn set_availability(&mut self, has_registered: bool, has_custom: bool) {
        self.has_registered = has_registered;
        self.has_custom = has_custom;
        self.demote();
    }

    pub fn set_registered_available(&mut self, available: bool) {
        self.set_availability(available, self.has_custom);
    }

    pub fn set_custom_available(&mut self, available: bool) {
        self.set_availability(self.has_registered, available);
    }

    /// A freshly loaded user mask becomes available and is shown.
    pub fn on_custom_mask_loaded(&mut self) {
        self.set_custom_available(true);
        self.mode = MaskDisplayMode::Custom;
    }

    /// A finished registration provides a mask, shown unless another is selected.
    pub fn on_registration_done(&mut self) {
        self.set_registered_available(true);
        if self.mode == MaskDisplayMode::Off {
            self.mode = MaskDisplayMode::Registered;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn demote(&mut self) {
        self.mode = match self.mode {
            MaskDisplayMode::Registered if !self.has_registered => {
                if self.has_custom {
                    MaskDisplayMode::Custom
                } else {
                    MaskDisplayMode::Off
                }
            }
            MaskDisplayMode::Custom if !self.has_custom => {
                if self.has_registered {
                    MaskDisplayMode::Registered
                } else {
                    MaskDisplayMode::Off
                }
            }
            mode => mode,
        };
    }

    /// Mask flags for the aligned, transformed and auto-synced target images.
    #[must_use]
    pub fn query(&self) -> MaskQuery {
        match self.mode {
            MaskDisplayMode::Off => MaskQuery::HIDDEN,
            mode if self.supports(mode) => MaskQuery::with_mode(mode),
            _ => MaskQuery::HIDDEN,
        }
    }

    /// Mask flags for the native-grid target in `original` view.
    ///
    /// Shows whatever mask exists, preferring the user's own, regardless of
    /// the selected mode.
    #[must_use]
    pub fn native_grid_query(&self) -> MaskQuery {
        if self.has_custom {
            MaskQuery::with_mode(MaskDisplayMode::Custom)
        } else if self.has_registered {
            MaskQuery::with_mode(MaskDisplayMode::Registered)
        } else {
            MaskQuery::HIDDEN
        }
    }
}
