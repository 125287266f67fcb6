//! Output verbosity modes.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including per-candidate probe detail.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (final status only).
    Quiet,
}

impl OutputMode {
    /// Whether spinners should be shown.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether regular status messages should be shown.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
