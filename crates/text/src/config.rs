//! Line-break configuration
//!
//! Conversions take their line-break style through [`RenderOptions`]; a
//! process-wide default exists for callers that expect to configure the
//! style once and convert everywhere.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide default; `false` selects CRLF
static UNIX_LINE_BREAKS: AtomicBool = AtomicBool::new(false);

/// Switch the process-wide default line-break style: `true` for Unix
/// (`"\n"`), `false` for Windows (`"\r\n"`, the default).
///
/// Takes effect for conversions started afterwards. Last writer wins; a
/// conversion already in flight keeps the style it started with.
pub fn set_unix_line_breaks(enabled: bool) {
    UNIX_LINE_BREAKS.store(enabled, Ordering::Relaxed);
}

/// Line terminator written when a separator is flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreakStyle {
    /// Carriage return + line feed (`"\r\n"`)
    #[default]
    Crlf,
    /// Line feed only (`"\n"`)
    Lf,
}

impl LineBreakStyle {
    /// The terminator characters for this style
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }

    /// The current process-wide default
    pub(crate) fn global_default() -> Self {
        if UNIX_LINE_BREAKS.load(Ordering::Relaxed) {
            Self::Lf
        } else {
            Self::Crlf
        }
    }
}

/// Per-call rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Line terminator used for flushed separators
    pub line_breaks: LineBreakStyle,
}
