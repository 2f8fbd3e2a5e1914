//! Color-aware styling on top of `console`
//!
//! Provides semantic styles and symbols. Whether ANSI codes are emitted is
//! decided once, from the resolved [`ColorIntent`].

use crate::primitives::ColorIntent;
use console::Style;

const CHECKMARK: &str = "✓";
const CROSS: &str = "✗";
const WARNING_SYMBOL: &str = "!";
const ARROW: &str = "->";
const BULLET: &str = "•";

/// Semantic styles for report output
#[derive(Debug, Clone)]
pub struct StyleManager {
    enabled: bool,
    success: Style,
    error: Style,
    warning: Style,
    info: Style,
    emphasis: Style,
    subtle: Style,
}

impl StyleManager {
    pub fn new(intent: ColorIntent) -> Self {
        Self::with_colors(intent.resolve())
    }

    /// Styles with ANSI output forced on or off
    pub fn with_colors(enabled: bool) -> Self {
        let base = Style::new().force_styling(enabled);
        Self {
            enabled,
            success: base.clone().green(),
            error: base.clone().red(),
            warning: base.clone().yellow(),
            info: base.clone().cyan(),
            emphasis: base.clone().bold(),
            subtle: base.dim(),
        }
    }

    /// No colors at all, used for tests and piped output
    pub fn plain() -> Self {
        Self::with_colors(false)
    }

    pub fn colors_enabled(&self) -> bool {
        self.enabled
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.success.apply_to(text).to_string()
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.error.apply_to(text).to_string()
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.warning.apply_to(text).to_string()
    }

    /// Style text with semantic info intent
    pub fn style_info(&self, text: &str) -> String {
        self.info.apply_to(text).to_string()
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.emphasis.apply_to(text).to_string()
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.subtle.apply_to(text).to_string()
    }

    /// `✓ message` in success color
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(CHECKMARK), message)
    }

    /// `✗ message` in error color
    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(CROSS), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(WARNING_SYMBOL), message)
    }

    pub fn bullet(&self) -> &'static str {
        BULLET
    }

    /// Join names as a chain: `P1 -> P2 -> P0`
    pub fn chain(&self, names: &[String]) -> String {
        names.join(&format!(" {ARROW} "))
    }
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::new(ColorIntent::Auto)
    }
}

#[cfg(test)]
mod tests {
    include!("styling.test.rs");
}
