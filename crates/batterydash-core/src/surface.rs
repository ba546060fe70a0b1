//! Rendering surface abstraction.
//!
//! The dashboard never draws anything itself. It writes text into named
//! targets and sets style properties on named elements; a front end decides
//! how those end up on screen.

use std::collections::HashMap;

/// Something the field renderer can write into
pub trait Surface {
    /// Replace the text content of `target`
    fn set_text(&mut self, target: &str, text: String);

    /// Set a style property (e.g. `--health-percent`) on `target`
    fn set_style_property(&mut self, target: &str, property: &str, value: String);
}

/// In-memory surface. Front ends read the rendered strings back out of it.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    texts: HashMap<String, String>,
    styles: HashMap<(String, String), String>,
    writes: u64,
}

impl MemorySurface {
    /// Create an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of `target`, if it has ever been written
    pub fn text(&self, target: &str) -> Option<&str> {
        self.texts.get(target).map(String::as_str)
    }

    /// Current value of a style property
    pub fn style_property(&self, target: &str, property: &str) -> Option<&str> {
        self.styles
            .get(&(target.to_string(), property.to_string()))
            .map(String::as_str)
    }

    /// Total number of writes received
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl Surface for MemorySurface {
    fn set_text(&mut self, target: &str, text: String) {
        self.texts.insert(target.to_string(), text);
        self.writes += 1;
    }

    fn set_style_property(&mut self, target: &str, property: &str, value: String) {
        self.styles
            .insert((target.to_string(), property.to_string()), value);
        self.writes += 1;
    }
}
