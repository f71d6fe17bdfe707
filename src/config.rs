//! Runtime options for a single detection pass.
//!
//! This is a plain option record, not a loader: the core imposes no CLI,
//! environment, or on-disk configuration format. Whoever embeds this crate
//! (a CLI, a service, a test) owns reading its own configuration and
//! constructing a `RedactConfig` from it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameDetectionMode {
    /// Pattern/dictionary detectors only.
    Rules,
    /// The pluggable NER detector only.
    Ml,
    /// Both, resolved by the normal conflict resolver.
    Hybrid,
}

#[derive(Debug, Clone)]
pub struct RedactConfig {
    pub name_detection_mode: NameDetectionMode,
    /// Whether the ML name detector is consulted at all. A `Hybrid` or
    /// `Ml` mode with this set to `false` behaves like `Rules`.
    pub gliner_enabled: bool,
    /// Width, in characters, of the window the context analyzer samples
    /// around a candidate span when scoring clinical-context strength.
    pub context_window_chars: u32,
    /// Spans scoring below this confidence are dropped before the
    /// resolver ever sees them.
    pub min_confidence: f64,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            name_detection_mode: NameDetectionMode::Hybrid,
            gliner_enabled: false,
            context_window_chars: 100,
            min_confidence: 0.5,
        }
    }
}
