//! Application-wide defaults.

/// Label applied to new quads until the user types another one.
pub const DEFAULT_LABEL: &str = "car";

/// Directory, next to the images, that holds the label files.
pub const DEFAULT_LABELS_DIR: &str = "labels";

/// Extension of label files.
pub const DEFAULT_LABEL_EXTENSION: &str = "txt";

/// Display scale at which click coordinates equal image pixels.
pub const DEFAULT_DISPLAY_SCALE: f64 = 1.0;

/// Maximum number of undone annotations kept for redo.
pub const DEFAULT_MAX_HISTORY: usize = 100;
