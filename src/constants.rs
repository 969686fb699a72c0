//! Common constants used throughout pomgen.

/// Supported settings file names, tried in order.
pub const CONFIG_FILES: [&str; 3] = ["pomgen.json", "pomgen.yml", "pomgen.yaml"];

/// Pattern for a well-formed placeholder name.
pub const PLACEHOLDER_NAME: &str = r"[A-Za-z_][A-Za-z0-9_.\-]*";

/// Opening delimiter of a placeholder.
pub const PLACEHOLDER_OPEN: &str = "{{";

/// Closing delimiter of a placeholder.
pub const PLACEHOLDER_CLOSE: &str = "}}";

/// Variant id used by local-build targets that defer variant selection to build profiles.
pub const PROFILES_VARIANT: &str = "profiles";
