pub const UNRESOLVED_ENTRY: &str = "UNRESOLVED_ENTRY";
pub const UNRESOLVED_IMPORT: &str = "UNRESOLVED_IMPORT";
pub const LOAD_FAILED: &str = "LOAD_FAILED";
pub const SCAN_FAILED: &str = "SCAN_FAILED";
pub const TRANSFORM_FAILED: &str = "TRANSFORM_FAILED";
pub const RULE_CONFLICT: &str = "RULE_CONFLICT";
pub const MODULE_TIMEOUT: &str = "MODULE_TIMEOUT";
pub const ABORTED: &str = "ABORTED";
pub const INVALID_OPTION: &str = "INVALID_OPTION";
pub const EMIT_FAILED: &str = "EMIT_FAILED";
