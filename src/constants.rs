/// Shared constants for the grouping engine and its shell

/// Separator between a headline event name and its qualifier segments
pub const NAME_SEPARATOR: &str = "||";

/// Fallback start date for records whose dates cannot be parsed
pub const FAR_FUTURE_DATE: &str = "2999-12-31";

/// Fallback end date for records whose dates cannot be parsed
pub const FAR_PAST_DATE: &str = "1970-01-01";

/// Upper bound for the recency and adjacency windows, in days
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// UTC offset (+09:00) used whenever a location cannot be resolved
pub const JAPAN_OFFSET_SECONDS: i32 = 9 * 3600;
pub const JAPAN_TIMEZONE: &str = "Asia/Tokyo";

/// Bracket pairs that a merged display name must never cut through
pub const BRACKET_PAIRS: [(char, char); 5] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('【', '】'),
    ('“', '”'),
];

/// Marker used by sources to join collaborating headliners ("A × B")
pub const COLLABORATION_MARKER: char = '×';

// Default config locations
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_DIRECTIVE: &str = "gig_grouper=info";
pub const LOG_FILE_PREFIX: &str = "grouper.log";

// Environment overrides
pub const CONFIG_PATH_ENV: &str = "GIG_GROUPER_CONFIG";
pub const OUTPUT_DIR_ENV: &str = "GIG_GROUPER_OUTPUT_DIR";
pub const METRICS_PORT_ENV: &str = "GIG_METRICS_PORT";
