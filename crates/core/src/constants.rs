/// Suffix appended to the name of a duplicated trip.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Decimal precision for monetary display.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Length of generated share-link slugs.
pub const SHARE_SLUG_LENGTH: usize = 12;

/// Default page size for catalog search.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Maximum page size for catalog search.
pub const MAX_PAGE_SIZE: i64 = 100;
