/// The synthetic category that matches every entry. Always shown first.
pub const ALL_CATEGORY: &str = "All";

/// The category used when a custom category is requested but left blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The categories that are always offered, whether or not any entry uses them.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Action",
    "Comedy",
    "Drama",
    "Sci-Fi",
    "Horror",
    "Documentary",
    "Animation",
    "Sports",
    "News",
];
