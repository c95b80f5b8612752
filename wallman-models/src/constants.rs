// Constants for the wallman modules
// This file contains global constants used across the application

/// The default configuration file name for the application.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "wallman.toml";

/// Name of the fallback category that applications land in when their
/// category is deleted.
pub const DEFAULT_CATEGORY: &str = "Unknown";
/// Primary key of the seeded default category.
pub const DEFAULT_CATEGORY_ID: i32 = 1;

/// Category whose applications may be chosen as the wall screensaver.
pub const SCREENSAVER_CATEGORY: &str = "Screensaver";

/// Fixed primary key of the projector control row.
pub const PROJECTOR_CONTROL_ID: i32 = 1;
/// Fixed primary key of the screensaver control row.
pub const SCREENSAVER_CONTROL_ID: i32 = 1;

/// Subject line sent to an owner when staff removes their application.
pub const REMOVAL_SUBJECT: &str = "Application removed from the wall";

/// Upper bound of the star rating scale.
pub const STAR_SCALE: u8 = 5;

pub const BEARER_TOKEN: &str = "Bearer";

pub const DATA_DIR: &str = "./data";
pub const ASSET_DIR: &str = "./data/apps";
