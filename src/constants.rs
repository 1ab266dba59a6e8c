pub const API_NAME: &str = "[car-registry]";

pub const CAR_NOT_FOUND: &str = "car not found";
pub const CAR_ALREADY_REGISTERED: &str = "car already registered";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_LIMIT: u32 = 5;
pub const MAX_PAGE_LIMIT: u32 = 10;

pub const MAX_CAR_ITEMS: usize = 5;
