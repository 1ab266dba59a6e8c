pub mod car_item_service;
pub mod car_service;
pub mod pagination;

pub use car_item_service::CarItemService;
pub use car_service::CarService;
pub use pagination::Pagination;
