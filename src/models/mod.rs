pub mod car;
pub mod car_item;

pub use car::{Car, CarFilter, CarPage, CarPatch, CarPayload, CarWithItems, NewCar};
pub use car_item::CarItem;
