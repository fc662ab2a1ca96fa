mod course;
mod elective;
mod error;
mod interaction;
mod review;
mod user;
mod wire;

pub use course::{parse_course_id, Course, Difficulty};
pub use elective::{Basket, BasketSubject, Elective, ElectivesCatalog, Evaluation};
pub use error::CatalogError;
pub use interaction::{EventType, Interaction};
pub use review::{validate_rating, BundledReview, NewReview, RatingSummary, Review};
pub use user::User;
pub use wire::{flag as deserialize_flag, id as deserialize_id};
