pub mod choices;
pub mod contact;
pub mod course;
pub mod ids;

pub use contact::{Contact, ContactDraft};
pub use course::Course;
pub use ids::ContactId;
