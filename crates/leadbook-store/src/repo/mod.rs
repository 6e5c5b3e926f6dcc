pub mod contacts;

pub use contacts::{ChoiceColumn, ContactsRepo};
