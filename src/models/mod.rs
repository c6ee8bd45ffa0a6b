pub mod medicine;
pub mod patient;
pub mod treatment;

pub use medicine::Medicine;
pub use patient::Patient;
pub use treatment::Treatment;
