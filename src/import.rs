pub mod xlsx;
pub use xlsx::{read_first_sheet, Sheet};
