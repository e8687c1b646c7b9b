pub mod commons_list;
pub mod forms;

pub use commons_list::CommonsList;
