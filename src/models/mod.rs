pub mod due_date;
pub mod duration;
pub mod submission;
pub mod tier;
