/// Time dimension of a record, a calendar year.
pub type Period = i32;
