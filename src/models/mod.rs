pub mod calendar;
pub mod entity;
pub mod record;
pub mod status;
