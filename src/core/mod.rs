pub mod calendar;
pub mod filter;
pub mod kanban;
pub mod project;
pub mod stats;
pub mod sticky_note;
pub mod task;
pub mod team;
