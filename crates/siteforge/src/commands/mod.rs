pub mod create;
pub mod delete;
pub mod golive;
pub mod list;
pub mod show;
pub mod stage;
pub mod unpublish;
