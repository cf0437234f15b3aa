pub mod entity;
pub mod repository;
pub mod timer;
pub mod widget;
