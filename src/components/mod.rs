pub mod app;
pub mod page_view;
pub mod swipe_meter;
