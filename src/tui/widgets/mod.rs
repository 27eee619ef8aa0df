pub mod client_list;
pub mod color;
pub mod confirm_delete;
pub mod dashboard;
pub mod filters_box;
pub mod form;
pub mod help;
pub mod input;
pub mod item_view;
pub mod list;
pub mod reminder_list;
pub mod schedule_list;
pub mod service_list;
pub mod status_bar;
pub mod tabs;
