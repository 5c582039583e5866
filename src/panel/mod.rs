pub mod controller;
pub mod draft;
pub mod duration_field;
pub mod registry;
pub mod view;
