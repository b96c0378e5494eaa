pub mod crop_modal;
pub mod menu_bar;
pub mod output;
pub mod status;
