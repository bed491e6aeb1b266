pub mod check_page;
pub mod header;
pub mod landing;
pub mod main_page;
pub mod participant_editor;
pub mod receipt_detail;
pub mod settle_type_selector;
pub mod upload_area;
