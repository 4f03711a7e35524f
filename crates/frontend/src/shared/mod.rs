pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod document_lines;
pub mod form_utils;
pub mod icons;
pub mod modal_frame;
pub mod modal_stack;
pub mod notifications;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod reference;
