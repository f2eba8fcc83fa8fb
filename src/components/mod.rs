pub mod letter_preview;
pub mod modification_form;
pub mod resume_picker;
pub mod sidebar;
pub mod version_info;
