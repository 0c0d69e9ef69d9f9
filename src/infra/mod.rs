pub mod docx;
pub mod fs;
pub mod import;
