pub mod export_service;
pub mod grouping;
pub mod header_matcher;
pub mod import_service;
pub mod layout;
pub mod selection;
pub mod sheet_loader;
