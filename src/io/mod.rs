//! Annotation file loading.

pub mod page_xml;

pub use page_xml::{load_page, parse_page};
