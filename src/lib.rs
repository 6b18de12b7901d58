pub mod commands;
pub mod config;
pub mod transpiler;

pub use transpiler::{convert_with_options, convert_xml_to_compose, ConversionResult, ConvertOptions};
