pub mod config;
pub mod convert;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EngineConfig,
};
pub use convert::{
    detect_source_mime, derive_output_path, Category, ConversionRequest, ConversionResult,
    ConvertError, Dispatcher, EngineRunner, MimeType, MimeTypeError, ProcessRunner,
};
