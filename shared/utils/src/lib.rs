pub mod config;
pub mod logging;
pub mod error;
pub mod bom;

pub use self::config::*;
pub use logging::*;
pub use error::*;
pub use bom::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading() {
        let config = AppConfig::default();
        assert_eq!(config.bom.column, "Supplier Part");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_error_handling() {
        let error = BomError::MissingInput;
        assert_eq!(error.error_code(), "MISSING_INPUT");
        assert_eq!(BomError::file_not_found("bom.csv").error_code(), "FILE_NOT_FOUND");
    }
}
