pub mod generate;
pub mod init;
pub mod list_models;
pub mod validate_template;
