use envcfg_config::{Field, ObjectSchema, TypedSchema};
use serde::{Deserialize, Serialize};

/// HOST (required), PORT (default 3000), DEBUG (default false),
/// LOG_LEVEL (optional enum).
pub fn server_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("HOST", Field::string())
        .field("PORT", Field::integer().default(3000))
        .field("DEBUG", Field::boolean().default(false))
        .field(
            "LOG_LEVEL",
            Field::enumeration(["debug", "info", "warn", "error"]).optional(),
        )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ServerConfig {
    pub host: String,
    pub port: i64,
    pub debug: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

pub fn typed_server_schema() -> TypedSchema<ServerConfig> {
    server_schema().typed()
}
