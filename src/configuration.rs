use serde_aux::field_attributes::deserialize_number_from_string;

pub const CONFIG_FILE: &str = "config.txt";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub api_key: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub limit: usize,
    pub smtp_server: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(
        default = "default_port",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::new(CONFIG_FILE, config::FileFormat::Ini))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?;

    settings.try_deserialize::<Settings>()
}
