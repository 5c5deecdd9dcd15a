#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub database: Database,
    pub telegram: Telegram,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Telegram {
    pub bot_token: String,
}
