pub struct Config {
    pub api_base_url: &'static str,
    pub user_storage_key: &'static str,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            api_base_url: "/api",
            user_storage_key: "user",
        }
    }
}

pub const CONFIG: Config = Config::new();
