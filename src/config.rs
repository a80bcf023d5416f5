use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub profile: String,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional
        let _ = dotenvy::dotenv();

        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://bookstore.db?mode=rwc".to_string()
            } else {
                format!("sqlite://bookstore_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            profile,
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn default_database_url_follows_profile() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("SEED_DEMO_DATA");
            env::set_var("PROFILE", "staging");
        }
        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite://bookstore_staging.db?mode=rwc");
        assert!(!config.seed_demo_data);
        unsafe {
            env::remove_var("PROFILE");
        }
    }

    #[test]
    #[serial]
    fn explicit_database_url_wins() {
        unsafe {
            env::set_var("DATABASE_URL", "sqlite::memory:");
        }
        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite::memory:");
        unsafe {
            env::remove_var("DATABASE_URL");
        }
    }
}
