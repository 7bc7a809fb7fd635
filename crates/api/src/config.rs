/// Server configuration loaded from environment variables.
///
/// All fields except the monitor secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Threshold monitor settings (trigger secret, cooldown, cap, schedule).
    pub monitor: MonitorSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let monitor = MonitorSettings::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            monitor,
        }
    }
}

/// Threshold monitor settings.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Shared secret the trigger endpoint requires as `?key=`.
    pub secret: String,
    /// Cooldown window in hours; zero or negative disables the window.
    pub window_hours: i64,
    /// Run-wide cap on sent emails.
    pub max_emails_per_run: u32,
    /// In-process schedule interval in seconds; zero disables the schedule
    /// (an external scheduler hits the trigger endpoint instead).
    pub interval_secs: u64,
}

impl MonitorSettings {
    /// Load monitor settings from environment variables.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `MONITOR_SECRET`        | —       |
    /// | `MONITOR_WINDOW_HOURS`  | `24`    |
    /// | `MONITOR_MAX_EMAILS`    | `1000`  |
    /// | `MONITOR_INTERVAL_SECS` | `0`     |
    pub fn from_env() -> Self {
        let secret = std::env::var("MONITOR_SECRET").expect("MONITOR_SECRET must be set");

        let window_hours: i64 = std::env::var("MONITOR_WINDOW_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("MONITOR_WINDOW_HOURS must be a valid i64");

        let max_emails_per_run: u32 = std::env::var("MONITOR_MAX_EMAILS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("MONITOR_MAX_EMAILS must be a valid u32");

        let interval_secs: u64 = std::env::var("MONITOR_INTERVAL_SECS")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("MONITOR_INTERVAL_SECS must be a valid u64");

        Self {
            secret,
            window_hours,
            max_emails_per_run,
            interval_secs,
        }
    }
}
