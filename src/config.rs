use std::env;
use std::str::FromStr;
use std::time::Duration;

use actix_web::cookie::Key;
use chrono::{FixedOffset, Offset, Utc};

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Root of the membership backend, e.g. `http://localhost:5000`.
    pub api_base_url: String,
    session_key: Option<String>,
    pub cookie_secure: bool,
    pub razorpay_key: String,
    pub emailjs: EmailJsConfig,
    /// Offset whose calendar days attendance is counted in.
    pub attendance_offset: FixedOffset,
    pub login_max_attempts: usize,
    pub login_window: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct EmailJsConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
}

impl EmailJsConfig {
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }

        let offset_minutes: i32 = parse_or("ATTENDANCE_UTC_OFFSET_MINUTES", 0);
        let attendance_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                log::warn!("ATTENDANCE_UTC_OFFSET_MINUTES={offset_minutes} out of range, using UTC");
                utc()
            });

        Self {
            bind_addr: string_or("BIND_ADDR", "127.0.0.1:8080"),
            api_base_url: string_or("API_BASE_URL", "http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
            session_key: env::var("SESSION_KEY").ok(),
            cookie_secure: parse_or("COOKIE_SECURE", false),
            razorpay_key: string_or("RAZORPAY_KEY", ""),
            emailjs: EmailJsConfig {
                endpoint: string_or("EMAILJS_ENDPOINT", "https://api.emailjs.com/api/v1.0/email/send"),
                service_id: string_or("EMAILJS_SERVICE_ID", ""),
                template_id: string_or("EMAILJS_TEMPLATE_ID", ""),
                public_key: string_or("EMAILJS_PUBLIC_KEY", ""),
                to_email: string_or("CONTACT_TO_EMAIL", ""),
            },
            attendance_offset,
            login_max_attempts: parse_or("LOGIN_MAX_ATTEMPTS", 5),
            login_window: Duration::from_secs(parse_or("LOGIN_WINDOW_SECS", 900)),
        }
    }

    /// Cookie signing/encryption key. Without a 64+ byte `SESSION_KEY`,
    /// a random key is used and sessions do not survive a restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            api_base_url: "http://localhost:5000".to_string(),
            session_key: None,
            cookie_secure: false,
            razorpay_key: String::new(),
            emailjs: EmailJsConfig::default(),
            attendance_offset: utc(),
            login_max_attempts: 5,
            login_window: Duration::from_secs(900),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {key}={raw:?}, using {default:?}");
            default
        }),
        Err(_) => default,
    }
}
