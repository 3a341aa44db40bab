//! Setting value validation.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

static RE_HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?)*$")
        .unwrap()
});

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "QR_STUDIO_HOST" => {
            if value.parse::<IpAddr>().is_err() && !RE_HOSTNAME.is_match(value) {
                return Err("must be an IP address or hostname".into());
            }
        }
        "QR_STUDIO_PORT" => validate_int_range(value, 1, 65535)?,
        "QR_STUDIO_LOG_LIMIT" => validate_int_range(value, 1, 1000)?,
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_accepts_ips_and_hostnames() {
        assert!(validate_setting("QR_STUDIO_HOST", "127.0.0.1").is_ok());
        assert!(validate_setting("QR_STUDIO_HOST", "::1").is_ok());
        assert!(validate_setting("QR_STUDIO_HOST", "localhost").is_ok());
        assert!(validate_setting("QR_STUDIO_HOST", "qr.example.com").is_ok());
    }

    #[test]
    fn host_rejects_garbage() {
        assert!(validate_setting("QR_STUDIO_HOST", "-bad-").is_err());
        assert!(validate_setting("QR_STUDIO_HOST", "two words").is_err());
    }

    #[test]
    fn port_range() {
        assert!(validate_setting("QR_STUDIO_PORT", "8080").is_ok());
        assert_eq!(
            validate_setting("QR_STUDIO_PORT", "0"),
            Err("must be between 1 and 65535".to_string())
        );
        assert_eq!(
            validate_setting("QR_STUDIO_PORT", "http"),
            Err("must be an integer".to_string())
        );
    }

    #[test]
    fn log_limit_range() {
        assert!(validate_setting("QR_STUDIO_LOG_LIMIT", "1000").is_ok());
        assert!(validate_setting("QR_STUDIO_LOG_LIMIT", "1001").is_err());
    }

    #[test]
    fn unknown_keys_pass() {
        assert!(validate_setting("RUST_LOG", "debug").is_ok());
    }
}
