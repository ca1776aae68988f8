use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_legato_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LEGATO_CONFIG_PATH", "/tmp/legato-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/legato-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("legato")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("legato")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.playback.default_rate, 1.0);
    assert!(s.playback.smart_rewind);
    assert_eq!(s.playback.smart_rewind_after_secs, 600);
    assert_eq!(s.playback.smart_rewind_by_secs, 30);
}

#[test]
fn validate_rejects_non_positive_default_rate() {
    let mut s = Settings::default();
    s.playback.default_rate = 0.0;
    assert!(s.validate().is_err());

    s.playback.default_rate = f32::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn env_overrides_nested_settings() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LEGATO_CONFIG_PATH", "/nonexistent/legato-config.toml");
    let _g2 = EnvGuard::set("LEGATO__PLAYBACK__SMART_REWIND_BY_SECS", "45");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.smart_rewind_by_secs, 45);
}
