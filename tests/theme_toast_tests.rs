// tests/theme_toast_tests.rs

use std::sync::Arc;

use chrono::{Duration, Utc};
use learnity::theme::{FileSettings, MemorySettings, SettingsStore, ThemeManager};
use learnity::toast::{ToastCenter, ToastKind};

fn temp_settings_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("learnity_settings_{}.json", uuid::Uuid::new_v4()))
}

#[test]
fn theme_defaults_to_light() {
    let storage = Arc::new(MemorySettings::new());
    let mut theme = ThemeManager::new(storage);
    theme.load();

    assert!(!theme.is_dark_mode());
}

#[test]
fn theme_round_trips_through_the_settings_file() {
    // Arrange
    let path = temp_settings_path();
    let storage = Arc::new(FileSettings::new(path.clone()));

    // Act: flip to dark and persist
    let mut theme = ThemeManager::new(storage);
    theme.set_dark_mode(true).expect("persist failed");

    // Assert: a fresh manager over the same file loads dark mode
    let mut reloaded = ThemeManager::new(Arc::new(FileSettings::new(path.clone())));
    reloaded.load();
    assert!(reloaded.is_dark_mode());

    // The flag is stored as a JSON-serialized boolean
    let raw = FileSettings::new(path.clone()).get("isDarkMode");
    assert_eq!(raw.as_deref(), Some("true"));

    std::fs::remove_file(path).ok();
}

#[test]
fn set_light_mode_persists_false() {
    let path = temp_settings_path();
    let mut theme = ThemeManager::new(Arc::new(FileSettings::new(path.clone())));
    theme.set_dark_mode(true).unwrap();

    theme.set_light_mode().unwrap();

    let mut reloaded = ThemeManager::new(Arc::new(FileSettings::new(path.clone())));
    reloaded.load();
    assert!(!reloaded.is_dark_mode());

    std::fs::remove_file(path).ok();
}

#[test]
fn corrupt_settings_fall_back_to_light_mode() {
    let path = temp_settings_path();
    std::fs::write(&path, "not json at all").unwrap();

    let mut theme = ThemeManager::new(Arc::new(FileSettings::new(path.clone())));
    theme.load();

    assert!(!theme.is_dark_mode());
    std::fs::remove_file(path).ok();
}

#[test]
fn toasts_expire_after_their_lifetime() {
    // Arrange
    let toasts = ToastCenter::new();
    toasts.success("Đăng ký thành công");
    toasts.error("Đăng nhập thất bại");

    // Assert: both visible now, kinds preserved
    let now = Utc::now();
    let active = toasts.active(now);
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].kind, ToastKind::Success);
    assert_eq!(active[1].kind, ToastKind::Error);
    assert_eq!(active[0].message, "Đăng ký thành công");

    // Four seconds later everything is gone
    let later = now + Duration::seconds(4);
    assert!(toasts.active(later).is_empty());

    // And pruning is permanent
    assert!(toasts.active(now).is_empty());
}
