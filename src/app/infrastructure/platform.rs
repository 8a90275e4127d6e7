use crate::app::domain::settings::ThemeMode;

/// Decide whether the shell should start dark, honouring an explicit choice
/// and asking the desktop only for `SystemDefault`.
pub fn resolve_dark_mode(mode: ThemeMode) -> bool {
    match mode {
        ThemeMode::Dark => true,
        ThemeMode::Light => false,
        ThemeMode::SystemDefault => detect_system_dark_mode(),
    }
}

pub fn detect_system_dark_mode() -> bool {
    let dark = platform_prefers_dark().unwrap_or(false);
    log::debug!("system dark mode detected: {dark}");
    dark
}

#[cfg(target_os = "windows")]
fn platform_prefers_dark() -> Option<bool> {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let key = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .ok()?;
    // AppsUseLightTheme: 0 = dark mode, 1 = light mode
    let value = key.get_value::<u32, _>("AppsUseLightTheme").ok()?;
    Some(value == 0)
}

#[cfg(target_os = "linux")]
fn platform_prefers_dark() -> Option<bool> {
    let theme = gsettings_value("gtk-theme").unwrap_or_default();
    if theme.to_lowercase().contains("dark") {
        return Some(true);
    }
    let scheme = gsettings_value("color-scheme")?;
    Some(scheme.contains("prefer-dark"))
}

#[cfg(target_os = "linux")]
fn gsettings_value(key: &str) -> Option<String> {
    let output = std::process::Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", key])
        .output()
        .ok()?;
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(target_os = "macos")]
fn platform_prefers_dark() -> Option<bool> {
    let output = std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    if !output.status.success() {
        // The key is absent in light mode
        return Some(false);
    }
    let style = String::from_utf8_lossy(&output.stdout).to_lowercase();
    Some(style.contains("dark"))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn platform_prefers_dark() -> Option<bool> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes_skip_detection() {
        assert!(resolve_dark_mode(ThemeMode::Dark));
        assert!(!resolve_dark_mode(ThemeMode::Light));
    }
}
