use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Mutex;
use tauri::{AppHandle, Manager};

use crate::models::CommandError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub theme: String,
    pub language: String,
    pub register_association_on_launch: bool,
    pub reopen_last_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        #[cfg(target_os = "windows")]
        let (theme, language) = {
            use windows::core::PCWSTR;
            use windows::Win32::System::Registry::{
                RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_CURRENT_USER, KEY_READ,
            };

            // Personalize\AppsUseLightTheme: 1 = light, 0 = dark
            let mut apps_use_light = 0u32;
            let mut data_len = std::mem::size_of::<u32>() as u32;
            let theme = unsafe {
                let subkey: Vec<u16> =
                    "Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize\0"
                        .encode_utf16()
                        .collect();
                let value_name: Vec<u16> = "AppsUseLightTheme\0".encode_utf16().collect();
                let mut hkey = HKEY::default();

                if RegOpenKeyExW(
                    HKEY_CURRENT_USER,
                    PCWSTR(subkey.as_ptr()),
                    Some(0),
                    KEY_READ,
                    &mut hkey,
                )
                .is_ok()
                {
                    let read = RegQueryValueExW(
                        hkey,
                        PCWSTR(value_name.as_ptr()),
                        None,
                        None,
                        Some(&mut apps_use_light as *mut u32 as *mut u8),
                        Some(&mut data_len),
                    )
                    .is_ok();
                    let _ = RegCloseKey(hkey);

                    if read && apps_use_light == 1 {
                        "light".to_string()
                    } else {
                        "dark".to_string()
                    }
                } else {
                    "dark".to_string()
                }
            };

            let language = unsafe {
                let lang = windows::Win32::Globalization::GetUserDefaultUILanguage();
                if lang == 0x040c {
                    "fr".to_string()
                } else {
                    "en".to_string()
                }
            };

            (theme, language)
        };

        #[cfg(not(target_os = "windows"))]
        let (theme, language) = ("dark".to_string(), "en".to_string());

        Self {
            theme,
            language,
            register_association_on_launch: true,
            reopen_last_file: false,
        }
    }
}

pub struct ConfigManager(pub Mutex<AppConfig>);

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self(Mutex::new(AppConfig::default()))
    }

    pub fn save(&self, app_handle: &AppHandle) -> Result<(), CommandError> {
        let config = self
            .0
            .lock()
            .map_err(|_| CommandError::SystemError("Failed to lock config".to_string()))?;
        self.save_config(app_handle, &config)
    }

    pub fn save_config(&self, app_handle: &AppHandle, config: &AppConfig) -> Result<(), CommandError> {
        let config_dir = app_handle
            .path()
            .app_config_dir()
            .map_err(|e| CommandError::IoError(e.to_string()))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| CommandError::IoError(e.to_string()))?;
        }

        let config_path = config_dir.join("config.json");
        let json =
            serde_json::to_string_pretty(config).map_err(|e| CommandError::Other(e.to_string()))?;

        fs::write(config_path, json).map_err(|e| CommandError::IoError(e.to_string()))?;
        Ok(())
    }

    pub fn load(&self, app_handle: &AppHandle) -> Result<(), CommandError> {
        let config_dir = app_handle
            .path()
            .app_config_dir()
            .map_err(|e| CommandError::IoError(e.to_string()))?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            let content =
                fs::read_to_string(config_path).map_err(|e| CommandError::IoError(e.to_string()))?;
            let loaded_config: AppConfig =
                serde_json::from_str(&content).map_err(|e| CommandError::Other(e.to_string()))?;

            let mut config = self
                .0
                .lock()
                .map_err(|_| CommandError::SystemError("Failed to lock config".to_string()))?;
            *config = loaded_config;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_roundtrips_through_disk_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.theme = "light".to_string();
        config.register_association_on_launch = false;

        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded: AppConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded.theme, "light");
        assert_eq!(loaded.language, config.language);
        assert!(!loaded.register_association_on_launch);
        assert!(!loaded.reopen_last_file);
    }

    #[test]
    fn default_config_registers_association_on_launch() {
        assert!(AppConfig::default().register_association_on_launch);
    }
}
