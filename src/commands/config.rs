use tauri::{AppHandle, State};

use crate::models::{AppConfig, CommandError, ConfigManager};

#[tauri::command]
pub fn get_config(state: State<'_, ConfigManager>) -> Result<AppConfig, CommandError> {
    let config = state
        .0
        .lock()
        .map_err(|_| CommandError::SystemError("Failed to lock config".to_string()))?;
    Ok(config.clone())
}

#[tauri::command]
pub fn set_config_value(
    app: AppHandle,
    state: State<'_, ConfigManager>,
    key: String,
    value: String,
) -> Result<(), CommandError> {
    let mut config = state
        .0
        .lock()
        .map_err(|_| CommandError::SystemError("Failed to lock config".to_string()))?;

    match key.as_str() {
        "theme" => config.theme = value,
        "language" => config.language = value,
        "register_association_on_launch" => {
            config.register_association_on_launch = value.parse().unwrap_or(true)
        }
        "reopen_last_file" => config.reopen_last_file = value.parse().unwrap_or(false),
        _ => return Err(CommandError::Other(format!("Unknown config key: {}", key))),
    }

    state.save_config(&app, &config)?;
    Ok(())
}

#[tauri::command]
pub fn reset_config_to_default(
    app: AppHandle,
    state: State<'_, ConfigManager>,
) -> Result<AppConfig, CommandError> {
    let mut config = state
        .0
        .lock()
        .map_err(|_| CommandError::SystemError("Failed to lock config".to_string()))?;

    *config = AppConfig::default();
    state.save_config(&app, &config)?;
    Ok(config.clone())
}
