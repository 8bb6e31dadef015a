pub mod commands;
pub mod models;

use log::info;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .manage(models::ConfigManager::new())
        .invoke_handler(tauri::generate_handler![
            commands::association::register_file_association,
            commands::association::get_initial_file,
            commands::config::get_config,
            commands::config::set_config_value,
            commands::config::reset_config_to_default,
        ])
        .setup(|app| {
            let config_manager = app.state::<models::ConfigManager>();
            if let Err(e) = config_manager.load(app.handle()) {
                eprintln!("Failed to load config: {:?}", e);
            }

            let register_on_launch = config_manager
                .0
                .lock()
                .map(|config| config.register_association_on_launch)
                .unwrap_or(true);
            if register_on_launch && commands::association::register_file_association() {
                info!(
                    "Registered {} with the shell as {}",
                    commands::association::FILE_EXTENSION,
                    commands::association::PROG_ID
                );
            }

            if let Some(path) = commands::association::get_initial_file() {
                info!("Launched with file: {}", path);
            }

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
