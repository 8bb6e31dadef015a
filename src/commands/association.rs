use std::ffi::OsString;

/// ProgID the shell maps the extension to, under the per-user classes hive.
pub const PROG_ID: &str = "Vaultic.vlt";
pub const FILE_EXTENSION: &str = ".vlt";
pub const FILE_TYPE_NAME: &str = "Vaultic Encrypted File";

/// Registers the `.vlt` extension with the desktop shell so double-clicking
/// a vault launches this executable with the file path as an argument.
///
/// All writes go to the per-user hive, so no elevation is required. Every
/// write is best-effort: a key that cannot be created or set is skipped and
/// the rest of the sequence still runs.
#[tauri::command]
pub fn register_file_association() -> bool {
    #[cfg(target_os = "windows")]
    {
        register_user_classes();
        true
    }
    #[cfg(not(target_os = "windows"))]
    {
        log::debug!("File association registration is only supported on Windows");
        false
    }
}

/// Path the process was launched with, if the shell passed one.
#[tauri::command]
pub fn get_initial_file() -> Option<String> {
    initial_file_from(std::env::args_os().skip(1))
}

fn initial_file_from<I>(mut args: I) -> Option<String>
where
    I: Iterator<Item = OsString>,
{
    let first = args.next()?;
    let first = first.to_string_lossy();
    let path = strip_surrounding_quotes(&first);
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Removes one pair of surrounding double quotes. Argv normally arrives
/// unquoted, but a quoted `%1` substitution can survive verbatim.
fn strip_surrounding_quotes(arg: &str) -> &str {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        &arg[1..arg.len() - 1]
    } else {
        arg
    }
}

#[cfg(target_os = "windows")]
fn register_user_classes() {
    use log::warn;
    use windows::Win32::UI::Shell::{SHChangeNotify, SHCNE_ASSOCCHANGED, SHCNF_IDLIST};

    let exe_path = match std::env::current_exe() {
        // current_exe can come back with the \\?\ verbatim prefix, which the
        // shell does not resolve inside association commands.
        Ok(path) => path.to_string_lossy().replace(r"\\?\", ""),
        Err(e) => {
            warn!("Could not resolve executable path: {}", e);
            String::new()
        }
    };

    let prog_id_key = format!("Software\\Classes\\{}", PROG_ID);
    set_user_class_string(&prog_id_key, None, FILE_TYPE_NAME);
    set_user_class_string(
        &format!("{}\\DefaultIcon", prog_id_key),
        None,
        &format!("{},0", exe_path),
    );
    set_user_class_string(
        &format!("{}\\shell\\open\\command", prog_id_key),
        None,
        &format!("\"{}\" \"%1\"", exe_path),
    );

    let ext_key = format!("Software\\Classes\\{}", FILE_EXTENSION);
    set_user_class_string(&ext_key, None, PROG_ID);
    tag_open_with_prog_id(&format!("{}\\OpenWithProgids", ext_key), PROG_ID);

    unsafe {
        SHChangeNotify(SHCNE_ASSOCCHANGED, SHCNF_IDLIST, None, None);
    }
}

/// Best-effort `REG_SZ` write under HKCU. `value_name` of `None` targets the
/// key's default value. Failures are logged and swallowed.
#[cfg(target_os = "windows")]
fn set_user_class_string(subkey: &str, value_name: Option<&str>, data: &str) {
    use windows::core::PCWSTR;
    use windows::Win32::System::Registry::{RegSetValueExW, REG_SZ};

    with_user_key(subkey, |hkey| {
        let name_w: Vec<u16> = value_name
            .map(|n| n.encode_utf16().chain(std::iter::once(0)).collect())
            .unwrap_or_default();
        let name_ptr = if value_name.is_some() {
            PCWSTR(name_w.as_ptr())
        } else {
            PCWSTR::null()
        };

        // REG_SZ data must include the terminating NUL, as raw bytes.
        let data_w: Vec<u16> = data.encode_utf16().chain(std::iter::once(0)).collect();
        let bytes =
            unsafe { std::slice::from_raw_parts(data_w.as_ptr() as *const u8, data_w.len() * 2) };

        unsafe {
            if RegSetValueExW(hkey, name_ptr, None, REG_SZ, Some(bytes)).is_err() {
                log::warn!("Could not write HKCU\\{}", subkey);
            }
        }
    });
}

/// Adds `prog_id` to the extension's OpenWithProgids list. The value carries
/// no data (`REG_NONE`), only its name matters to the shell.
#[cfg(target_os = "windows")]
fn tag_open_with_prog_id(subkey: &str, prog_id: &str) {
    use windows::core::PCWSTR;
    use windows::Win32::System::Registry::{RegSetValueExW, REG_NONE};

    with_user_key(subkey, |hkey| {
        let name_w: Vec<u16> = prog_id.encode_utf16().chain(std::iter::once(0)).collect();
        unsafe {
            if RegSetValueExW(hkey, PCWSTR(name_w.as_ptr()), None, REG_NONE, None).is_err() {
                log::warn!("Could not write HKCU\\{}", subkey);
            }
        }
    });
}

/// Opens (creating if absent) a writable key under HKCU, hands it to `f`,
/// and closes it before returning. A key that cannot be opened is skipped.
#[cfg(target_os = "windows")]
fn with_user_key<F>(subkey: &str, f: F)
where
    F: FnOnce(windows::Win32::System::Registry::HKEY),
{
    use windows::core::PCWSTR;
    use windows::Win32::System::Registry::{
        RegCloseKey, RegCreateKeyExW, HKEY, HKEY_CURRENT_USER, KEY_WRITE, REG_OPTION_NON_VOLATILE,
    };

    let subkey_w: Vec<u16> = subkey.encode_utf16().chain(std::iter::once(0)).collect();
    let mut hkey = HKEY::default();

    let opened = unsafe {
        RegCreateKeyExW(
            HKEY_CURRENT_USER,
            PCWSTR(subkey_w.as_ptr()),
            None,
            PCWSTR::null(),
            REG_OPTION_NON_VOLATILE,
            KEY_WRITE,
            None,
            &mut hkey,
            None,
        )
        .is_ok()
    };

    if !opened {
        log::warn!("Could not open HKCU\\{}", subkey);
        return;
    }

    f(hkey);

    unsafe {
        let _ = RegCloseKey(hkey);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(list: &[&str]) -> std::vec::IntoIter<OsString> {
        list.iter()
            .map(|arg| OsString::from(*arg))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn strips_one_pair_of_quotes() {
        assert_eq!(
            strip_surrounding_quotes("\"C:\\Vaults\\notes.vlt\""),
            "C:\\Vaults\\notes.vlt"
        );
        // Only the outermost pair goes.
        assert_eq!(strip_surrounding_quotes("\"\"x\"\""), "\"x\"");
    }

    #[test]
    fn leaves_unquoted_and_half_quoted_arguments_alone() {
        assert_eq!(
            strip_surrounding_quotes("C:\\Vaults\\notes.vlt"),
            "C:\\Vaults\\notes.vlt"
        );
        assert_eq!(strip_surrounding_quotes("\"C:\\Vaults"), "\"C:\\Vaults");
        assert_eq!(strip_surrounding_quotes("C:\\Vaults\""), "C:\\Vaults\"");
        assert_eq!(strip_surrounding_quotes("\""), "\"");
        assert_eq!(strip_surrounding_quotes(""), "");
    }

    #[test]
    fn quoted_argument_is_unwrapped() {
        assert_eq!(
            initial_file_from(args(&["\"C:\\Vaults\\journal.vlt\""])),
            Some("C:\\Vaults\\journal.vlt".to_string())
        );
    }

    #[test]
    fn takes_only_the_first_argument() {
        assert_eq!(
            initial_file_from(args(&["C:\\a.vlt", "C:\\b.vlt"])),
            Some("C:\\a.vlt".to_string())
        );
    }

    #[test]
    fn no_arguments_means_no_initial_file() {
        assert_eq!(initial_file_from(args(&[])), None);
    }

    #[test]
    fn empty_after_stripping_means_no_initial_file() {
        assert_eq!(initial_file_from(args(&[""])), None);
        assert_eq!(initial_file_from(args(&["\"\""])), None);
    }
}
