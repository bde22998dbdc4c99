// ~/privshield/src/system/native.rs

use windows::core::PCWSTR;
use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR,
};
use windows::Win32::System::Registry::*;

use super::registry::{Hive, RegData, Registry};
use crate::error::RegistryError;
use crate::{info, warn};

/// Win32 registry. HKLM keys are opened in the 64-bit view so policy values
/// land where Windows reads them.
pub struct WindowsRegistry;

/// Owned key handle, closed on drop.
struct OpenKey(HKEY);

impl Drop for OpenKey {
    fn drop(&mut self) {
        unsafe {
            let _ = RegCloseKey(self.0);
        }
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(Some(0)).collect()
}

fn root(hive: Hive) -> HKEY {
    match hive {
        Hive::LocalMachine => HKEY_LOCAL_MACHINE,
        Hive::CurrentUser => HKEY_CURRENT_USER,
    }
}

fn status_error(status: WIN32_ERROR, hive: Hive, path: &str) -> RegistryError {
    let full = format!("{hive}\\{path}");
    if status == ERROR_ACCESS_DENIED {
        RegistryError::AccessDenied(full)
    } else {
        RegistryError::Os { path: full, message: format!("{:#X}", status.0) }
    }
}

fn open_key(hive: Hive, path: &str, access: REG_SAM_FLAGS) -> Result<Option<OpenKey>, RegistryError> {
    let path_w = to_wide(path);
    let mut key = HKEY::default();

    let status = unsafe {
        RegOpenKeyExW(root(hive), PCWSTR(path_w.as_ptr()), None, access | KEY_WOW64_64KEY, &mut key)
    };

    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    if status != ERROR_SUCCESS {
        return Err(status_error(status, hive, path));
    }
    Ok(Some(OpenKey(key)))
}

fn create_key(hive: Hive, path: &str) -> Result<OpenKey, RegistryError> {
    let path_w = to_wide(path);
    let mut key = HKEY::default();

    let status = unsafe {
        RegCreateKeyExW(
            root(hive),
            PCWSTR(path_w.as_ptr()),
            None,
            None,
            REG_OPTION_NON_VOLATILE,
            KEY_SET_VALUE | KEY_WOW64_64KEY,
            None,
            &mut key,
            None,
        )
    };

    if status != ERROR_SUCCESS {
        warn!("[Registry] Failed to create/open key '{}\\{}': {:#X}", hive, path, status.0);
        return Err(status_error(status, hive, path));
    }
    Ok(OpenKey(key))
}

impl Registry for WindowsRegistry {
    fn read(&self, hive: Hive, path: &str, name: &str) -> Result<Option<RegData>, RegistryError> {
        let Some(key) = open_key(hive, path, KEY_QUERY_VALUE)? else {
            return Ok(None);
        };
        let name_w = to_wide(name);

        // First call sizes the buffer.
        let mut kind = REG_VALUE_TYPE::default();
        let mut size = 0u32;
        let status = unsafe {
            RegQueryValueExW(key.0, PCWSTR(name_w.as_ptr()), None, Some(&mut kind as *mut _), None, Some(&mut size as *mut _))
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status != ERROR_SUCCESS {
            return Err(status_error(status, hive, path));
        }

        let mut buffer = vec![0u8; size as usize];
        let status = unsafe {
            RegQueryValueExW(
                key.0,
                PCWSTR(name_w.as_ptr()),
                None,
                Some(&mut kind as *mut _),
                Some(buffer.as_mut_ptr()),
                Some(&mut size as *mut _),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(status_error(status, hive, path));
        }
        buffer.truncate(size as usize);

        if kind == REG_DWORD && buffer.len() >= 4 {
            let raw = [buffer[0], buffer[1], buffer[2], buffer[3]];
            return Ok(Some(RegData::Dword(u32::from_le_bytes(raw))));
        }
        if kind == REG_SZ || kind == REG_EXPAND_SZ {
            let wide: Vec<u16> = buffer
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .take_while(|c| *c != 0)
                .collect();
            return Ok(Some(RegData::Sz(String::from_utf16_lossy(&wide))));
        }

        Err(RegistryError::UnexpectedType { name: name.to_string() })
    }

    fn write(&self, hive: Hive, path: &str, name: &str, data: &RegData) -> Result<(), RegistryError> {
        let key = create_key(hive, path)?;
        let name_w = to_wide(name);

        let (kind, bytes) = match data {
            RegData::Dword(v) => (REG_DWORD, v.to_le_bytes().to_vec()),
            RegData::Sz(s) => (
                REG_SZ,
                to_wide(s).iter().flat_map(|c| c.to_le_bytes()).collect::<Vec<u8>>(),
            ),
        };

        let status = unsafe { RegSetValueExW(key.0, PCWSTR(name_w.as_ptr()), None, kind, Some(&bytes)) };
        if status != ERROR_SUCCESS {
            warn!("[Registry] Failed to set '{}={}' in key '{}\\{}': {:#X}", name, data, hive, path, status.0);
            return Err(status_error(status, hive, path));
        }

        info!("[Registry] Set '{}={}' in key '{}\\{}'", name, data, hive, path);
        Ok(())
    }

    fn delete(&self, hive: Hive, path: &str, name: &str) -> Result<(), RegistryError> {
        let Some(key) = open_key(hive, path, KEY_SET_VALUE)? else {
            return Ok(());
        };
        let name_w = to_wide(name);

        let status = unsafe { RegDeleteValueW(key.0, PCWSTR(name_w.as_ptr())) };
        if status == ERROR_FILE_NOT_FOUND || status == ERROR_SUCCESS {
            info!("[Registry] Removed '{}' from key '{}\\{}'", name, hive, path);
            return Ok(());
        }

        warn!("[Registry] Failed to delete '{}' in key '{}\\{}': {:#X}", name, hive, path, status.0);
        Err(status_error(status, hive, path))
    }
}
