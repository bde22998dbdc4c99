// ~/privshield/src/system/os.rs

use sysinfo::System;

/// Label for the root of the selection tree, e.g. `Windows 10 (Windows 10 Pro 19045)`.
pub fn root_label() -> String {
    let os_long = System::long_os_version().unwrap_or_else(|| "unknown".into());
    let build = System::kernel_version().unwrap_or_default();

    if build.is_empty() || os_long.contains(&build) {
        format!("Windows 10 ({os_long})")
    } else {
        format!("Windows 10 ({os_long} {build})")
    }
}
