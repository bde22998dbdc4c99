// ~/privshield/src/catalog/updates.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

const WU_POLICY: &str = r"SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate";
const WU_AU_POLICY: &str = r"SOFTWARE\Policies\Microsoft\Windows\WindowsUpdate\AU";

/// Feature update the device is pinned to while major updates are blocked.
const PINNED_RELEASE: &str = "20H2";

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    let reg = &sys.registry;
    vec![
        Arc::new(RegistryTweak::new(
            "Disable forced Windows updates",
            "Windows notifies before downloading and installing updates instead of doing it automatically.",
            reg.clone(),
            vec![
                RegEdit::dword(LocalMachine, WU_AU_POLICY, "NoAutoUpdate", 0),
                RegEdit::dword(LocalMachine, WU_AU_POLICY, "AUOptions", 2),
                RegEdit::dword(LocalMachine, WU_AU_POLICY, "NoAutoRebootWithLoggedOnUsers", 1),
            ],
        )),
        Arc::new(RegistryTweak::new(
            "Disable Windows updates sharing",
            "Delivery Optimization stops uploading updates to other PCs on the internet.",
            reg.clone(),
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Microsoft\Windows\CurrentVersion\DeliveryOptimization\Config", "DODownloadMode", 0)
                    .default_dword(1),
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\DeliveryOptimization", "DODownloadMode", 0),
            ],
        )),
        Arc::new(RegistryTweak::new(
            "Block major Windows updates",
            "Keeps the device on its current feature release; security updates still install.",
            reg.clone(),
            vec![
                RegEdit::dword(LocalMachine, WU_POLICY, "TargetReleaseVersion", 1),
                RegEdit::sz(LocalMachine, WU_POLICY, "TargetReleaseVersionInfo", PINNED_RELEASE),
            ],
        )),
    ]
}
