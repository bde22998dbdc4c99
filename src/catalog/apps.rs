// ~/privshield/src/catalog/apps.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, Registry, SystemHandles};

/// Capability consent keys, `Value` = "Allow" | "Deny".
macro_rules! consent_path {
    ($capability:literal) => {
        concat!(
            r"SOFTWARE\Microsoft\Windows\CurrentVersion\CapabilityAccessManager\ConsentStore\",
            $capability
        )
    };
}

/// (id, info, consent store key)
const CONSENT_PERSONAL: &[(&str, &str, &str)] = &[
    ("Disable app access to camera", "Apps can no longer use the camera.", consent_path!("webcam")),
    ("Disable app access to microphone", "Apps can no longer use the microphone.", consent_path!("microphone")),
    ("Disable app access to calls", "Apps can no longer make phone calls.", consent_path!("phoneCall")),
    ("Disable app access to notifications", "Apps can no longer read your notifications.", consent_path!("userNotificationListener")),
    ("Disable app access to account info", "Apps can no longer read your name, picture and account info.", consent_path!("userAccountInformation")),
    ("Disable app access to contacts", "Apps can no longer read your contacts.", consent_path!("contacts")),
    ("Disable app access to calendar", "Apps can no longer read your calendar.", consent_path!("appointments")),
    ("Disable app access to call history", "Apps can no longer read your call history.", consent_path!("phoneCallHistory")),
    ("Disable app access to email", "Apps can no longer read or send email.", consent_path!("email")),
    ("Disable app access to tasks", "Apps can no longer read your tasks.", consent_path!("userDataTasks")),
    ("Disable app access to messaging", "Apps can no longer read or send SMS and MMS.", consent_path!("chat")),
    ("Disable app access to motion", "Apps can no longer read motion activity history.", consent_path!("activity")),
    ("Disable app access to other devices", "Apps can no longer sync with unpaired wireless devices.", consent_path!("bluetoothSync")),
];

const CONSENT_LIBRARIES: &[(&str, &str, &str)] = &[
    ("Disable app access to diagnostic information", "Apps can no longer read diagnostic information about other apps.", consent_path!("appDiagnostics")),
    ("Disable app access to documents", "Apps can no longer read the Documents library.", consent_path!("documentsLibrary")),
    ("Disable app access to pictures", "Apps can no longer read the Pictures library.", consent_path!("picturesLibrary")),
    ("Disable app access to videos", "Apps can no longer read the Videos library.", consent_path!("videosLibrary")),
    ("Disable app access to radios", "Apps can no longer switch Bluetooth or other radios.", consent_path!("radios")),
    ("Disable app access to file system", "Apps can no longer access the whole file system.", consent_path!("broadFileSystemAccess")),
    ("Disable app access to eye tracking", "Apps can no longer use eye tracking devices.", consent_path!("gazeInput")),
    ("Disable app access to cellular data", "Apps can no longer use cellular data.", consent_path!("cellularData")),
];

fn consent(reg: &Arc<dyn Registry>, entries: &[(&'static str, &'static str, &'static str)]) -> Vec<Arc<dyn Setting>> {
    entries
        .iter()
        .map(|&(id, info, path)| -> Arc<dyn Setting> {
            Arc::new(RegistryTweak::new(
                id,
                info,
                reg.clone(),
                vec![RegEdit::sz(LocalMachine, path, "Value", "Deny").default_sz("Allow")],
            ))
        })
        .collect()
}

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    let reg = &sys.registry;
    let mut out: Vec<Arc<dyn Setting>> = Vec::new();

    out.push(Arc::new(RegistryTweak::new(
        "Disable app notifications",
        "Turns off toast notifications from apps.",
        reg.clone(),
        vec![
            RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\PushNotifications", "ToastEnabled", 0)
                .default_dword(1),
        ],
    )));

    out.extend(consent(reg, CONSENT_PERSONAL));

    out.push(Arc::new(RegistryTweak::new(
        "Disable apps running in background",
        "Stops Store apps from receiving info, sending notifications and updating while not in use.",
        reg.clone(),
        vec![
            RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\BackgroundAccessApplications", "GlobalUserDisabled", 1)
                .default_dword(0),
            RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\Search", "BackgroundAppGlobalToggle", 0)
                .default_dword(1),
        ],
    )));
    out.push(Arc::new(RegistryTweak::new(
        "Disable app launch tracking",
        "Windows stops tracking app launches used to personalise Start and search results.",
        reg.clone(),
        vec![
            RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\Explorer\Advanced", "Start_TrackProgs", 0)
                .default_dword(1),
        ],
    )));

    out.extend(consent(reg, CONSENT_LIBRARIES));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_and_tracking_follow_other_devices() {
        let ids: Vec<String> = settings(&SystemHandles::simulated())
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        let other = ids.iter().position(|i| i == "Disable app access to other devices").unwrap();
        assert_eq!(ids[other + 1], "Disable apps running in background");
        assert_eq!(ids[other + 2], "Disable app launch tracking");
        assert_eq!(ids[other + 3], "Disable app access to diagnostic information");
    }
}
