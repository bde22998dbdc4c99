// ~/privshield/src/catalog/privacy.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

const DATA_COLLECTION_POLICY: &str = r"SOFTWARE\Policies\Microsoft\Windows\DataCollection";
const DATA_COLLECTION: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Policies\DataCollection";
const CONTENT_DELIVERY: &str = r"Software\Microsoft\Windows\CurrentVersion\ContentDeliveryManager";
const CLOUD_CONTENT_POLICY: &str = r"SOFTWARE\Policies\Microsoft\Windows\CloudContent";

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    let reg = &sys.registry;
    let tweak = |id: &'static str, info: &'static str, edits: Vec<RegEdit>| -> Arc<dyn Setting> {
        Arc::new(RegistryTweak::new(id, info, reg.clone(), edits))
    };

    vec![
        tweak(
            "Disable Telemetry",
            "Sets the diagnostic data level to Security and stops the Connected User Experiences and Telemetry service.",
            vec![
                RegEdit::dword(LocalMachine, DATA_COLLECTION_POLICY, "AllowTelemetry", 0),
                RegEdit::dword(LocalMachine, DATA_COLLECTION, "AllowTelemetry", 0).default_dword(3),
                RegEdit::dword(LocalMachine, r"SYSTEM\CurrentControlSet\Services\DiagTrack", "Start", 4)
                    .default_dword(2),
                RegEdit::dword(LocalMachine, r"SYSTEM\CurrentControlSet\Services\dmwappushservice", "Start", 4)
                    .default_dword(3),
            ],
        ),
        tweak(
            "Disable Compatibility Telemetry",
            "Prevents the Microsoft Compatibility Appraiser (CompatTelRunner.exe) from collecting data.",
            vec![
                RegEdit::sz(
                    LocalMachine,
                    r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\Image File Execution Options\CompatTelRunner.exe",
                    "Debugger",
                    r"%windir%\System32\taskkill.exe",
                ),
            ],
        ),
        tweak(
            "Disable advertising ID for relevant ads",
            "Stops apps from using the advertising ID to show personalised ads.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\AdvertisingInfo", "DisabledByGroupPolicy", 1),
                RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\AdvertisingInfo", "Enabled", 0)
                    .default_dword(1),
            ],
        ),
        tweak(
            "Disable Wi-Fi Sense",
            "Stops automatic connection to suggested open hotspots and sharing of networks with contacts.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Microsoft\PolicyManager\default\WiFi\AllowWiFiHotSpotReporting", "value", 0)
                    .default_dword(1),
                RegEdit::dword(LocalMachine, r"SOFTWARE\Microsoft\PolicyManager\default\WiFi\AllowAutoConnectToWiFiSenseHotspots", "value", 0)
                    .default_dword(1),
            ],
        ),
        tweak(
            "Prevent using diagnostic data",
            "Stops Microsoft from using diagnostic data for tailored experiences, tips and recommendations.",
            vec![
                RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\Privacy", "TailoredExperiencesWithDiagnosticDataEnabled", 0)
                    .default_dword(1),
            ],
        ),
        tweak(
            "Disable sharing of handwriting data",
            "Stops handwriting recognition personalisation data from being sent to Microsoft.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\TabletPC", "PreventHandwritingDataSharing", 1),
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\HandwritingErrorReports", "PreventHandwritingErrorReports", 1),
            ],
        ),
        tweak(
            "Disable Windows Hello Biometrics",
            "Turns off biometric sign-in (fingerprint, face) for the whole device.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Biometrics", "Enabled", 0),
            ],
        ),
        tweak(
            "Disable Timeline feature",
            "Stops collection of activity history and its upload to Microsoft.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\System", "EnableActivityFeed", 0),
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\System", "PublishUserActivities", 0),
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\System", "UploadUserActivities", 0),
            ],
        ),
        tweak(
            "Disable Location tracking",
            "Denies location access to Windows and all apps.",
            vec![
                RegEdit::sz(
                    LocalMachine,
                    r"SOFTWARE\Microsoft\Windows\CurrentVersion\CapabilityAccessManager\ConsentStore\location",
                    "Value",
                    "Deny",
                )
                .default_sz("Allow"),
            ],
        ),
        tweak(
            "Disable Feedback",
            "Windows no longer asks for feedback and feedback notifications are hidden.",
            vec![
                RegEdit::dword(CurrentUser, r"Software\Microsoft\Siuf\Rules", "NumberOfSIUFInPeriod", 0),
                RegEdit::dword(LocalMachine, DATA_COLLECTION_POLICY, "DoNotShowFeedbackNotifications", 1),
            ],
        ),
        tweak(
            "Disable Tips and Suggestions",
            "Turns off Windows tips, tricks and suggestions.",
            vec![
                RegEdit::dword(LocalMachine, CLOUD_CONTENT_POLICY, "DisableSoftLanding", 1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SubscribedContent-338389Enabled", 0).default_dword(1),
            ],
        ),
        tweak(
            "Disable Windows Spotlight and tips on lock screen",
            "Removes fun facts, tips and ads from the lock screen.",
            vec![
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "RotatingLockScreenEnabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "RotatingLockScreenOverlayEnabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SubscribedContent-338387Enabled", 0).default_dword(1),
            ],
        ),
        tweak(
            "Disable automatic installation of suggested apps",
            "Stops Windows from silently installing promoted Store apps.",
            vec![
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SilentInstalledAppsEnabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "PreInstalledAppsEnabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "OemPreInstalledAppsEnabled", 0).default_dword(1),
            ],
        ),
        tweak(
            "Disable app suggestions in Start",
            "Hides app suggestions in the Start menu.",
            vec![
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SubscribedContent-338388Enabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SystemPaneSuggestionsEnabled", 0).default_dword(1),
            ],
        ),
        tweak(
            "Disable suggested content in Settings",
            "Hides suggested content in the Settings app.",
            vec![
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SubscribedContent-338393Enabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SubscribedContent-353694Enabled", 0).default_dword(1),
                RegEdit::dword(CurrentUser, CONTENT_DELIVERY, "SubscribedContent-353696Enabled", 0).default_dword(1),
            ],
        ),
        tweak(
            "Disable Customer Experience Program",
            "Opts out of the Windows Customer Experience Improvement Program.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\SQMClient\Windows", "CEIPEnable", 0),
            ],
        ),
        tweak(
            "Disable Help Experience Program",
            "Opts out of the Help Experience Improvement Program.",
            vec![
                RegEdit::dword(CurrentUser, r"Software\Policies\Microsoft\Assistance\Client\1.0", "NoExplicitFeedback", 1),
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Assistance\Client\1.0", "NoActiveHelp", 1),
            ],
        ),
        tweak(
            "Disable experiments with OS by Microsoft",
            "Prevents Microsoft from running feature experiments on this device.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Microsoft\PolicyManager\current\device\System", "AllowExperimentation", 0)
                    .default_dword(1),
            ],
        ),
        tweak(
            "Disable Inventory Collector",
            "Stops the inventory of installed apps, files and devices from being sent to Microsoft.",
            vec![
                RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\AppCompat", "DisableInventory", 1),
            ],
        ),
        tweak(
            "Disable Get Even More Out of Windows",
            "Hides the full-screen \"Get even more out of Windows\" prompt after updates.",
            vec![
                RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\UserProfileEngagement", "ScoobeSystemSettingEnabled", 0)
                    .default_dword(1),
            ],
        ),
    ]
}
