// ~/privshield/src/catalog/cortana.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, ScriptTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

const SEARCH_POLICY: &str = r"SOFTWARE\Policies\Microsoft\Windows\Windows Search";
const CORTANA_PACKAGE: &str = "Microsoft.549981C3F5F10";

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    vec![
        Arc::new(RegistryTweak::new(
            "Disable Cortana",
            "Turns Cortana off; search keeps working locally.",
            sys.registry.clone(),
            vec![
                RegEdit::dword(LocalMachine, SEARCH_POLICY, "AllowCortana", 0),
                RegEdit::dword(LocalMachine, SEARCH_POLICY, "AllowCortanaAboveLock", 0),
                RegEdit::dword(CurrentUser, r"Software\Microsoft\Personalization\Settings", "AcceptedPrivacyPolicy", 0)
                    .default_dword(1),
            ],
        )),
        Arc::new(RegistryTweak::new(
            "Disable Bing in Windows Search",
            "Keeps Start menu searches local instead of sending them to Bing.",
            sys.registry.clone(),
            vec![
                RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\Search", "BingSearchEnabled", 0)
                    .default_dword(1),
                RegEdit::dword(LocalMachine, SEARCH_POLICY, "DisableWebSearch", 1),
                RegEdit::dword(LocalMachine, SEARCH_POLICY, "ConnectedSearchUseWeb", 0),
            ],
        )),
        Arc::new(ScriptTweak::new(
            "Uninstall Cortana",
            "Removes the Cortana app package for the current user. Revert reinstalls it from the system image.",
            sys.shell.clone(),
            format!("Get-AppxPackage -Name {CORTANA_PACKAGE} | Select-Object -ExpandProperty Name"),
            format!("Get-AppxPackage -Name {CORTANA_PACKAGE} | Remove-AppxPackage"),
            format!(
                "Get-AppxPackage -AllUsers -Name {CORTANA_PACKAGE} | \
                 Foreach-Object {{ Add-AppxPackage -DisableDevelopmentMode -Register \"$($_.InstallLocation)\\AppXManifest.xml\" }}"
            ),
        )),
    ]
}
