// ~/privshield/src/catalog/bloatware.rs

use std::sync::Arc;

use crate::setting::{ScriptTweak, Setting};
use crate::system::SystemHandles;

/// Packages that stay even when "everything" is removed; the Store and the
/// runtime frameworks other apps depend on.
const KEEP: &[&str] = &[
    "Microsoft.WindowsStore",
    "Microsoft.StorePurchaseApp",
    "Microsoft.DesktopAppInstaller",
    "Microsoft.WindowsCalculator",
    "Microsoft.Windows.Photos",
    "Microsoft.VCLibs*",
    "Microsoft.NET.Native*",
    "Microsoft.UI.Xaml*",
    "Microsoft.Services.Store.Engagement",
];

/// Preinstalled apps most people never use.
const DEFAULTS: &[&str] = &[
    "Microsoft.3DBuilder",
    "Microsoft.BingFinance",
    "Microsoft.BingNews",
    "Microsoft.BingSports",
    "Microsoft.BingWeather",
    "Microsoft.GetHelp",
    "Microsoft.Getstarted",
    "Microsoft.Messaging",
    "Microsoft.Microsoft3DViewer",
    "Microsoft.MicrosoftOfficeHub",
    "Microsoft.MicrosoftSolitaireCollection",
    "Microsoft.MixedReality.Portal",
    "Microsoft.Office.OneNote",
    "Microsoft.OneConnect",
    "Microsoft.People",
    "Microsoft.Print3D",
    "Microsoft.SkypeApp",
    "Microsoft.Wallet",
    "Microsoft.WindowsFeedbackHub",
    "Microsoft.WindowsMaps",
    "Microsoft.XboxApp",
    "Microsoft.YourPhone",
    "Microsoft.ZuneMusic",
    "Microsoft.ZuneVideo",
];

fn ps_array(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("@({})", quoted.join(","))
}

fn reinstall_all() -> String {
    "Get-AppxPackage -AllUsers | Foreach-Object { \
     Add-AppxPackage -DisableDevelopmentMode -Register \"$($_.InstallLocation)\\AppXManifest.xml\" \
     -ErrorAction SilentlyContinue }"
        .to_string()
}

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    // Removable = not a framework, not a system package and not whitelisted.
    let removable_all = format!(
        "$keep = {}; Get-AppxPackage | Where-Object {{ $pkg = $_; -not $pkg.IsFramework -and \
         $pkg.SignatureKind -ne 'System' -and -not ($keep | Where-Object {{ $pkg.Name -like $_ }}) }}",
        ps_array(KEEP)
    );

    let removable_defaults = format!(
        "$apps = {}; Get-AppxPackage | Where-Object {{ $apps -contains $_.Name }}",
        ps_array(DEFAULTS)
    );

    vec![
        Arc::new(ScriptTweak::new(
            "Remove all built-in apps",
            "Uninstalls every removable preinstalled app except the Store, Calculator, Photos and required frameworks.",
            sys.shell.clone(),
            format!("{removable_all} | Select-Object -ExpandProperty Name"),
            format!("{removable_all} | Remove-AppxPackage -ErrorAction SilentlyContinue"),
            reinstall_all(),
        )),
        Arc::new(ScriptTweak::new(
            "Remove default apps",
            "Uninstalls the usual preinstalled apps (Bing apps, Xbox, Solitaire, Skype, Your Phone and similar).",
            sys.shell.clone(),
            format!("{removable_defaults} | Select-Object -ExpandProperty Name"),
            format!("{removable_defaults} | Remove-AppxPackage -ErrorAction SilentlyContinue"),
            format!(
                "$apps = {}; Get-AppxPackage -AllUsers | Where-Object {{ $apps -contains $_.Name }} | \
                 Foreach-Object {{ Add-AppxPackage -DisableDevelopmentMode -Register \"$($_.InstallLocation)\\AppXManifest.xml\" }}",
                ps_array(DEFAULTS)
            ),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_are_quoted() {
        assert_eq!(ps_array(&["a", "b"]), "@('a','b')");
    }
}
