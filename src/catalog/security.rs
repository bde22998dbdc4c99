// ~/privshield/src/catalog/security.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    let reg = &sys.registry;
    vec![
        Arc::new(RegistryTweak::new(
            "Disable password reveal button",
            "Hides the eye button that shows a typed password in clear text.",
            reg.clone(),
            vec![RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\CredUI", "DisablePasswordReveal", 1)],
        )),
        Arc::new(RegistryTweak::new(
            "Disable DRM in Windows Media Player",
            "Windows Media DRM no longer contacts licence servers on the internet.",
            reg.clone(),
            vec![RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\WMDRM", "DisableOnline", 1)],
        )),
    ]
}
