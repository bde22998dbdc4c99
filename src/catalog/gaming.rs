// ~/privshield/src/catalog/gaming.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    vec![Arc::new(RegistryTweak::new(
        "Disable Game Bar features",
        "Turns off the Game Bar and background game recording (Game DVR).",
        sys.registry.clone(),
        vec![
            RegEdit::dword(CurrentUser, r"System\GameConfigStore", "GameDVR_Enabled", 0).default_dword(1),
            RegEdit::dword(LocalMachine, r"SOFTWARE\Policies\Microsoft\Windows\GameDVR", "AllowGameDVR", 0),
        ],
    ))]
}
