// ~/privshield/src/catalog/edge.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

const EDGE_POLICY: &str = r"SOFTWARE\Policies\Microsoft\Edge";

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    let reg = &sys.registry;
    let policy = |id: &'static str, info: &'static str, name: &'static str, value: u32| -> Arc<dyn Setting> {
        Arc::new(RegistryTweak::new(
            id,
            info,
            reg.clone(),
            vec![RegEdit::dword(LocalMachine, EDGE_POLICY, name, value)],
        ))
    };

    vec![
        policy(
            "Disable AutoFill for credit cards",
            "Edge stops saving and filling in payment information.",
            "AutofillCreditCardEnabled",
            0,
        ),
        policy(
            "Prevent Edge running in background",
            "Edge no longer keeps running after its last window is closed.",
            "BackgroundModeEnabled",
            0,
        ),
        policy(
            "Disable synchronization of data",
            "Edge stops syncing favorites, passwords and history to the Microsoft account.",
            "SyncDisabled",
            1,
        ),
        Arc::new(RegistryTweak::new(
            "Block Chromium-based Edge installation",
            "Windows Update will not replace legacy Edge with the Chromium-based version.",
            reg.clone(),
            vec![RegEdit::dword(LocalMachine, r"SOFTWARE\Microsoft\EdgeUpdate", "DoNotUpdateToEdgeWithChromium", 1)],
        )),
    ]
}
