// ~/privshield/src/catalog/defender.rs

use std::sync::Arc;

use crate::setting::{RegEdit, RegistryTweak, Setting};
use crate::system::{Hive::*, SystemHandles};

pub fn settings(sys: &SystemHandles) -> Vec<Arc<dyn Setting>> {
    vec![Arc::new(RegistryTweak::new(
        "Disable SmartScreen for Store Apps",
        "Store apps no longer send visited URLs to the SmartScreen filter.",
        sys.registry.clone(),
        vec![
            RegEdit::dword(CurrentUser, r"Software\Microsoft\Windows\CurrentVersion\AppHost", "EnableWebContentEvaluation", 0)
                .default_dword(1),
        ],
    ))]
}
