// Autoclick state managers
// Managers own persisted state: the rule list and the draft inputs.

pub mod draft_manager;
pub mod rule_manager;
