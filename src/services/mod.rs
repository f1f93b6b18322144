// Autoclick services
// Matching, clicking, messaging between coordinator and pages, and settings.

pub mod auto_clicker;
pub mod background;
pub mod click_executor;
pub mod content_script;
pub mod page_channel;
pub mod page_matcher;
pub mod settings_engine;
pub mod validation;
