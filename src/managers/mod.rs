// Portal state managers
// Managers handle stateful operations: tabs, navigation, favorites, playtime.

pub mod favorites_manager;
pub mod navigation_controller;
pub mod playtime_manager;
pub mod tab_manager;
