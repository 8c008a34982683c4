mod panel;
mod sections;
mod status_bar;

pub use panel::PanelWidget;
pub use sections::SectionsWidget;
pub use status_bar::StatusBarWidget;
