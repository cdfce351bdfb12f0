//! UI components for iBanner

pub mod banner_view;
pub mod history_list;
pub mod settings_panel;
pub mod style_form;
pub mod template_grid;

pub use banner_view::{BannerView, EguiTextMeasure};
pub use history_list::HistoryList;
pub use settings_panel::SettingsPanel;
pub use style_form::StyleForm;
pub use template_grid::{show_template_filters, TemplateGrid};
