// Components module - building blocks of the dashboard screen
//
// - Title bar: project name, description, count and rating badges
// - Table panel: the visible page with header markers and pager
// - Status bar: key hints, filter prompt, latest log entry
// - Toast: short-lived overlay messages
//
// The chart itself is drawn by `feedlens::chart::ChartPanel`.

pub mod status_bar;
pub mod table_panel;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
