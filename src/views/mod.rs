pub mod autocomplete;
pub mod form_helpers;
pub mod layout;
pub mod toast;
pub mod recent_activity;
pub mod stats;
pub mod checker_login;
pub mod checker_dashboard;
pub mod trolley_login;
pub mod trolley_dashboard;

pub use checker_login::render_checker_login;
pub use checker_dashboard::render_checker_dashboard;
pub use trolley_login::render_trolley_login;
pub use trolley_dashboard::render_trolley_dashboard;
pub use toast::mount_toast_region;
