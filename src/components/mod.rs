//! UI Components
//!
//! Reusable Leptos components.

mod category_filter;
mod daily_activities;
mod delete_confirm_button;
mod footer;
mod mail_dashboard;
mod navbar;
mod personal_info;
mod project_form;
mod project_list;
mod reminders;
mod require_auth;
mod toaster;

pub use category_filter::CategoryFilter;
pub use daily_activities::DailyActivities;
pub use delete_confirm_button::DeleteConfirmButton;
pub use footer::Footer;
pub use mail_dashboard::MailDashboard;
pub use navbar::Navbar;
pub use personal_info::PersonalInfoPanel;
pub use project_form::ProjectForm;
pub use project_list::ProjectList;
pub use reminders::Reminders;
pub use require_auth::RequireAuth;
pub use toaster::Toaster;
