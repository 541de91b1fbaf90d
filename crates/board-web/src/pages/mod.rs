//! Page Components

mod admin;
mod agentchat;
mod dashboard;
mod filehistory;
mod landing;
mod reports;

pub use admin::AdminPage;
pub use agentchat::AgentChatPage;
pub use dashboard::DashboardPage;
pub use filehistory::FileHistoryPage;
pub use landing::LandingPage;
pub use reports::ReportsPage;
