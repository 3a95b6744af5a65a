//! Concrete collaborator implementations
//!
//! Network and filesystem code lives here, behind the traits defined in
//! `src/core/`.

pub mod report_http;
pub mod settings_file;
pub mod wechat;

pub use report_http::HttpReportDelivery;
pub use settings_file::JsonSettingsStore;
pub use wechat::WechatLinkExchange;
