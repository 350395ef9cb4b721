// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中持久化认证令牌的键
pub const STORAGE_TOKEN_KEY: &str = "tucarga_token";
/// LocalStorage 中可选的后端 URL 覆盖键
pub const STORAGE_API_URL_KEY: &str = "tucarga_api_url";
/// 所有报价请求统一使用的 WhatsApp 号码
pub const WHATSAPP_NUMBER: &str = "573151957777";

// =========================================================
// 模块 (Modules)
// =========================================================

pub mod document;
pub mod entities;
pub mod report;

pub use document::{
    DocumentKind, DocumentStatus, format_date_es, parse_date, status_from_expiry,
};
pub use entities::*;
pub use report::{ReportRow, format_thousands, report_rows};
