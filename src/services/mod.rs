// ==========================================
// 轮胎库存上报系统 - 外部服务层
// ==========================================
// 职责: 与外部系统（供应商 API）通信
// ==========================================

pub mod vendor_upload;

pub use vendor_upload::{PirelliApiClient, UploadError, VendorUploader, REQUEST_TIMEOUT};
