//! 领域模型模块
//!
//! 与后端 REST API 交换的全部数据结构。字段采用 camelCase 线上格式，
//! 通过类型化反序列化实现字段白名单：后端新增的未知字段会被直接丢弃，
//! 防止接口形状漂移影响客户端。

use serde::{Deserialize, Serialize};

// =========================================================
// 响应信封 (Response Envelopes)
// =========================================================

/// 后端列表/详情接口的统一信封 `{ success, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

/// 后端错误响应体
///
/// 校验错误时携带 `details` 字段级消息列表，否则只有 `message`。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<String>>,
}

// =========================================================
// 用户 (User)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl User {
    /// 用于界面展示的全名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

// =========================================================
// 车辆 (Vehicle)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub user_id: i64,
    /// 车牌，用户内唯一，作为客户端选中键
    pub plate: String,
    pub make: String,
    pub year: i32,
    pub dni_owner: String,
    pub dni_owner_type: String,
    pub vehicle_type: String,
    pub line: String,
    pub engine_displacement: i32,
    pub service_type: String,
    pub engine_id: String,
    #[serde(rename = "VIN")]
    pub vin: String,
    pub chassis_id: String,
    pub color: String,
    pub passenger_capacity: i32,
    pub fuel_type: String,
    pub registration_date: String,
    pub from: String,
    pub created_at: String,
    pub updated_at: String,
    /// 证件项集合，随车辆一起获取，客户端中无独立生命周期
    #[serde(default)]
    pub vehicle_items: Vec<VehicleItem>,
    #[serde(default)]
    pub maintenances: Vec<Maintenance>,
}

impl Vehicle {
    /// 查找指定类别的证件项（第一个匹配者）
    pub fn find_item(&self, kind: crate::DocumentKind) -> Option<&VehicleItem> {
        self.vehicle_items.iter().find(|i| kind.matches(&i.item_type))
    }
}

/// 车辆证件项：SOAT、技术机械检验、道路工具包、保险单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleItem {
    pub id: i64,
    pub vehicle_id: i64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub issue_date: String,
    /// 缺失或早于当前时间视为已过期
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// 保单号 / 检验编号
    pub item_identifier: String,
    pub created_at: String,
    pub updated_at: String,
}

// =========================================================
// 维护记录 (Maintenance)
// =========================================================

/// 维护记录类别，区分三种数据形状
///
/// 后端未来新增的未知类别统一归入 `Other`，避免整批反序列化失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    OilChange,
    TireChange,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: i64,
    pub vehicle_id: i64,
    /// 本次维护的总费用
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: MaintenanceKind,
    #[serde(default)]
    pub service_center: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub oil_change: Option<OilChange>,
    #[serde(default)]
    pub tire_change: Option<TireChange>,
    #[serde(default)]
    pub maintenance_items: Vec<MaintenanceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OilChange {
    pub current_mileage: i64,
    pub next_mileage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TireChange {
    pub last_change_date: String,
    pub next_change_date: String,
    #[serde(default)]
    pub current_mileage: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItem {
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub current_mileage: Option<i64>,
}

// =========================================================
// 用户证件 (UserItem)
// =========================================================

/// 不挂在车辆下的用户证件（目前只有驾驶证）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItem {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub issue_date: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    pub item_identifier: String,
    pub license_category: String,
    /// 公共 / 私人分类
    pub vehicle_type: String,
    pub created_at: String,
    pub updated_at: String,
}

// =========================================================
// 请求载荷 (Request Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub user_id: i64,
    pub plate: String,
    pub make: String,
    pub year: i32,
    pub dni_owner: String,
    pub dni_owner_type: String,
    pub vehicle_type: String,
    pub line: String,
    pub engine_displacement: i32,
    pub service_type: String,
    pub engine_id: String,
    #[serde(rename = "VIN")]
    pub vin: String,
    pub chassis_id: String,
    pub color: String,
    pub passenger_capacity: i32,
    pub fuel_type: String,
    pub registration_date: String,
    pub from: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleItemRequest {
    pub vehicle_id: i64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub item_identifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: i64,
    #[serde(rename = "type")]
    pub kind: MaintenanceKind,
    pub price: f64,
    #[serde(default)]
    pub service_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oil_change: Option<OilChangePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tire_change: Option<TireChangePayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance_items: Vec<MaintenanceItemPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OilChangePayload {
    pub current_mileage: i64,
    pub next_mileage: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TireChangePayload {
    pub last_change_date: String,
    pub next_change_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_mileage: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItemPayload {
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_mileage: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_wire_field_names() {
        let json = r#"{
            "id": 1, "userId": 7, "plate": "ABC123", "make": "Renault",
            "year": 2020, "dniOwner": "123", "dniOwnerType": "CC",
            "vehicleType": "car", "line": "Logan", "engineDisplacement": 1600,
            "serviceType": "private", "engineId": "E1", "VIN": "V1",
            "chassisId": "C1", "color": "rojo", "passengerCapacity": 5,
            "fuelType": "gasolina", "registrationDate": "2020-01-01",
            "from": "Medellin", "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z",
            "vehicleItems": [], "maintenances": [],
            "someFutureField": true
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.user_id, 7);
        assert_eq!(vehicle.vin, "V1");
        assert!(vehicle.vehicle_items.is_empty());
    }

    #[test]
    fn test_nested_collections_default_when_absent() {
        let json = r#"{
            "id": 1, "userId": 7, "plate": "ABC123", "make": "Renault",
            "year": 2020, "dniOwner": "123", "dniOwnerType": "CC",
            "vehicleType": "car", "line": "Logan", "engineDisplacement": 1600,
            "serviceType": "private", "engineId": "E1", "VIN": "V1",
            "chassisId": "C1", "color": "rojo", "passengerCapacity": 5,
            "fuelType": "gasolina", "registrationDate": "2020-01-01",
            "from": "Medellin", "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert!(vehicle.vehicle_items.is_empty());
        assert!(vehicle.maintenances.is_empty());
    }

    #[test]
    fn test_maintenance_kind_roundtrip() {
        assert_eq!(
            serde_json::to_string(&MaintenanceKind::OilChange).unwrap(),
            "\"oil_change\""
        );
        assert_eq!(
            serde_json::from_str::<MaintenanceKind>("\"tire_change\"").unwrap(),
            MaintenanceKind::TireChange
        );
        assert_eq!(
            serde_json::from_str::<MaintenanceKind>("\"other\"").unwrap(),
            MaintenanceKind::Other
        );
        // Unknown kinds from a newer backend are absorbed instead of
        // failing the whole vehicle fetch.
        assert_eq!(
            serde_json::from_str::<MaintenanceKind>("\"brake_change\"").unwrap(),
            MaintenanceKind::Other
        );
    }

    #[test]
    fn test_create_maintenance_skips_empty_shapes() {
        let req = CreateMaintenanceRequest {
            vehicle_id: 3,
            kind: MaintenanceKind::OilChange,
            price: 120000.0,
            service_center: None,
            oil_change: Some(OilChangePayload {
                current_mileage: 42000,
                next_mileage: 47000,
            }),
            tire_change: None,
            maintenance_items: Vec::new(),
        };

        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"oilChange\""));
        assert!(!json.contains("tireChange"));
        assert!(!json.contains("maintenanceItems"));
        assert!(json.contains("\"type\":\"oil_change\""));
    }
}
