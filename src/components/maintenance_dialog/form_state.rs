//! 维护表单状态模块
//!
//! 将零散的 signal 整合为 `MaintenanceFormState` 结构体，负责：
//! - 三种维护形状（机油/轮胎/其他）的数据持有与重置
//! - 输入联动（下次换油里程、下次换轮胎日期的建议值）
//! - 数据到请求对象的转换与校验

use chrono::{Months, NaiveDate};
use leptos::prelude::*;
use tucarga_shared::{
    CreateMaintenanceRequest, MaintenanceItemPayload, MaintenanceKind, OilChangePayload,
    TireChangePayload,
};

/// 建议的换油间隔（公里）
pub const OIL_INTERVAL_KM: i64 = 5000;

/// 根据当前里程建议下次换油里程（当前 + 5000 km）
pub fn suggest_next_mileage(current: &str) -> Option<String> {
    let km: i64 = strip_digits(current).parse().ok()?;
    Some((km + OIL_INTERVAL_KM).to_string())
}

/// 根据上次换轮胎日期建议下次日期（一年后）
///
/// 闰日按日历语义收敛到月末（2 月 29 日 -> 次年 2 月 28 日）。
pub fn suggest_next_change_date(last: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(last, "%Y-%m-%d").ok()?;
    let next = date.checked_add_months(Months::new(12))?;
    Some(next.format("%Y-%m-%d").to_string())
}

/// 价格输入联动：去掉非数字后按 es-CO 千位分隔重排
pub fn format_price_input(value: &str) -> String {
    let digits = strip_digits(value);
    match digits.parse::<i64>() {
        Ok(n) => tucarga_shared::format_thousands(n),
        Err(_) => String::new(),
    }
}

/// 把带分隔符的价格文本解析为数值
pub fn parse_price(value: &str) -> Option<f64> {
    strip_digits(value).parse::<f64>().ok()
}

fn strip_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 维护表单状态
///
/// 使用 `RwSignal` 因为它实现 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct MaintenanceFormState {
    pub kind: RwSignal<MaintenanceKind>,

    // 机油
    pub oil_current_mileage: RwSignal<String>,
    pub oil_next_mileage: RwSignal<String>,
    pub oil_price: RwSignal<String>,
    pub oil_service_center: RwSignal<String>,

    // 轮胎
    pub tire_last_date: RwSignal<String>,
    pub tire_next_date: RwSignal<String>,
    pub tire_current_mileage: RwSignal<String>,
    pub tire_service_center: RwSignal<String>,

    // 其他
    pub other_current_mileage: RwSignal<String>,
    pub other_service_center: RwSignal<String>,
    /// (描述, 价格文本) 列表，至少保留一行
    pub other_items: RwSignal<Vec<(String, String)>>,
}

impl MaintenanceFormState {
    pub fn new() -> Self {
        Self {
            kind: RwSignal::new(MaintenanceKind::OilChange),
            oil_current_mileage: RwSignal::new(String::new()),
            oil_next_mileage: RwSignal::new(String::new()),
            oil_price: RwSignal::new(String::new()),
            oil_service_center: RwSignal::new(String::new()),
            tire_last_date: RwSignal::new(String::new()),
            tire_next_date: RwSignal::new(String::new()),
            tire_current_mileage: RwSignal::new(String::new()),
            tire_service_center: RwSignal::new(String::new()),
            other_current_mileage: RwSignal::new(String::new()),
            other_service_center: RwSignal::new(String::new()),
            other_items: RwSignal::new(vec![(String::new(), String::new())]),
        }
    }

    /// 当前里程输入联动：同时写入建议的下次换油里程
    pub fn set_oil_current_mileage(&self, value: String) {
        if let Some(next) = suggest_next_mileage(&value) {
            self.oil_next_mileage.set(next);
        } else {
            self.oil_next_mileage.set(String::new());
        }
        self.oil_current_mileage.set(value);
    }

    /// 上次换轮胎日期联动：同时写入建议的下次日期
    pub fn set_tire_last_date(&self, value: String) {
        if let Some(next) = suggest_next_change_date(&value) {
            self.tire_next_date.set(next);
        }
        self.tire_last_date.set(value);
    }

    pub fn add_other_item(&self) {
        self.other_items
            .update(|items| items.push((String::new(), String::new())));
    }

    /// 最后一行不可删除
    pub fn remove_other_item(&self, index: usize) {
        self.other_items.update(|items| {
            if items.len() > 1 && index < items.len() {
                items.remove(index);
            }
        });
    }

    pub fn set_other_description(&self, index: usize, value: String) {
        self.other_items.update(|items| {
            if let Some(item) = items.get_mut(index) {
                item.0 = value;
            }
        });
    }

    pub fn set_other_price(&self, index: usize, value: String) {
        self.other_items.update(|items| {
            if let Some(item) = items.get_mut(index) {
                item.1 = format_price_input(&value);
            }
        });
    }

    /// "其他"项的价格合计
    pub fn other_total(&self) -> f64 {
        self.other_items
            .get()
            .iter()
            .filter_map(|(_, price)| parse_price(price))
            .sum()
    }

    /// 将表单状态转换为 API 请求对象
    ///
    /// 返回 Err 时携带给用户的校验文案，表单保持打开。
    pub fn to_request(&self, vehicle_id: i64) -> Result<CreateMaintenanceRequest, String> {
        let kind = self.kind.get();
        match kind {
            MaintenanceKind::OilChange => {
                let current = parse_price(&self.oil_current_mileage.get())
                    .ok_or("Ingresa el kilometraje actual")? as i64;
                let next = parse_price(&self.oil_next_mileage.get())
                    .ok_or("Ingresa el kilometraje del próximo cambio")?
                    as i64;
                let price =
                    parse_price(&self.oil_price.get()).ok_or("Ingresa el valor del cambio")?;

                Ok(CreateMaintenanceRequest {
                    vehicle_id,
                    kind,
                    price,
                    service_center: service_center_or_default(&self.oil_service_center.get()),
                    oil_change: Some(OilChangePayload {
                        current_mileage: current,
                        next_mileage: next,
                    }),
                    tire_change: None,
                    maintenance_items: Vec::new(),
                })
            }
            MaintenanceKind::TireChange => {
                let last = self.tire_last_date.get();
                let next = self.tire_next_date.get();
                if last.is_empty() || next.is_empty() {
                    return Err("Ingresa las fechas del cambio de llantas".to_string());
                }

                Ok(CreateMaintenanceRequest {
                    vehicle_id,
                    kind,
                    price: 0.0,
                    service_center: service_center_or_default(&self.tire_service_center.get()),
                    oil_change: None,
                    tire_change: Some(TireChangePayload {
                        last_change_date: last,
                        next_change_date: next,
                        current_mileage: parse_price(&self.tire_current_mileage.get())
                            .map(|v| v as i64),
                    }),
                    maintenance_items: Vec::new(),
                })
            }
            MaintenanceKind::Other => {
                let mileage = parse_price(&self.other_current_mileage.get()).map(|v| v as i64);
                let items: Vec<MaintenanceItemPayload> = self
                    .other_items
                    .get()
                    .iter()
                    .filter(|(description, _)| !description.trim().is_empty())
                    .map(|(description, price)| {
                        Ok(MaintenanceItemPayload {
                            description: description.trim().to_string(),
                            price: parse_price(price)
                                .ok_or("Ingresa el valor de cada mantenimiento")?,
                            current_mileage: mileage,
                        })
                    })
                    .collect::<Result<_, String>>()?;

                if items.is_empty() {
                    return Err("Agrega al menos un mantenimiento".to_string());
                }
                let total = items.iter().map(|i| i.price).sum();

                Ok(CreateMaintenanceRequest {
                    vehicle_id,
                    kind,
                    price: total,
                    service_center: service_center_or_default(&self.other_service_center.get()),
                    oil_change: None,
                    tire_change: None,
                    maintenance_items: items,
                })
            }
        }
    }
}

impl Default for MaintenanceFormState {
    fn default() -> Self {
        Self::new()
    }
}

fn service_center_or_default(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some("No especificado".to_string())
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_next_mileage() {
        assert_eq!(suggest_next_mileage("42000").as_deref(), Some("47000"));
        assert_eq!(suggest_next_mileage("42.000").as_deref(), Some("47000"));
        assert_eq!(suggest_next_mileage(""), None);
        assert_eq!(suggest_next_mileage("abc"), None);
    }

    #[test]
    fn test_suggest_next_change_date() {
        assert_eq!(
            suggest_next_change_date("2024-03-15").as_deref(),
            Some("2025-03-15")
        );
        // Leap day clamps to the end of February
        assert_eq!(
            suggest_next_change_date("2024-02-29").as_deref(),
            Some("2025-02-28")
        );
        assert_eq!(suggest_next_change_date("15/03/2024"), None);
    }

    #[test]
    fn test_price_input_formatting() {
        assert_eq!(format_price_input("120000"), "120.000");
        assert_eq!(format_price_input("$ 120.000"), "120.000");
        assert_eq!(format_price_input("abc"), "");
        assert_eq!(parse_price("120.000"), Some(120000.0));
        assert_eq!(parse_price(""), None);
    }
}
