//! 维护报告模块
//!
//! 将车辆的三种维护记录形状（机油、轮胎、其他）摊平为统一的报告行，
//! 按创建时间倒序排列。排序使用稳定排序：时间戳相同的行保持摊平时的
//! 原始顺序。

use crate::document::parse_date;
use crate::entities::{Maintenance, MaintenanceKind};

/// 报告中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub description: String,
    /// 费用；轮胎更换记录不单列费用
    pub price: Option<f64>,
    /// 记录时的里程数
    pub mileage: Option<i64>,
    /// 父维护记录的创建时间（ISO 字符串，展示用）
    pub recorded_at: String,
    /// 排序键：创建时间的毫秒时间戳，无法解析时排到最后
    sort_key: i64,
}

impl ReportRow {
    fn new(
        description: impl Into<String>,
        price: Option<f64>,
        mileage: Option<i64>,
        maintenance: &Maintenance,
    ) -> Self {
        Self {
            description: description.into(),
            price,
            mileage,
            recorded_at: maintenance.created_at.clone(),
            sort_key: parse_date(&maintenance.created_at)
                .map(|d| d.timestamp_millis())
                .unwrap_or(i64::MIN),
        }
    }
}

/// 以 es-CO 习惯的千位分隔（点号）格式化数字
pub fn format_thousands(n: i64) -> String {
    let raw = n.abs().to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// 摊平维护记录集合为报告行，创建时间倒序
pub fn report_rows(maintenances: &[Maintenance]) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = maintenances
        .iter()
        .flat_map(|m| match m.kind {
            MaintenanceKind::OilChange => m
                .oil_change
                .as_ref()
                .map(|oil| {
                    ReportRow::new("Aceite", Some(m.price), Some(oil.current_mileage), m)
                })
                .into_iter()
                .collect::<Vec<_>>(),
            MaintenanceKind::TireChange => m
                .tire_change
                .as_ref()
                .map(|tire| ReportRow::new("Llantas", None, tire.current_mileage, m))
                .into_iter()
                .collect(),
            MaintenanceKind::Other => m
                .maintenance_items
                .iter()
                .map(|item| {
                    ReportRow::new(
                        item.description.clone(),
                        Some(item.price),
                        item.current_mileage,
                        m,
                    )
                })
                .collect(),
        })
        .collect();

    // sort_by 是稳定排序，时间戳相等时保留摊平顺序
    rows.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MaintenanceItem, OilChange, TireChange};

    fn make_maintenance(id: i64, kind: MaintenanceKind, created_at: &str) -> Maintenance {
        Maintenance {
            id,
            vehicle_id: 1,
            price: 100.0,
            kind,
            service_center: None,
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
            oil_change: None,
            tire_change: None,
            maintenance_items: Vec::new(),
        }
    }

    fn oil(id: i64, created_at: &str) -> Maintenance {
        let mut m = make_maintenance(id, MaintenanceKind::OilChange, created_at);
        m.oil_change = Some(OilChange {
            current_mileage: 40000,
            next_mileage: 45000,
        });
        m
    }

    fn tires(id: i64, created_at: &str) -> Maintenance {
        let mut m = make_maintenance(id, MaintenanceKind::TireChange, created_at);
        m.tire_change = Some(TireChange {
            last_change_date: "2024-01-01".into(),
            next_change_date: "2025-01-01".into(),
            current_mileage: None,
        });
        m
    }

    fn other(id: i64, created_at: &str, descriptions: &[&str]) -> Maintenance {
        let mut m = make_maintenance(id, MaintenanceKind::Other, created_at);
        m.maintenance_items = descriptions
            .iter()
            .map(|d| MaintenanceItem {
                description: d.to_string(),
                price: 50.0,
                current_mileage: Some(41000),
            })
            .collect();
        m
    }

    #[test]
    fn test_flattens_all_three_shapes() {
        let records = vec![
            oil(1, "2024-03-01T10:00:00.000Z"),
            tires(2, "2024-03-02T10:00:00.000Z"),
            other(3, "2024-03-03T10:00:00.000Z", &["Frenos", "Filtro"]),
        ];

        let rows = report_rows(&records);
        assert_eq!(rows.len(), 4);
        // Most recent first
        assert_eq!(rows[0].description, "Frenos");
        assert_eq!(rows[1].description, "Filtro");
        assert_eq!(rows[2].description, "Llantas");
        assert_eq!(rows[3].description, "Aceite");
    }

    #[test]
    fn test_tire_rows_have_no_price() {
        let rows = report_rows(&[tires(1, "2024-03-02T10:00:00.000Z")]);
        assert_eq!(rows[0].price, None);
        assert_eq!(rows[0].mileage, None);
    }

    #[test]
    fn test_oil_row_carries_total_price_and_mileage() {
        let rows = report_rows(&[oil(1, "2024-03-01T10:00:00.000Z")]);
        assert_eq!(rows[0].price, Some(100.0));
        assert_eq!(rows[0].mileage, Some(40000));
    }

    #[test]
    fn test_equal_timestamps_keep_flattening_order() {
        let ts = "2024-03-01T10:00:00.000Z";
        let records = vec![
            other(1, ts, &["Primero", "Segundo"]),
            other(2, ts, &["Tercero"]),
        ];

        let rows = report_rows(&records);
        let order: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(order, vec!["Primero", "Segundo", "Tercero"]);
    }

    #[test]
    fn test_record_without_shape_payload_is_skipped() {
        // An oil_change record whose oilChange payload is missing
        // contributes no row instead of a half-empty one.
        let records = vec![make_maintenance(1, MaintenanceKind::OilChange, "2024-03-01")];
        assert!(report_rows(&records).is_empty());
    }

    #[test]
    fn test_unparsable_created_at_sorts_last() {
        let records = vec![
            make_maintenance_with_items("???"),
            make_maintenance_with_items("2024-03-01T10:00:00.000Z"),
        ];
        let rows = report_rows(&records);
        assert_eq!(rows[0].recorded_at, "2024-03-01T10:00:00.000Z");
        assert_eq!(rows[1].recorded_at, "???");
    }

    fn make_maintenance_with_items(created_at: &str) -> Maintenance {
        other(9, created_at, &["x"])
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(-45000), "-45.000");
    }
}
