//! 证件状态模块
//!
//! 提供两个核心概念：
//! - `DocumentStatus`: 证件的到期状态，由到期日期和当前时刻纯函数推导
//! - `DocumentKind`: 车辆证件的类别及其匹配/展示规则
//!
//! 状态永远不落库，只在读取/渲染时计算。

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// 到期预警窗口（天）：剩余天数不超过该值时标记为“即将到期”
pub const EXPIRY_WARNING_DAYS: i64 = 7;

const DAY_MS: i64 = 86_400_000;

// =========================================================
// DocumentStatus - 到期状态
// =========================================================

/// 证件到期状态
///
/// 前三个状态由 [`status_from_expiry`] 根据日期推导；
/// `SinInformacion` 由调用方在记录本身不存在时使用，
/// 与“记录存在但日期已过期”严格区分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// 有效
    Vigente,
    /// 即将到期（剩余不超过 7 天）
    ProxVencer,
    /// 已过期（含日期缺失或无法解析）
    Vencido,
    /// 无信息（记录不存在）
    SinInformacion,
}

impl DocumentStatus {
    /// 界面展示用的西语标签
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Vigente => "Vigente",
            DocumentStatus::ProxVencer => "Prox. vencer",
            DocumentStatus::Vencido => "Vencido",
            DocumentStatus::SinInformacion => "Sin informacion",
        }
    }
}

/// 解析后端传来的日期字符串
///
/// 接受 RFC 3339（`2025-08-10T00:00:00.000Z`）和裸日期（`2025-08-10`，
/// 按 UTC 零点处理）两种形状。解析失败返回 None。
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// 由到期日期推导证件状态
///
/// 规则（与既有消费者保持行为兼容，阈值与取整方式不可改动）：
/// - 日期缺失或无法解析 → `Vencido`
/// - 当前时刻严格晚于到期时刻 → `Vencido`
/// - 否则按毫秒差向上取整为整天数，`<= 7` 天 → `ProxVencer`，
///   再大 → `Vigente`
pub fn status_from_expiry(expiry: Option<&str>, now: DateTime<Utc>) -> DocumentStatus {
    let Some(exp) = expiry.and_then(parse_date) else {
        return DocumentStatus::Vencido;
    };

    if now > exp {
        return DocumentStatus::Vencido;
    }

    let diff_ms = (exp - now).num_milliseconds();
    // `i64::div_ceil` is unstable on stable toolchains; `diff_ms >= 0` and
    // `DAY_MS > 0` are guaranteed here, so the unsigned `div_ceil` is exact.
    let days_left = (diff_ms as u64).div_ceil(DAY_MS as u64) as i64;

    if days_left <= EXPIRY_WARNING_DAYS {
        DocumentStatus::ProxVencer
    } else {
        DocumentStatus::Vigente
    }
}

/// 把日期字符串格式化为西语 "dd Mes yyyy"
///
/// 缺失或无法解析时返回 "No disponible"。
pub fn format_date_es(date_str: &str) -> String {
    const MONTHS: [&str; 12] = [
        "Enero",
        "Febrero",
        "Marzo",
        "Abril",
        "Mayo",
        "Junio",
        "Julio",
        "Agosto",
        "Septiembre",
        "Octubre",
        "Noviembre",
        "Diciembre",
    ];

    use chrono::Datelike;
    match parse_date(date_str) {
        Some(d) => format!(
            "{:02} {} {}",
            d.day(),
            MONTHS[d.month0() as usize],
            d.year()
        ),
        None => "No disponible".to_string(),
    }
}

// =========================================================
// DocumentKind - 车辆证件类别
// =========================================================

/// 车辆证件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// 强制三者险保单
    Soat,
    /// 技术机械检验
    Tecno,
    /// 道路安全工具包
    RoadKit,
    /// 商业保险单
    Insurance,
}

impl DocumentKind {
    /// 判断证件项的 `type` 字符串是否属于该类别
    ///
    /// 匹配不区分大小写；`Tecno` 按子串匹配（后端存储
    /// "tecnomecanica" 等变体），其余按全等匹配。
    pub fn matches(&self, item_type: &str) -> bool {
        let t = item_type.to_lowercase();
        match self {
            DocumentKind::Soat => t == "soat",
            DocumentKind::Tecno => t.contains("tecno"),
            DocumentKind::RoadKit => t == "roadkit",
            DocumentKind::Insurance => t == "insurance",
        }
    }

    /// 创建证件项时发送给后端的 `type` 值
    pub fn wire_type(&self) -> &'static str {
        match self {
            DocumentKind::Soat => "soat",
            DocumentKind::Tecno => "tecno",
            DocumentKind::RoadKit => "roadkit",
            DocumentKind::Insurance => "insurance",
        }
    }

    /// 界面展示标题
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Soat => "Seguro SOAT",
            DocumentKind::Tecno => "Tecnico mecánica",
            DocumentKind::RoadKit => "Kit de carretera",
            DocumentKind::Insurance => "Polizas de seguro",
        }
    }

    /// 证件编号字段的展示名（保单号 / 检验编号）
    pub fn identifier_label(&self) -> &'static str {
        match self {
            DocumentKind::Soat => "Nº Póliza SOAT",
            DocumentKind::Tecno => "Nº Revisión",
            DocumentKind::RoadKit => "Nº Registro",
            DocumentKind::Insurance => "Nº Póliza",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn iso(dt: DateTime<Utc>) -> String {
        dt.to_rfc3339()
    }

    #[test]
    fn test_missing_or_bad_date_is_vencido() {
        assert_eq!(status_from_expiry(None, now()), DocumentStatus::Vencido);
        assert_eq!(
            status_from_expiry(Some("not-a-date"), now()),
            DocumentStatus::Vencido
        );
        assert_eq!(status_from_expiry(Some(""), now()), DocumentStatus::Vencido);
    }

    #[test]
    fn test_past_date_is_vencido() {
        let exp = iso(now() - Duration::days(1));
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::Vencido
        );
        // One millisecond in the past already counts as expired
        let exp = iso(now() - Duration::milliseconds(1));
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::Vencido
        );
    }

    #[test]
    fn test_warning_window_boundaries() {
        // Exactly 7 days out -> warning
        let exp = iso(now() + Duration::days(7));
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::ProxVencer
        );
        // Exactly 8 days out -> still valid
        let exp = iso(now() + Duration::days(8));
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::Vigente
        );
        // 7 days + 1 ms rounds up to 8 days
        let exp = iso(now() + Duration::days(7) + Duration::milliseconds(1));
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::Vigente
        );
    }

    #[test]
    fn test_three_days_out_is_warning() {
        let exp = iso(now() + Duration::days(3));
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::ProxVencer
        );
    }

    #[test]
    fn test_same_instant_is_warning() {
        // now == expiry is not strictly after, 0 days left -> warning
        let exp = iso(now());
        assert_eq!(
            status_from_expiry(Some(&exp), now()),
            DocumentStatus::ProxVencer
        );
    }

    #[test]
    fn test_bare_date_parses_as_utc_midnight() {
        let parsed = parse_date("2025-08-10").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 8, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_kind_matching() {
        assert!(DocumentKind::Soat.matches("SOAT"));
        assert!(DocumentKind::Soat.matches("soat"));
        assert!(!DocumentKind::Soat.matches("soat2"));

        assert!(DocumentKind::Tecno.matches("tecno"));
        assert!(DocumentKind::Tecno.matches("Tecnomecanica"));
        assert!(!DocumentKind::Tecno.matches("roadkit"));

        assert!(DocumentKind::RoadKit.matches("RoadKit"));
        assert!(DocumentKind::Insurance.matches("insurance"));
    }

    #[test]
    fn test_format_date_es() {
        assert_eq!(format_date_es("2025-08-10"), "10 Agosto 2025");
        assert_eq!(
            format_date_es("2024-01-05T00:00:00.000Z"),
            "05 Enero 2024"
        );
        assert_eq!(format_date_es(""), "No disponible");
    }

    #[test]
    fn test_labels() {
        assert_eq!(DocumentStatus::ProxVencer.label(), "Prox. vencer");
        assert_eq!(DocumentStatus::SinInformacion.label(), "Sin informacion");
    }
}
