//! WhatsApp 出站链接模块
//!
//! 所有报价/服务请求统一通过 `wa.me` 深链在新标签页打开。
//! 消息文案按证件类型模板化，不是结构化协议。

use tucarga_shared::{DocumentKind, WHATSAPP_NUMBER};

/// 请求拖车服务
pub fn tow_service_message() -> String {
    "Hola quiero solicitar un servicio de grúa".to_string()
}

/// 按证件类型生成报价文案
pub fn quote_message(kind: DocumentKind, plate: &str) -> String {
    match kind {
        DocumentKind::Soat => format!(
            "Hola quiero cotizar el SOAT para el vehiculo de placa: {}",
            plate
        ),
        DocumentKind::Tecno => format!(
            "Hola quiero cotizar la revisión para el vehiculo de placa: {}",
            plate
        ),
        DocumentKind::RoadKit => format!(
            "Hola quiero cotizar un kit de carretera para el vehiculo de placa: {}",
            plate
        ),
        DocumentKind::Insurance => format!(
            "Hola quiero cotizar una póliza de seguro para el vehiculo de placa: {}",
            plate
        ),
    }
}

/// 轮胎报价文案
pub fn tires_quote_message(plate: &str) -> String {
    format!(
        "Hola quiero cotizar unas llantas para el vehiculo de placas: {}",
        plate
    )
}

/// 驾驶证报价文案
pub fn license_quote_message(identifier: &str, category: &str) -> String {
    format!(
        "Hola, quiero cotizar la licencia con identificación {} y categoría {}",
        identifier, category
    )
}

/// 构造 `wa.me` 深链（消息做百分号编码）
pub fn whatsapp_url(message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        WHATSAPP_NUMBER,
        urlencoding::encode(message)
    )
}

/// 在新浏览上下文中打开 WhatsApp 会话
pub fn open_whatsapp(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(&whatsapp_url(message), "_blank");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_messages_carry_the_plate() {
        let msg = quote_message(DocumentKind::Soat, "JNN813");
        assert_eq!(
            msg,
            "Hola quiero cotizar el SOAT para el vehiculo de placa: JNN813"
        );
        assert!(quote_message(DocumentKind::Tecno, "JNN813").contains("JNN813"));
    }

    #[test]
    fn test_license_message_carries_id_and_category() {
        let msg = license_quote_message("10203040", "B1");
        assert!(msg.contains("10203040"));
        assert!(msg.contains("B1"));
    }

    #[test]
    fn test_url_is_percent_encoded() {
        let url = whatsapp_url("Hola quiero");
        assert_eq!(
            url,
            "https://wa.me/573151957777?text=Hola%20quiero"
        );
        // Accented characters must survive the encoding round
        let url = whatsapp_url("grúa");
        assert!(url.ends_with("gr%C3%BAa"));
    }
}
