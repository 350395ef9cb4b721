//! 车辆表单状态模块
//!
//! 新增车辆表单的数据持有与校验。校验逻辑在纯函数
//! [`build_request`] 中完成，表单结构只负责收集 signal 快照。

use leptos::prelude::*;
use tucarga_shared::CreateVehicleRequest;

/// 表单字段的纯数据快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFields {
    pub plate: String,
    pub make: String,
    pub line: String,
    pub year: String,
    pub dni_owner: String,
    pub dni_owner_type: String,
    pub vehicle_type: String,
    pub engine_displacement: String,
    pub service_type: String,
    pub engine_id: String,
    pub vin: String,
    pub chassis_id: String,
    pub color: String,
    pub passenger_capacity: String,
    pub fuel_type: String,
    pub registration_date: String,
    pub from: String,
}

/// 校验并构造创建车辆的请求
///
/// 校验失败时返回全部字段级消息，一次性展示给用户。
pub fn build_request(
    fields: &VehicleFields,
    user_id: i64,
) -> Result<CreateVehicleRequest, Vec<String>> {
    let mut errors = Vec::new();

    if fields.plate.trim().is_empty() {
        errors.push("La placa es obligatoria".to_string());
    }
    if fields.make.trim().is_empty() {
        errors.push("La marca es obligatoria".to_string());
    }
    if fields.line.trim().is_empty() {
        errors.push("La línea es obligatoria".to_string());
    }
    if fields.dni_owner.trim().is_empty() {
        errors.push("El documento del propietario es obligatorio".to_string());
    }
    if fields.registration_date.trim().is_empty() {
        errors.push("La fecha de matrícula es obligatoria".to_string());
    }

    let year = match fields.year.trim().parse::<i32>() {
        Ok(y) if (1900..=2100).contains(&y) => y,
        _ => {
            errors.push("El año debe estar entre 1900 y 2100".to_string());
            0
        }
    };
    let engine_displacement = match fields.engine_displacement.trim().parse::<i32>() {
        Ok(v) if v > 0 => v,
        _ => {
            errors.push("El cilindraje debe ser un número válido".to_string());
            0
        }
    };
    let passenger_capacity = match fields.passenger_capacity.trim().parse::<i32>() {
        Ok(v) if v > 0 => v,
        _ => {
            errors.push("El número de ocupantes debe ser un número válido".to_string());
            0
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CreateVehicleRequest {
        user_id,
        plate: fields.plate.trim().to_uppercase(),
        make: fields.make.trim().to_string(),
        year,
        dni_owner: fields.dni_owner.trim().to_string(),
        dni_owner_type: fields.dni_owner_type.clone(),
        vehicle_type: fields.vehicle_type.clone(),
        line: fields.line.trim().to_string(),
        engine_displacement,
        service_type: fields.service_type.clone(),
        engine_id: fields.engine_id.trim().to_string(),
        vin: fields.vin.trim().to_string(),
        chassis_id: fields.chassis_id.trim().to_string(),
        color: fields.color.trim().to_string(),
        passenger_capacity,
        fuel_type: fields.fuel_type.clone(),
        registration_date: fields.registration_date.clone(),
        from: fields.from.trim().to_string(),
    })
}

/// 车辆表单状态
///
/// 使用 `RwSignal` 因为它实现 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct VehicleFormState {
    pub plate: RwSignal<String>,
    pub make: RwSignal<String>,
    pub line: RwSignal<String>,
    pub year: RwSignal<String>,
    pub dni_owner: RwSignal<String>,
    pub dni_owner_type: RwSignal<String>,
    pub vehicle_type: RwSignal<String>,
    pub engine_displacement: RwSignal<String>,
    pub service_type: RwSignal<String>,
    pub engine_id: RwSignal<String>,
    pub vin: RwSignal<String>,
    pub chassis_id: RwSignal<String>,
    pub color: RwSignal<String>,
    pub passenger_capacity: RwSignal<String>,
    pub fuel_type: RwSignal<String>,
    pub registration_date: RwSignal<String>,
    pub from: RwSignal<String>,
}

impl VehicleFormState {
    pub fn new() -> Self {
        Self {
            plate: RwSignal::new(String::new()),
            make: RwSignal::new(String::new()),
            line: RwSignal::new(String::new()),
            year: RwSignal::new(String::new()),
            dni_owner: RwSignal::new(String::new()),
            dni_owner_type: RwSignal::new("CC".to_string()),
            vehicle_type: RwSignal::new("car".to_string()),
            engine_displacement: RwSignal::new(String::new()),
            service_type: RwSignal::new("private".to_string()),
            engine_id: RwSignal::new(String::new()),
            vin: RwSignal::new(String::new()),
            chassis_id: RwSignal::new(String::new()),
            color: RwSignal::new(String::new()),
            passenger_capacity: RwSignal::new(String::new()),
            fuel_type: RwSignal::new("gasolina".to_string()),
            registration_date: RwSignal::new(String::new()),
            from: RwSignal::new(String::new()),
        }
    }

    /// 收集当前输入为纯数据快照
    pub fn snapshot(&self) -> VehicleFields {
        VehicleFields {
            plate: self.plate.get(),
            make: self.make.get(),
            line: self.line.get(),
            year: self.year.get(),
            dni_owner: self.dni_owner.get(),
            dni_owner_type: self.dni_owner_type.get(),
            vehicle_type: self.vehicle_type.get(),
            engine_displacement: self.engine_displacement.get(),
            service_type: self.service_type.get(),
            engine_id: self.engine_id.get(),
            vin: self.vin.get(),
            chassis_id: self.chassis_id.get(),
            color: self.color.get(),
            passenger_capacity: self.passenger_capacity.get(),
            fuel_type: self.fuel_type.get(),
            registration_date: self.registration_date.get(),
            from: self.from.get(),
        }
    }
}

impl Default for VehicleFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> VehicleFields {
        VehicleFields {
            plate: "jnn813".to_string(),
            make: "Renault".to_string(),
            line: "Logan".to_string(),
            year: "2020".to_string(),
            dni_owner: "123456".to_string(),
            dni_owner_type: "CC".to_string(),
            vehicle_type: "car".to_string(),
            engine_displacement: "1600".to_string(),
            service_type: "private".to_string(),
            engine_id: "E-1".to_string(),
            vin: "VIN-1".to_string(),
            chassis_id: "CH-1".to_string(),
            color: "rojo".to_string(),
            passenger_capacity: "5".to_string(),
            fuel_type: "gasolina".to_string(),
            registration_date: "2020-01-15".to_string(),
            from: "Medellin".to_string(),
        }
    }

    #[test]
    fn test_valid_form_builds_request() {
        let req = build_request(&valid_fields(), 7).unwrap();
        assert_eq!(req.user_id, 7);
        assert_eq!(req.plate, "JNN813");
        assert_eq!(req.year, 2020);
        assert_eq!(req.engine_displacement, 1600);
    }

    #[test]
    fn test_missing_required_fields_collects_all_errors() {
        let mut fields = valid_fields();
        fields.plate = String::new();
        fields.make = "  ".to_string();

        let errors = build_request(&fields, 7).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("placa"));
        assert!(errors[1].contains("marca"));
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        let mut fields = valid_fields();
        fields.year = "1850".to_string();
        assert!(build_request(&fields, 7).is_err());

        fields.year = "no".to_string();
        assert!(build_request(&fields, 7).is_err());
    }

    #[test]
    fn test_numeric_fields_must_parse() {
        let mut fields = valid_fields();
        fields.engine_displacement = "mil seiscientos".to_string();
        fields.passenger_capacity = "0".to_string();

        let errors = build_request(&fields, 7).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
