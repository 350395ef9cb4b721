//! API 客户端模块
//!
//! 对后端 REST 接口的统一封装。服务对象在应用启动时构造一次，
//! 认证令牌由认证模块写入；需要认证的请求在发出前先检查令牌，
//! 缺失时直接以客户端错误失败，不产生任何网络调用。

use gloo_net::http::{Request, Response};
use tucarga_shared::{
    ApiEnvelope, ApiErrorBody, CreateMaintenanceRequest, CreateVehicleItemRequest,
    CreateVehicleRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    ResetPasswordRequest, STORAGE_API_URL_KEY, SendCodeRequest, SignupRequest, User, UserItem,
    Vehicle, VerifyCodeRequest,
};

/// 默认后端地址，可通过 LocalStorage 覆盖
const DEFAULT_API_BASE: &str = "http://localhost:4000/api";

// =========================================================
// 错误类型
// =========================================================

/// API 调用错误
///
/// 三类错误（凭据缺失 / 网络传输 / 后端返回）统一归一为
/// 人类可读文案，由状态持有者或组件本地展示，绝不跨渲染边界抛出。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 本地没有令牌，请求未发出
    MissingToken,
    /// 网络/传输层失败
    Network(String),
    /// 后端返回的错误；校验失败时携带字段级消息列表
    Backend {
        status: u16,
        message: String,
        details: Vec<String>,
    },
    /// 响应体无法解析
    Decode(String),
}

impl ApiError {
    /// 字段级校验消息；非校验错误时为空
    pub fn details(&self) -> &[String] {
        match self {
            ApiError::Backend { details, .. } => details,
            _ => &[],
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingToken => write!(f, "Sesión no iniciada"),
            ApiError::Network(msg) => write!(f, "Error de conexión con el servidor: {}", msg),
            ApiError::Backend { message, .. } => write!(f, "{}", message),
            ApiError::Decode(msg) => write!(f, "Respuesta inesperada del servidor: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// =========================================================
// 服务对象
// =========================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TuCargaApi {
    base_url: String,
    token: Option<String>,
}

impl TuCargaApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    /// 从 LocalStorage 读取可选的地址覆盖，否则用默认地址
    pub fn from_storage() -> Self {
        use gloo_storage::Storage;
        let base_url = gloo_storage::LocalStorage::get::<String>(STORAGE_API_URL_KEY)
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base_url)
    }

    /// 写入/清除认证令牌（由认证模块调用）
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 认证头；令牌缺失时在发出请求前即失败
    fn bearer(&self) -> Result<String, ApiError> {
        self.token
            .as_ref()
            .map(|t| format!("Bearer {}", t))
            .ok_or(ApiError::MissingToken)
    }

    /// 把非 2xx 响应归一为 [`ApiError::Backend`]
    ///
    /// 后端校验失败时响应体为 `{ message, details[] }`，
    /// 否则取 `message` 或按状态码生成兜底文案。
    async fn backend_error(res: Response) -> ApiError {
        let status = res.status();
        let body: ApiErrorBody = res.json().await.unwrap_or_default();
        ApiError::Backend {
            status,
            message: body
                .message
                .unwrap_or_else(|| format!("Error del servidor ({})", status)),
            details: body.details.unwrap_or_default(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        authed: bool,
    ) -> Result<T, ApiError> {
        let mut req = Request::get(&self.url(path));
        if authed {
            req = req.header("Authorization", &self.bearer()?);
        }
        let res = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(Self::backend_error(res).await);
        }
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        authed: bool,
    ) -> Result<T, ApiError> {
        let mut req = Request::post(&self.url(path)).header("Content-Type", "application/json");
        if authed {
            req = req.header("Authorization", &self.bearer()?);
        }
        let res = req
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(Self::backend_error(res).await);
        }
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST 但不关心响应体内容
    async fn post_ack<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        authed: bool,
    ) -> Result<(), ApiError> {
        let mut req = Request::post(&self.url(path)).header("Content-Type", "application/json");
        if authed {
            req = req.header("Authorization", &self.bearer()?);
        }
        let res = req
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(Self::backend_error(res).await);
        }
        Ok(())
    }

    // =====================================================
    // 认证与账户
    // =====================================================

    /// 登录，返回不透明令牌
    pub async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", &LoginRequest { email, password }, false)
            .await
    }

    /// 注册新用户
    pub async fn signup(&self, req: &SignupRequest) -> Result<(), ApiError> {
        self.post_ack("/users", req, false).await
    }

    /// 发送邮箱验证码
    pub async fn send_verification_code(&self, email: String) -> Result<(), ApiError> {
        self.post_ack("/verification/send-code", &SendCodeRequest { email }, false)
            .await
    }

    /// 校验邮箱验证码
    pub async fn verify_code(&self, email: String, code: String) -> Result<(), ApiError> {
        self.post_ack("/verification/verify", &VerifyCodeRequest { email, code }, false)
            .await
    }

    /// 申请重置密码（发送邮件）
    pub async fn forgot_password(&self, email: String) -> Result<(), ApiError> {
        self.post_ack(
            "/password/forgot-password",
            &ForgotPasswordRequest { email },
            false,
        )
        .await
    }

    /// 用邮件中的 token 重置密码
    pub async fn reset_password(&self, token: String, new_password: String) -> Result<(), ApiError> {
        self.post_ack(
            "/password/reset-password",
            &ResetPasswordRequest {
                token,
                new_password,
            },
            false,
        )
        .await
    }

    // =====================================================
    // 用户与车辆数据
    // =====================================================

    /// 获取当前登录用户
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        let env: ApiEnvelope<User> = self.get_json("/users/me", true).await?;
        Ok(env.data)
    }

    /// 获取当前用户的全部车辆（含嵌套证件项与维护记录）
    pub async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let env: ApiEnvelope<Vec<Vehicle>> = self.get_json("/vehicles/user", true).await?;
        if !env.success {
            return Err(ApiError::Backend {
                status: 200,
                message: "No fue posible cargar los vehículos".to_string(),
                details: Vec::new(),
            });
        }
        Ok(env.data)
    }

    /// 创建车辆
    pub async fn create_vehicle(&self, req: &CreateVehicleRequest) -> Result<Vehicle, ApiError> {
        let env: ApiEnvelope<Vehicle> = self.post_json("/vehicles", req, true).await?;
        Ok(env.data)
    }

    /// 获取用户证件列表（驾驶证等，不挂在车辆下）
    pub async fn fetch_user_items(&self, user_id: i64) -> Result<Vec<UserItem>, ApiError> {
        let env: ApiEnvelope<Vec<UserItem>> = self
            .get_json(&format!("/user-items/user/{}", user_id), true)
            .await?;
        if !env.success {
            return Err(ApiError::Backend {
                status: 200,
                message: "No fue posible cargar los documentos del usuario".to_string(),
                details: Vec::new(),
            });
        }
        Ok(env.data)
    }

    /// 创建车辆证件项（SOAT、技术机械检验等）
    pub async fn create_vehicle_item(
        &self,
        req: &CreateVehicleItemRequest,
    ) -> Result<(), ApiError> {
        self.post_ack("/vehicle-items", req, true).await
    }

    /// 登记维护记录
    pub async fn create_maintenance(
        &self,
        req: &CreateMaintenanceRequest,
    ) -> Result<(), ApiError> {
        self.post_ack("/maintenances", req, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let api = TuCargaApi::new("http://localhost:4000/api/".to_string());
        assert_eq!(api.url("/users/me"), "http://localhost:4000/api/users/me");
        assert_eq!(api.url("users/me"), "http://localhost:4000/api/users/me");
    }

    #[test]
    fn test_bearer_requires_token() {
        let mut api = TuCargaApi::new("http://localhost:4000/api".to_string());
        assert_eq!(api.bearer(), Err(ApiError::MissingToken));

        api.set_token(Some("abc".to_string()));
        assert_eq!(api.bearer().unwrap(), "Bearer abc");

        // Logging out reverts protected calls to the client-side error
        api.set_token(None);
        assert_eq!(api.bearer(), Err(ApiError::MissingToken));
    }

    #[test]
    fn test_error_details_only_for_backend_errors() {
        let err = ApiError::Backend {
            status: 400,
            message: "Error de validación".into(),
            details: vec!["plate requerida".into()],
        };
        assert_eq!(err.details(), ["plate requerida".to_string()]);
        assert!(ApiError::MissingToken.details().is_empty());
    }
}
