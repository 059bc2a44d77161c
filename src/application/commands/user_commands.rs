//! User Commands

/// 注册命令
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub user_name: String,
    pub user_pass: String,
    pub user_email: String,
}

/// 登录命令
#[derive(Debug, Clone)]
pub struct Login {
    pub user_name: String,
    pub user_pass: String,
}

/// 登出命令
#[derive(Debug, Clone)]
pub struct Logout {
    pub token: String,
}

/// 修改密码命令（user_id 来自已解析的请求身份）
#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub user_id: i64,
    pub user_pass: String,
}

/// 注销账号命令
///
/// confirm 为显式确认参数；false 返回错误而非静默跳过
#[derive(Debug, Clone)]
pub struct DeleteAccount {
    pub user_id: i64,
    pub confirm: bool,
}
