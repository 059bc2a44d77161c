//! Novelry - 网络小说发布平台后端
//!
//! 架构设计: Hexagonal Architecture + CQRS
//!
//! 领域层 (domain/):
//! - User Context: 用户凭证上下文
//! - Novel Context: 小说投稿上下文
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, PasswordHasher, ImageStorage）
//! - Commands: 命令处理器（注册/登录/投稿/收藏/评论）
//! - Queries: 查询处理器（列表/详情）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + Bearer Token 会话认证
//! - Persistence: SQLite 存储
//! - Adapters: Argon2 密码哈希, 封面图片文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
