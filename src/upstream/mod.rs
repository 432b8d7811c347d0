//! 上游模块：客户端构建与会话凭证获取
pub mod client;
pub mod session;

pub use self::client::{build_client, ClientOptions};
pub use self::session::{find_cookie, SessionToken, UpstreamSession};
