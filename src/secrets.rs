//! 站点共享密码集合。

use std::fmt;

/// 启动时读取的只读密码集合，仅做成员判断。
#[derive(Clone, Default)]
pub struct SecretSet {
    secrets: Vec<String>,
}

impl SecretSet {
    /// 从配置槽位构建集合，忽略未设置与空字符串。
    pub fn from_slots<'a>(slots: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let secrets = slots
            .into_iter()
            .flatten()
            .filter(|secret| !secret.is_empty())
            .map(str::to_owned)
            .collect();
        Self { secrets }
    }

    /// 精确匹配（区分大小写，不裁剪空白）。
    pub fn contains(&self, candidate: &str) -> bool {
        self.secrets.iter().any(|secret| secret == candidate)
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }
}

// 密码不能出现在日志里。
impl fmt::Debug for SecretSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSet")
            .field("len", &self.secrets.len())
            .finish()
    }
}
