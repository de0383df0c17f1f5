//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;
use tankas_shared::Id;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 控制面板 (需要认证)
    Dashboard,
    AllIssues,
    IssueDetails(Id),
    /// 个人资料 (需要认证)
    Profile,
    /// 上报问题 (需要认证)
    ReportIssue,
    /// 解决问题 (需要认证)
    ResolveIssue(Id),
    /// 志愿者讨论 (需要认证)
    VolunteerDiscussion(Id),
    /// 认捐 (需要认证)
    Pledge(Id),
    /// 页面未找到
    NotFound,
}

/// 解析 `/prefix/{id}` 中的 id，空 id 或多余层级视为无效
fn parse_id(rest: &str) -> Option<Id> {
    if rest.is_empty() || rest.contains('/') {
        None
    } else {
        Some(Id::from(rest))
    }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => return Self::Home,
            "/dashboard" => return Self::Dashboard,
            "/all-issues" => return Self::AllIssues,
            "/profile" => return Self::Profile,
            "/report-issue" => return Self::ReportIssue,
            _ => {}
        }

        let Some((prefix, rest)) = trimmed
            .strip_prefix('/')
            .and_then(|p| p.split_once('/'))
        else {
            return Self::NotFound;
        };

        let Some(id) = parse_id(rest) else {
            return Self::NotFound;
        };

        match prefix {
            "issue-details" => Self::IssueDetails(id),
            "resolve-issue" => Self::ResolveIssue(id),
            "volunteer-discussion" => Self::VolunteerDiscussion(id),
            "pledge" => Self::Pledge(id),
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::AllIssues => "/all-issues".to_string(),
            Self::IssueDetails(id) => format!("/issue-details/{}", id),
            Self::Profile => "/profile".to_string(),
            Self::ReportIssue => "/report-issue".to_string(),
            Self::ResolveIssue(id) => format!("/resolve-issue/{}", id),
            Self::VolunteerDiscussion(id) => format!("/volunteer-discussion/{}", id),
            Self::Pledge(id) => format!("/pledge/{}", id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Profile
                | Self::ReportIssue
                | Self::ResolveIssue(_)
                | Self::VolunteerDiscussion(_)
                | Self::Pledge(_)
        )
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Home
    }

    /// 守卫：放行返回 `Ok(self)`，被拦截返回 `Err(重定向目标)`
    pub fn guarded(self, is_authenticated: bool) -> Result<Self, Self> {
        if self.requires_auth() && !is_authenticated {
            Err(Self::auth_failure_redirect())
        } else {
            Ok(self)
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_routes() -> Vec<AppRoute> {
        let id = Id::from(42);
        vec![
            AppRoute::Home,
            AppRoute::Dashboard,
            AppRoute::AllIssues,
            AppRoute::IssueDetails(id.clone()),
            AppRoute::Profile,
            AppRoute::ReportIssue,
            AppRoute::ResolveIssue(id.clone()),
            AppRoute::VolunteerDiscussion(id.clone()),
            AppRoute::Pledge(id),
        ]
    }

    #[test]
    fn every_route_round_trips() {
        for route in all_routes() {
            assert_eq!(AppRoute::from_path(&route.to_path()), route, "{}", route);
        }
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(
            AppRoute::from_path("/issue-details/7/"),
            AppRoute::IssueDetails(Id::from(7))
        );
        assert_eq!(AppRoute::from_path("/all-issues?q=drain"), AppRoute::AllIssues);
    }

    #[test]
    fn unknown_or_empty_id_is_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/issue-details"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/issue-details//"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/pledge/1/extra"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/unknown/5"), AppRoute::NotFound);
    }

    #[test]
    fn protected_routes() {
        let protected: Vec<bool> = all_routes().iter().map(AppRoute::requires_auth).collect();
        assert_eq!(
            protected,
            vec![false, true, false, false, true, true, true, true, true]
        );
        assert!(!AppRoute::NotFound.requires_auth());
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Home);
    }

    #[test]
    fn guard_redirects_only_protected_routes() {
        assert_eq!(AppRoute::Profile.guarded(false), Err(AppRoute::Home));
        assert_eq!(AppRoute::Profile.guarded(true), Ok(AppRoute::Profile));
        assert_eq!(
            AppRoute::IssueDetails(Id::from(3)).guarded(false),
            Ok(AppRoute::IssueDetails(Id::from(3)))
        );
    }
}
