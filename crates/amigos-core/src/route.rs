use serde::Serialize;
use strum::{Display, EnumIter};

/// Pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Dashboard,
    Admin,
    Referral,
    Transactions,
    NotFound,
}

impl Route {
    /// Every routable page, excluding the catch-all.
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Dashboard,
        Route::Admin,
        Route::Referral,
        Route::Transactions,
    ];

    /// Matches a request path. Query string, fragment and a trailing slash
    /// are ignored; anything unknown resolves to [`Route::NotFound`].
    pub fn resolve(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Home,
            "/dashboard" => Route::Dashboard,
            "/admin" => Route::Admin,
            "/referral" => Route::Referral,
            "/transactions" => Route::Transactions,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::Admin => "/admin",
            Route::Referral => "/referral",
            Route::Transactions => "/transactions",
            Route::NotFound => "*",
        }
    }

    /// Pages that render a connect prompt instead of content when no wallet
    /// is connected.
    pub fn requires_wallet(self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Admin | Route::Referral | Route::Transactions
        )
    }

    pub fn requires_owner(self) -> bool {
        self == Route::Admin
    }

    /// Translation key of the navigation label.
    pub fn label_key(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Dashboard => "dashboard",
            Route::Admin => "admin",
            Route::Referral => "referral",
            Route::Transactions => "transactions",
            Route::NotFound => "notFound",
        }
    }
}
