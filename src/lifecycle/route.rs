use super::catalog_system::LifecycleError;
use std::fmt::{self, Display};
use std::str::FromStr;

/// The pages a user can navigate to, by URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `value-changes`: the quotation calculator.
    Quotation,
    /// `status-changes`: the registration form.
    Registration,
    /// `services`: the inventory manager.
    Inventory,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Quotation, Route::Registration, Route::Inventory];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Quotation => "value-changes",
            Route::Registration => "status-changes",
            Route::Inventory => "services",
        }
    }
}

impl FromStr for Route {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| LifecycleError::UnknownRoute(s.to_string()))
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
