use super::client::ApiClient;
use super::error::ApiError;
use std::collections::BTreeSet;

pub const PERMISSIONS_ENDPOINT: &str = "permissions/";

/// Flat set of permission strings granted to the current user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    grants: BTreeSet<String>,
}

impl Permissions {
    pub fn fetch(client: &ApiClient) -> Result<Self, ApiError> {
        let grants: Vec<String> = client.get(PERMISSIONS_ENDPOINT)?;
        log::info!("{} permissions granted", grants.len());
        Ok(Permissions::from_iter(grants))
    }

    pub fn allows(&self, permission: &str) -> bool {
        self.grants.contains(permission)
    }

    /// Fail with a not-permitted error unless `permission` is granted
    pub fn require(&self, permission: &str) -> Result<(), ApiError> {
        if self.allows(permission) {
            Ok(())
        } else {
            Err(ApiError::NotPermitted(permission.to_string()))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.grants.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Permissions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Permissions {
            grants: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_grants() {
        let perms: Permissions = ["view_expense", "add_expense", "view_expense"]
            .into_iter()
            .collect();
        assert_eq!(perms.len(), 2);
        assert!(perms.allows("view_expense"));
        assert!(!perms.allows("view_salary"));
        assert!(perms.require("add_expense").is_ok());
        assert!(matches!(
            perms.require("view_salary"),
            Err(ApiError::NotPermitted(p)) if p == "view_salary"
        ));
    }

    #[test]
    fn listed_in_sorted_order() {
        let perms: Permissions = ["view_salary", "view_credit"].into_iter().collect();
        assert_eq!(perms.iter().collect::<Vec<_>>(), vec!["view_credit", "view_salary"]);
    }
}
