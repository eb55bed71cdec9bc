use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role {:?}", other)),
        }
    }
}

/// A user allowed to call the service.
#[derive(Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub name: String,
    pub password: String,
    pub roles: BTreeSet<Role>,
}

impl UserAccount {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Parses `name:password:role+role,name:password:role`.
    pub fn parse_list(list: &str) -> Result<Vec<UserAccount>, String> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("name", &self.name)
            .field("password", &"***")
            .field("roles", &self.roles)
            .finish()
    }
}

impl FromStr for UserAccount {
    type Err = String;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let Some((name, password, roles)) = entry
            .split_once(':')
            .and_then(|(name, rest)| rest.rsplit_once(':').map(|(pw, roles)| (name, pw, roles)))
        else {
            return Err(format!("expected name:password:roles, got {:?}", entry));
        };
        if name.is_empty() {
            return Err(format!("empty user name in {:?}", entry));
        }

        let roles = roles
            .split('+')
            .map(str::parse)
            .collect::<Result<BTreeSet<Role>, _>>()?;

        Ok(Self {
            name: name.to_owned(),
            password: password.to_owned(),
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_list() {
        let users = UserAccount::parse_list("admin:pass:admin+user, user0:pass:user").unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "admin");
        assert!(users[0].has_role(Role::Admin));
        assert!(users[0].has_role(Role::User));
        assert_eq!(users[1].name, "user0");
        assert!(!users[1].has_role(Role::Admin));
    }

    #[test]
    fn test_password_may_contain_colon() {
        let user: UserAccount = "bob:se:cret:user".parse().unwrap();
        assert_eq!(user.name, "bob");
        assert_eq!(user.password, "se:cret");
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!("admin:pass".parse::<UserAccount>().is_err());
        assert!(":pass:user".parse::<UserAccount>().is_err());
        assert!("admin:pass:root".parse::<UserAccount>().is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let user: UserAccount = "bob:hunter2:user".parse().unwrap();
        assert!(!format!("{:?}", user).contains("hunter2"));
    }
}
