//! Query parameters for list endpoints.

/// Pagination shared by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Offset of the first result.
    pub first: Option<u32>,
    /// Maximum number of results.
    pub max: Option<u32>,
}

impl PageQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "first", self.first);
        push(&mut pairs, "max", self.max);
        pairs
    }
}

/// Filters for `GET /admin/realms/{realm}/clients`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientQuery {
    /// Exact client ID to look for.
    pub client_id: Option<String>,
    /// Treat `client_id` as a search pattern instead of an exact match.
    pub search: Option<bool>,
    pub page: PageQuery,
}

impl ClientQuery {
    /// Query matching one client ID exactly.
    pub fn by_client_id(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "clientId", self.client_id.as_ref());
        push(&mut pairs, "search", self.search);
        pairs.extend(self.page.pairs());
        pairs
    }
}

/// Filters for `GET /admin/realms/{realm}/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Matches username, first/last name or email.
    pub search: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub page: PageQuery,
}

impl UserQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "search", self.search.as_ref());
        push(&mut pairs, "username", self.username.as_ref());
        push(&mut pairs, "email", self.email.as_ref());
        push(&mut pairs, "firstName", self.first_name.as_ref());
        push(&mut pairs, "lastName", self.last_name.as_ref());
        pairs.extend(self.page.pairs());
        pairs
    }
}

/// Filters for `GET /admin/realms/{realm}/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub client: Option<String>,
    /// Event types; repeated as `type=` parameters.
    pub types: Vec<String>,
    pub user: Option<String>,
    /// Inclusive lower bound, `yyyy-MM-dd`.
    pub date_from: Option<String>,
    /// Inclusive upper bound, `yyyy-MM-dd`.
    pub date_to: Option<String>,
    pub ip_address: Option<String>,
    pub page: PageQuery,
}

impl EventQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "client", self.client.as_ref());
        pairs.extend(self.types.iter().map(|t| ("type", t.clone())));
        push(&mut pairs, "user", self.user.as_ref());
        push(&mut pairs, "dateFrom", self.date_from.as_ref());
        push(&mut pairs, "dateTo", self.date_to.as_ref());
        push(&mut pairs, "ipAddress", self.ip_address.as_ref());
        pairs.extend(self.page.pairs());
        pairs
    }
}

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((name, value.to_string()));
    }
}
