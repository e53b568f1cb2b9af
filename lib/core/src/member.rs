use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A parliament member, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub display_name: String,
}

impl Member {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Build a member from its name parts; display name is "given family"
    pub fn from_names(id: impl Into<String>, given: &str, family: &str) -> Self {
        Self::new(id, format!("{} {}", given, family))
    }
}

/// Member id -> member lookup
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: AHashMap<String, Member>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, replacing any previous entry with the same id
    pub fn insert(&mut self, member: Member) -> Option<Member> {
        self.members.insert(member.id.clone(), member)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    /// Display name for `id`, or the id itself when the member is unknown
    #[inline]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.members
            .get(id)
            .map(|m| m.display_name.as_str())
            .unwrap_or(id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }
}

impl FromIterator<Member> for MemberRegistry {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        let mut registry = MemberRegistry::new();
        for member in iter {
            registry.insert(member);
        }
        registry
    }
}
