use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a row in the `users` table
    UserId
);

string_id!(
    /// Identifier of a row in the `lessons` table
    LessonId
);

string_id!(
    /// Identifier of a community wall post
    PostId
);

/// Role of a portal user (`user_role` in the store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location on the village map that can be unlocked
///
/// Variant order is map order; sets of features iterate in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureId {
    School,
    Library,
    Playground,
    TeachersRoom,
}

impl FeatureId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Library => "library",
            Self::Playground => "playground",
            Self::TeachersRoom => "teachers_room",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Library => "Library",
            Self::Playground => "Playground",
            Self::TeachersRoom => "Teacher's Room",
        }
    }

    pub fn all() -> &'static [FeatureId] {
        &[
            Self::School,
            Self::Library,
            Self::Playground,
            Self::TeachersRoom,
        ]
    }
}
