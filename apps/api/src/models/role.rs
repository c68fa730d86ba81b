use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The interview roles the coach knows how to run.
/// Any label outside this set is treated as `General`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    SoftwareEngineer,
    ProductManager,
    DataAnalyst,
    DataScientist,
    UxDesigner,
    Marketing,
    Sales,
    #[default]
    General,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::SoftwareEngineer,
        Role::ProductManager,
        Role::DataAnalyst,
        Role::DataScientist,
        Role::UxDesigner,
        Role::Marketing,
        Role::Sales,
        Role::General,
    ];

    /// Display label, as sent by the client's role selector.
    pub fn label(self) -> &'static str {
        match self {
            Role::SoftwareEngineer => "Software Engineer",
            Role::ProductManager => "Product Manager",
            Role::DataAnalyst => "Data Analyst",
            Role::DataScientist => "Data Scientist",
            Role::UxDesigner => "UX Designer",
            Role::Marketing => "Marketing",
            Role::Sales => "Sales",
            Role::General => "General",
        }
    }

    /// Parses a client label. Unrecognized labels map to `General`.
    pub fn from_label(label: &str) -> Role {
        let label = label.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.label() == label)
            .unwrap_or(Role::General)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// Unknown or null roles deserialize to `General` instead of failing the request.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Role::from_label).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for role in Role::ALL {
            assert_eq!(Role::from_label(role.label()), role);
        }
    }

    #[test]
    fn test_unknown_label_falls_back_to_general() {
        assert_eq!(Role::from_label("Astronaut"), Role::General);
        assert_eq!(Role::from_label(""), Role::General);
        // Labels are case-sensitive, matching the client's selector values
        assert_eq!(Role::from_label("software engineer"), Role::General);
    }

    #[test]
    fn test_deserialize_null_and_unknown_roles() {
        let role: Role = serde_json::from_str("null").unwrap();
        assert_eq!(role, Role::General);
        let role: Role = serde_json::from_str("\"Chef\"").unwrap();
        assert_eq!(role, Role::General);
        let role: Role = serde_json::from_str("\"UX Designer\"").unwrap();
        assert_eq!(role, Role::UxDesigner);
    }
}
