use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};

use crate::error::{Error, Result};

/// Characters allowed in a node name.
fn valid_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// The name of a widget node, used in logs and tree dumps. Names are
/// lowercase ASCII alphanumerics plus underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    /// Stored name.
    name: String,
}

impl NodeName {
    /// Validate a name.
    fn new(name: &str) -> Result<Self> {
        if name.is_empty() || !name.chars().all(valid_char) {
            return Err(Error::Parse(format!("invalid node name: {name:?}")));
        }
        Ok(Self { name: name.into() })
    }

    /// Munge an arbitrary string, usually a type name, into a valid node
    /// name: snake case, with invalid characters dropped.
    pub fn convert(name: &str) -> Self {
        let name: String = name
            .to_case(Case::Snake)
            .chars()
            .filter(|c| valid_char(*c))
            .collect();
        if name.is_empty() {
            Self {
                name: "node".into(),
            }
        } else {
            Self { name }
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl FromStr for NodeName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("text_edit".parse::<NodeName>().unwrap(), "text_edit");
        assert!("TextEdit".parse::<NodeName>().is_err());
        assert!("".parse::<NodeName>().is_err());
    }

    #[test]
    fn convert() {
        assert_eq!(NodeName::convert("TextEdit"), "text_edit");
        assert_eq!(NodeName::convert("List Box"), "list_box");
        assert_eq!(NodeName::convert("!!"), "node");
    }
}
