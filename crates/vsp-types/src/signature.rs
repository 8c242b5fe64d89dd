//! Type signatures
//!
//! A [`TypeSignature`] is resolved once when a parameter field is created and
//! never re-parsed while the user types. Stage descriptors declare types in
//! their wire form: `"int"`, `"int|str"`, or `["list", "int"]`.

use crate::error::SignatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between union members in the wire form
pub const UNION_SEPARATOR: char = '|';

/// Name of the only container type
pub const LIST_TYPE: &str = "list";

/// Atomic type names with a registered handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AtomicType {
    /// Absence of a value
    #[serde(rename = "NoneType")]
    NoneType,
    /// Boolean, displayed as `True`/`False`
    #[serde(rename = "bool")]
    Bool,
    /// Floating point number
    #[serde(rename = "float")]
    Float,
    /// Non-negative integer with thousands grouping in display form
    #[serde(rename = "int")]
    Int,
    /// Free text
    #[serde(rename = "str")]
    Str,
    /// JSON-compatible key-value mapping
    #[serde(rename = "dict")]
    Dict,
}

impl AtomicType {
    /// All atomic types in registry order
    pub const ALL: [AtomicType; 6] = [
        AtomicType::NoneType,
        AtomicType::Bool,
        AtomicType::Float,
        AtomicType::Int,
        AtomicType::Str,
        AtomicType::Dict,
    ];

    /// Declared name of the type
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AtomicType::NoneType => "NoneType",
            AtomicType::Bool => "bool",
            AtomicType::Float => "float",
            AtomicType::Int => "int",
            AtomicType::Str => "str",
            AtomicType::Dict => "dict",
        }
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtomicType {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        AtomicType::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| {
                if name == LIST_TYPE {
                    SignatureError::NestedContainer(name.to_string())
                } else {
                    SignatureError::UnknownType(name.to_string())
                }
            })
    }
}

/// Declared type of a stage parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SignatureRepr", into = "SignatureRepr")]
pub enum TypeSignature {
    /// Single atomic type
    Atomic(AtomicType),
    /// Ordered union; the first member that validates wins
    Union(Vec<AtomicType>),
    /// `list` of an atomic or union element type
    List(Box<TypeSignature>),
}

impl TypeSignature {
    /// Create an atomic signature
    #[inline]
    #[must_use]
    pub const fn atomic(t: AtomicType) -> Self {
        Self::Atomic(t)
    }

    /// Create a union signature
    ///
    /// A single-member union collapses to [`TypeSignature::Atomic`].
    #[must_use]
    pub fn union(members: Vec<AtomicType>) -> Self {
        match members.as_slice() {
            [only] => Self::Atomic(*only),
            _ => Self::Union(members),
        }
    }

    /// Create a container signature
    ///
    /// # Errors
    /// Returns [`SignatureError::NestedContainer`] if `element` is itself a list.
    pub fn list(element: TypeSignature) -> Result<Self, SignatureError> {
        if element.is_list() {
            return Err(SignatureError::NestedContainer(element.to_string()));
        }
        Ok(Self::List(Box::new(element)))
    }

    /// Check if this is a container signature
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Ordered candidates tried by first-match dispatch
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        match self {
            Self::Atomic(t) => vec![Candidate::Atomic(*t)],
            Self::Union(members) => members.iter().copied().map(Candidate::Atomic).collect(),
            Self::List(element) => vec![Candidate::List(element)],
        }
    }

    /// Wire form for atomic and union signatures (`"int|str"`)
    ///
    /// Returns `None` for containers, whose wire form is a two-element array.
    #[must_use]
    pub fn wire_name(&self) -> Option<String> {
        match self {
            Self::Atomic(t) => Some(t.as_str().to_string()),
            Self::Union(members) => Some(
                members
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(&UNION_SEPARATOR.to_string()),
            ),
            Self::List(_) => None,
        }
    }

    fn union_of<'a>(
        source: &str,
        parts: impl Iterator<Item = &'a str>,
    ) -> Result<Self, SignatureError> {
        let mut members = Vec::new();
        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                return Err(SignatureError::EmptyMember(source.to_string()));
            }
            members.push(part.parse::<AtomicType>()?);
        }
        Ok(Self::union(members))
    }
}

/// One member of a signature considered during dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Atomic member
    Atomic(AtomicType),
    /// Container with its element signature
    List(&'a TypeSignature),
}

impl From<AtomicType> for TypeSignature {
    fn from(value: AtomicType) -> Self {
        Self::Atomic(value)
    }
}

impl FromStr for TypeSignature {
    type Err = SignatureError;

    /// Parses the wire form (`"int|str"`) and the rendered annotation form
    /// (`"List[int]"`, `"Union[int, str]"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = strip_wrapper(s, "List[") {
            return Self::list(inner.parse()?);
        }
        if let Some(inner) = strip_wrapper(s, "Union[") {
            return Self::union_of(s, inner.split(','));
        }
        Self::union_of(s, s.split(UNION_SEPARATOR))
    }
}

fn strip_wrapper<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)?.strip_suffix(']')
}

/// Serialized form: `"int|str"` or `["list", "int"]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SignatureRepr {
    Text(String),
    Container(String, String),
}

impl TryFrom<SignatureRepr> for TypeSignature {
    type Error = SignatureError;

    fn try_from(value: SignatureRepr) -> Result<Self, Self::Error> {
        match value {
            SignatureRepr::Text(text) => text.parse(),
            SignatureRepr::Container(kind, element) => {
                if kind != LIST_TYPE {
                    return Err(SignatureError::MalformedContainer(format!(
                        "expected \"{LIST_TYPE}\", got \"{kind}\""
                    )));
                }
                Self::list(element.parse()?)
            }
        }
    }
}

impl From<TypeSignature> for SignatureRepr {
    fn from(value: TypeSignature) -> Self {
        match value {
            TypeSignature::List(element) => SignatureRepr::Container(
                LIST_TYPE.to_string(),
                element.wire_name().unwrap_or_default(),
            ),
            other => SignatureRepr::Text(other.wire_name().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_atomic() {
        let sig: TypeSignature = "int".parse().unwrap();
        assert_eq!(sig, TypeSignature::Atomic(AtomicType::Int));
    }

    #[test]
    fn parse_union_keeps_order() {
        let sig: TypeSignature = "str|int".parse().unwrap();
        assert_eq!(
            sig,
            TypeSignature::Union(vec![AtomicType::Str, AtomicType::Int])
        );
    }

    #[test]
    fn single_member_union_collapses() {
        let sig = TypeSignature::union(vec![AtomicType::Bool]);
        assert_eq!(sig, TypeSignature::Atomic(AtomicType::Bool));
    }

    #[test]
    fn parse_rendered_forms() {
        let list: TypeSignature = "List[Union[int, NoneType]]".parse().unwrap();
        assert_eq!(
            list,
            TypeSignature::List(Box::new(TypeSignature::Union(vec![
                AtomicType::Int,
                AtomicType::NoneType
            ])))
        );
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(
            "integer".parse::<TypeSignature>(),
            Err(SignatureError::UnknownType("integer".to_string()))
        );
        assert!(matches!(
            "int|".parse::<TypeSignature>(),
            Err(SignatureError::EmptyMember(_))
        ));
    }

    #[test]
    fn rejects_list_in_union_and_nested_lists() {
        assert!(matches!(
            "list|str".parse::<TypeSignature>(),
            Err(SignatureError::NestedContainer(_))
        ));
        assert!(matches!(
            "List[List[int]]".parse::<TypeSignature>(),
            Err(SignatureError::NestedContainer(_))
        ));
    }

    #[test]
    fn deserialize_wire_forms() {
        let union: TypeSignature = serde_json::from_str("\"int|str\"").unwrap();
        assert_eq!(union.wire_name().as_deref(), Some("int|str"));

        let list: TypeSignature = serde_json::from_str("[\"list\", \"float\"]").unwrap();
        assert_eq!(
            list,
            TypeSignature::List(Box::new(TypeSignature::Atomic(AtomicType::Float)))
        );

        let bad = serde_json::from_str::<TypeSignature>("[\"tuple\", \"int\"]");
        assert!(bad.is_err());
    }

    #[test]
    fn serialize_container_as_pair() {
        let list = TypeSignature::list(AtomicType::Int.into()).unwrap();
        assert_eq!(serde_json::to_string(&list).unwrap(), "[\"list\",\"int\"]");
    }

    #[test]
    fn candidates_follow_declaration_order() {
        let sig: TypeSignature = "float|int|str".parse().unwrap();
        let names: Vec<_> = sig
            .candidates()
            .into_iter()
            .map(|c| match c {
                Candidate::Atomic(t) => t.as_str(),
                Candidate::List(_) => LIST_TYPE,
            })
            .collect();
        assert_eq!(names, vec!["float", "int", "str"]);
    }
}
