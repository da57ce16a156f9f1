//! Name-based special type rules.
//!
//! Each rule pairs a pattern over the lower-cased field name with the base
//! types it may apply to. A `latitude` column stored as text is not a
//! coordinate, so the base type check matters as much as the name.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{BaseType, SpecialType};

/// Which base types a naming rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseTypes {
    Float,
    IntOrFloat,
    IntOrText,
    Text,
    BoolOrInt,
}

impl BaseTypes {
    fn accepts(self, base_type: BaseType) -> bool {
        match self {
            BaseTypes::Float => base_type.is_float(),
            BaseTypes::IntOrFloat => base_type.is_numeric(),
            BaseTypes::IntOrText => base_type.is_integer() || base_type.is_text(),
            BaseTypes::Text => base_type.is_text(),
            BaseTypes::BoolOrInt => base_type == BaseType::Boolean || base_type.is_integer(),
        }
    }
}

/// A naming rule.
#[derive(Debug)]
struct NamingRule {
    pattern: Regex,
    base_types: BaseTypes,
    special_type: SpecialType,
}

impl NamingRule {
    fn new(pattern: &str, base_types: BaseTypes, special_type: SpecialType) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            base_types,
            special_type,
        }
    }

    fn matches(&self, name: &str, base_type: BaseType) -> bool {
        self.base_types.accepts(base_type) && self.pattern.is_match(name)
    }
}

/// Rules in match order; the first hit wins.
static NAMING_RULES: LazyLock<Vec<NamingRule>> = LazyLock::new(|| {
    use BaseTypes::*;
    use SpecialType as S;

    vec![
        NamingRule::new(r"^.*_lat$", Float, S::Latitude),
        NamingRule::new(r"^.*_lon$", Float, S::Longitude),
        NamingRule::new(r"^.*_lng$", Float, S::Longitude),
        NamingRule::new(r"^.*_long$", Float, S::Longitude),
        NamingRule::new(r"^.*_longitude$", Float, S::Longitude),
        NamingRule::new(r"^.*_latitude$", Float, S::Latitude),
        NamingRule::new(r"^.*_rating$", IntOrFloat, S::Score),
        NamingRule::new(r"^.*_type$", IntOrText, S::Category),
        NamingRule::new(r"^.*_url$", Text, S::Url),
        NamingRule::new(r"^active$", BoolOrInt, S::Category),
        NamingRule::new(r"^city$", Text, S::City),
        NamingRule::new(r"^country", Text, S::Country),
        NamingRule::new(r"^countrycode$", Text, S::Country),
        NamingRule::new(r"^currency$", IntOrText, S::Category),
        NamingRule::new(r"^first_name$", Text, S::Name),
        NamingRule::new(r"^full_name$", Text, S::Name),
        NamingRule::new(r"^gender$", IntOrText, S::Category),
        NamingRule::new(r"^last_name$", Text, S::Name),
        NamingRule::new(r"^lat$", Float, S::Latitude),
        NamingRule::new(r"^latitude$", Float, S::Latitude),
        NamingRule::new(r"^lon$", Float, S::Longitude),
        NamingRule::new(r"^lng$", Float, S::Longitude),
        NamingRule::new(r"^long$", Float, S::Longitude),
        NamingRule::new(r"^longitude$", Float, S::Longitude),
        NamingRule::new(r"^name$", Text, S::Name),
        NamingRule::new(r"^postal_code$", IntOrText, S::ZipCode),
        NamingRule::new(r"^rating$", IntOrFloat, S::Score),
        NamingRule::new(r"^role$", IntOrText, S::Category),
        NamingRule::new(r"^sex$", IntOrText, S::Category),
        NamingRule::new(r"^state$", Text, S::State),
        NamingRule::new(r"^status$", IntOrText, S::Category),
        NamingRule::new(r"^type$", IntOrText, S::Category),
        NamingRule::new(r"^url$", Text, S::Url),
        NamingRule::new(r"^zip_code$", IntOrText, S::ZipCode),
        NamingRule::new(r"^zipcode$", IntOrText, S::ZipCode),
    ]
});

/// Special type implied by a field's name, if any.
pub fn infer_from_name(name: &str, base_type: BaseType) -> Option<SpecialType> {
    let name = name.to_lowercase();

    if name == "id" {
        return Some(SpecialType::PrimaryKey);
    }

    NAMING_RULES
        .iter()
        .find(|rule| rule.matches(&name, base_type))
        .map(|rule| rule.special_type)
}
