//! Per-table directive sets.
//!
//! Each submodule registers the directives of one data file and turns the
//! finished builder into its permanent table.

pub mod activation;
pub mod artifact;
pub mod brand;
pub mod curse;
pub mod ego;
pub mod kind;
pub mod object_base;
pub mod slay;

/// Appends a continuation line to `dest`, separated by a single space.
pub(crate) fn append_text(dest: &mut String, text: &str) {
    if !dest.is_empty() && !text.is_empty() {
        dest.push(' ');
    }
    dest.push_str(text);
}

/// The content tables, in load order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TableKind {
    ObjectBase,
    Slay,
    Brand,
    Curse,
    Activation,
    Object,
    EgoItem,
    Artifact,
}

impl TableKind {
    /// Every table in load order.
    pub const ORDER: [TableKind; 8] = [
        TableKind::ObjectBase,
        TableKind::Slay,
        TableKind::Brand,
        TableKind::Curse,
        TableKind::Activation,
        TableKind::Object,
        TableKind::EgoItem,
        TableKind::Artifact,
    ];

    /// Data file name, e.g. `ego_item.txt`.
    pub fn file_name(self) -> String {
        format!("{self}.txt")
    }

    /// Tables that must be ready before this one can be loaded.
    pub const fn dependencies(self) -> &'static [TableKind] {
        match self {
            Self::ObjectBase | Self::Slay | Self::Brand | Self::Curse | Self::Activation => &[],
            Self::Object => &[
                Self::ObjectBase,
                Self::Slay,
                Self::Brand,
                Self::Curse,
                Self::Activation,
            ],
            Self::EgoItem => &[Self::Object, Self::Slay, Self::Brand, Self::Curse],
            Self::Artifact => &[
                Self::ObjectBase,
                Self::Object,
                Self::Activation,
                Self::Slay,
                Self::Brand,
                Self::Curse,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_text() {
        let mut text = String::new();
        append_text(&mut text, "A long");
        append_text(&mut text, "description.");
        assert_eq!(text, "A long description.");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(TableKind::ObjectBase.file_name(), "object_base.txt");
        assert_eq!(TableKind::EgoItem.file_name(), "ego_item.txt");
        assert_eq!("artifact".parse::<TableKind>().ok(), Some(TableKind::Artifact));
    }

    #[test]
    fn test_dependencies_precede_dependents() {
        for (position, table) in TableKind::ORDER.iter().enumerate() {
            for dependency in table.dependencies() {
                let dep_position = TableKind::ORDER
                    .iter()
                    .position(|t| t == dependency)
                    .unwrap();
                assert!(dep_position < position, "{dependency} must load before {table}");
            }
        }
    }
}
