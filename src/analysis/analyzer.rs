//! Structure analyzer.
//!
//! # Responsibilities
//! - Walk declared fields depth-first in declaration order
//! - Skip private fields
//! - Flatten embedded structures into the parent table
//! - Interpret tags: pattern rule first, then name override, then declared name
//!
//! # Design Decisions
//! - An embedded field is never addressable on its own
//! - Map vs scalar destination is decided by the declared shape only

use crate::analysis::tag::{parse_name_tag, parse_pattern_tag, NameTag};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::routing::table::{FieldPath, RoutingTable};
use crate::schema::{FieldDecl, FieldShape, PatternStruct, StructDecl};

/// Analyze `T` with the default analysis settings.
///
/// Useful to validate a structure's tags eagerly, e.g. in a unit test.
pub fn analyze<T: PatternStruct>() -> Result<RoutingTable, AnalysisError> {
    analyze_decl(&T::describe(), &AnalysisConfig::default())
}

/// Build the routing table for a declared structure.
pub fn analyze_decl(
    decl: &StructDecl,
    config: &AnalysisConfig,
) -> Result<RoutingTable, AnalysisError> {
    let mut table = RoutingTable::new(decl.name);
    walk(decl, &FieldPath::root(), config, &mut table)?;

    tracing::debug!(
        type_name = decl.name,
        known = table.known_fields().count(),
        dynamic_maps = table.dynamic_map_fields().len(),
        dynamic_scalars = table.dynamic_scalar_fields().len(),
        "Structure analyzed"
    );
    Ok(table)
}

fn walk(
    decl: &StructDecl,
    prefix: &FieldPath,
    config: &AnalysisConfig,
    table: &mut RoutingTable,
) -> Result<(), AnalysisError> {
    for (index, field) in decl.fields.iter().enumerate() {
        if !field.exported {
            continue;
        }

        let path = prefix.child(index);

        if let FieldShape::Embedded(describe) = field.shape {
            if field.pattern_tag.is_some() {
                return Err(AnalysisError::EmbeddedPattern {
                    field: qualified(decl, field),
                });
            }
            walk(&describe(), &path, config, table)?;
            continue;
        }

        if let Some(tag) = field.pattern_tag {
            let rule = parse_pattern_tag(&qualified(decl, field), tag, config)?;
            if field.shape.is_map() {
                table.push_dynamic_map(path, rule);
            } else {
                table.push_dynamic_scalar(path, rule);
            }
            continue;
        }

        match field.json_tag.map(parse_name_tag) {
            Some(NameTag::Ignore) => {}
            Some(NameTag::Rename(name)) => table.insert_known(name, path),
            Some(NameTag::Declared) | None => table.insert_known(field.name, path),
        }
    }

    Ok(())
}

fn qualified(decl: &StructDecl, field: &FieldDecl) -> String {
    format!("{}.{}", decl.name, field.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::Rule;
    use crate::schema::StructKind;

    fn inner_decl() -> StructDecl {
        StructDecl::named(
            "Inner",
            vec![
                FieldDecl::value("embedded_field").with_json_tag("embedded_field"),
                FieldDecl::value("dynamic_suffix")
                    .with_pattern_tag("_suffix,suffix")
                    .with_shape(FieldShape::Map),
            ],
        )
    }

    fn outer_decl() -> StructDecl {
        StructDecl::named(
            "Outer",
            vec![
                FieldDecl::value("inner").with_shape(FieldShape::Embedded(inner_decl)),
                FieldDecl::value("known").with_json_tag("known_field"),
                FieldDecl::value("ignored").with_json_tag("-"),
                FieldDecl::value("hidden").private(),
                FieldDecl::value("plain"),
                FieldDecl::value("dynamic")
                    .with_pattern_tag("dyn_,prefix")
                    .with_shape(FieldShape::Map),
                FieldDecl::value("scalar").with_pattern_tag("pfx_"),
            ],
        )
    }

    fn analyze_default(decl: &StructDecl) -> Result<RoutingTable, AnalysisError> {
        analyze_decl(decl, &AnalysisConfig::default())
    }

    #[test]
    fn test_known_fields() {
        let table = analyze_default(&outer_decl()).unwrap();

        assert_eq!(table.type_name(), "Outer");
        assert_eq!(table.known_field("known_field"), Some(&FieldPath::from(vec![1])));
        assert_eq!(table.known_field("plain"), Some(&FieldPath::from(vec![4])));
        assert_eq!(table.known_field("known"), None);
        assert_eq!(table.known_field("ignored"), None);
        assert_eq!(table.known_field("hidden"), None);
    }

    #[test]
    fn test_embedded_fields_are_flattened() {
        let table = analyze_default(&outer_decl()).unwrap();

        assert_eq!(
            table.known_field("embedded_field"),
            Some(&FieldPath::from(vec![0, 0]))
        );
        assert_eq!(table.known_field("inner"), None);

        let maps = table.dynamic_map_fields();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0].path, FieldPath::from(vec![0, 1]));
        assert_eq!(maps[0].rule, Rule::Suffix("_suffix".into()));
        assert_eq!(maps[1].path, FieldPath::from(vec![5]));
        assert_eq!(maps[1].rule, Rule::Prefix("dyn_".into()));
    }

    #[test]
    fn test_scalar_destination() {
        let table = analyze_default(&outer_decl()).unwrap();

        let scalars = table.dynamic_scalar_fields();
        assert_eq!(scalars.len(), 1);
        assert_eq!(scalars[0].path, FieldPath::from(vec![6]));
        assert_eq!(scalars[0].rule, Rule::Prefix("pfx_".into()));
    }

    #[test]
    fn test_pattern_tag_takes_priority_over_name() {
        let decl = StructDecl::named(
            "Both",
            vec![FieldDecl::value("field")
                .with_json_tag("field_name")
                .with_pattern_tag("f_,prefix")],
        );
        let table = analyze_default(&decl).unwrap();

        assert!(table.known_fields().next().is_none());
        assert_eq!(table.dynamic_scalar_fields().len(), 1);
    }

    #[test]
    fn test_private_embedded_is_skipped() {
        let decl = StructDecl::named(
            "Outer",
            vec![FieldDecl::value("inner")
                .with_shape(FieldShape::Embedded(inner_decl))
                .private()],
        );
        let table = analyze_default(&decl).unwrap();
        assert!(table.known_fields().next().is_none());
        assert!(table.is_exact_only());
    }

    #[test]
    fn test_embedded_with_pattern_is_rejected() {
        let decl = StructDecl::named(
            "Outer",
            vec![FieldDecl::value("inner")
                .with_shape(FieldShape::Embedded(inner_decl))
                .with_pattern_tag("x_")],
        );
        let err = analyze_default(&decl).unwrap_err();
        assert!(matches!(err, AnalysisError::EmbeddedPattern { .. }));
        assert_eq!(err.field(), "Outer.inner");
    }

    #[test]
    fn test_bad_tag_in_embedded_struct() {
        fn bad_inner() -> StructDecl {
            StructDecl::named(
                "BadInner",
                vec![FieldDecl::value("rule").with_pattern_tag("x,sideways")],
            )
        }
        let decl = StructDecl::named(
            "Outer",
            vec![FieldDecl::value("inner").with_shape(FieldShape::Embedded(bad_inner))],
        );

        let err = analyze_default(&decl).unwrap_err();
        assert_eq!(err.field(), "BadInner.rule");
    }

    #[test]
    fn test_reanalysis_is_equal() {
        let first = analyze_default(&outer_decl()).unwrap();
        let second = analyze_default(&outer_decl()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tuple_kind_still_analyzes() {
        let decl = StructDecl {
            name: "Pair",
            kind: StructKind::Tuple,
            fields: vec![FieldDecl::value("0"), FieldDecl::value("1")],
        };
        let table = analyze_default(&decl).unwrap();
        assert_eq!(table.known_fields().count(), 2);
    }
}
