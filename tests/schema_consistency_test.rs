//! Schema-shape consistency: the static registry in `schema` must agree
//! with the SeaORM entities, and the relational pairings must be sound.

use bookstore::models::{author, book, customer, genre, order, order_detail, publisher, review};
use bookstore::schema::{self, ENTITIES, RelationKind};
use sea_orm::{EntityName, IdenStatic, Iterable, PrimaryKeyToColumn};

macro_rules! assert_entity_matches {
    ($name:literal, $module:ident) => {{
        let def = schema::entity($name).expect($name);

        assert_eq!(def.table, $module::Entity.table_name(), "{} table", $name);

        let columns: Vec<String> = $module::Column::iter()
            .map(|c| c.as_str().to_owned())
            .collect();
        let declared: Vec<String> = def.scalar_fields.iter().map(|f| f.to_string()).collect();
        assert_eq!(declared, columns, "{} scalar fields", $name);

        let pks: Vec<String> = $module::PrimaryKey::iter()
            .map(|pk| pk.into_column().as_str().to_owned())
            .collect();
        assert_eq!(vec![def.primary_key.to_string()], pks, "{} pk", $name);
    }};
}

#[test]
fn registry_matches_entities() {
    assert_entity_matches!("author", author);
    assert_entity_matches!("genre", genre);
    assert_entity_matches!("publisher", publisher);
    assert_entity_matches!("book", book);
    assert_entity_matches!("customer", customer);
    assert_entity_matches!("order", order);
    assert_entity_matches!("order_detail", order_detail);
    assert_entity_matches!("review", review);
}

#[test]
fn create_fields_are_scalars_minus_generated_pk() {
    for def in ENTITIES {
        let create = def.create_fields();
        assert!(
            !create.contains(&def.primary_key),
            "{}: create input must not carry the generated pk",
            def.name
        );
        for field in &create {
            assert!(
                def.scalar_fields.contains(field),
                "{}: unknown create field {}",
                def.name,
                field
            );
        }
        assert_eq!(create.len(), def.scalar_fields.len() - 1, "{}", def.name);
    }
}

#[test]
fn every_has_many_pairs_with_a_belongs_to() {
    for def in ENTITIES {
        for relation in def.relations {
            if relation.kind != RelationKind::HasMany {
                continue;
            }
            let target = schema::entity(relation.target)
                .unwrap_or_else(|| panic!("{}: unknown target {}", def.name, relation.target));
            let back = target
                .relations
                .iter()
                .find(|r| r.target == def.name && r.kind == RelationKind::BelongsTo)
                .unwrap_or_else(|| {
                    panic!("{} -> {}: missing belongs_to back-edge", def.name, target.name)
                });

            // The FK on the many side names the one side's pk and is one
            // of its scalar columns.
            let fk = back.foreign_key.expect("belongs_to carries a FK");
            assert_eq!(fk, def.primary_key, "{} -> {}", def.name, target.name);
            assert!(target.scalar_fields.contains(&fk));
        }
    }
}

#[test]
fn belongs_to_foreign_keys_are_declared_columns() {
    for def in ENTITIES {
        for relation in def.relations {
            if relation.kind == RelationKind::BelongsTo {
                let fk = relation.foreign_key.expect("belongs_to carries a FK");
                assert!(
                    def.scalar_fields.contains(&fk),
                    "{}: FK {} not declared",
                    def.name,
                    fk
                );
            } else {
                assert!(relation.foreign_key.is_none(), "{}", def.name);
            }
        }
    }
}

#[test]
fn where_unique_inputs_are_exactly_pk_plus_unique_columns() {
    let expectations = [
        ("author", vec!["author_id"]),
        ("genre", vec!["genre_id", "name"]),
        ("publisher", vec!["publisher_id"]),
        ("book", vec!["book_id", "isbn"]),
        ("customer", vec!["customer_id", "email"]),
        ("order", vec!["order_id"]),
        ("order_detail", vec!["order_detail_id"]),
        ("review", vec!["review_id"]),
    ];

    assert_eq!(expectations.len(), ENTITIES.len());
    for (name, expected) in expectations {
        let def = schema::entity(name).unwrap();
        assert_eq!(def.where_unique_fields(), expected, "{}", name);
    }
}

#[test]
fn join_entity_reaches_both_sides() {
    let detail = schema::entity("order_detail").unwrap();
    assert_eq!(
        detail.relation_to("order").map(|r| r.kind),
        Some(RelationKind::BelongsTo)
    );
    assert_eq!(
        detail.relation_to("book").map(|r| r.kind),
        Some(RelationKind::BelongsTo)
    );
}
