//! Static schema metadata
//!
//! One descriptor per entity: table name, primary key, scalar fields,
//! create-input fields, unique columns, and relations. Repositories and
//! services stay hand-written; this registry exists so the shape of the
//! schema can be validated in one place instead of being implicit in
//! eight entity files.

/// Relation cardinality as modeled here (no many-to-many).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    BelongsTo,
    HasMany,
}

/// One foreign-key-based association between two entities.
#[derive(Debug, Clone, Copy)]
pub struct RelationInfo {
    /// Target entity name (as in `EntityDef::name`)
    pub target: &'static str,
    pub kind: RelationKind,
    /// FK column on the owning side, `None` for `HasMany`
    pub foreign_key: Option<&'static str>,
}

/// Static description of one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    /// Autogenerated integer primary key
    pub primary_key: &'static str,
    /// All scalar columns, in declaration order, primary key included
    pub scalar_fields: &'static [&'static str],
    /// Unique columns besides the primary key
    pub unique_fields: &'static [&'static str],
    pub relations: &'static [RelationInfo],
}

impl EntityDef {
    /// Fields accepted when creating a row: every scalar field except the
    /// autogenerated primary key. FK connectors are plain scalars here.
    pub fn create_fields(&self) -> Vec<&'static str> {
        self.scalar_fields
            .iter()
            .copied()
            .filter(|f| *f != self.primary_key)
            .collect()
    }

    /// Fields usable to address a single row: primary key plus uniques.
    pub fn where_unique_fields(&self) -> Vec<&'static str> {
        let mut fields = vec![self.primary_key];
        fields.extend_from_slice(self.unique_fields);
        fields
    }

    pub fn relation_to(&self, target: &str) -> Option<&RelationInfo> {
        self.relations.iter().find(|r| r.target == target)
    }
}

pub const ENTITIES: &[EntityDef] = &[
    EntityDef {
        name: "author",
        table: "authors",
        primary_key: "author_id",
        scalar_fields: &["author_id", "first_name", "last_name", "bio"],
        unique_fields: &[],
        relations: &[RelationInfo {
            target: "book",
            kind: RelationKind::HasMany,
            foreign_key: None,
        }],
    },
    EntityDef {
        name: "genre",
        table: "genres",
        primary_key: "genre_id",
        scalar_fields: &["genre_id", "name", "description"],
        unique_fields: &["name"],
        relations: &[RelationInfo {
            target: "book",
            kind: RelationKind::HasMany,
            foreign_key: None,
        }],
    },
    EntityDef {
        name: "publisher",
        table: "publishers",
        primary_key: "publisher_id",
        scalar_fields: &[
            "publisher_id",
            "publisher_name",
            "contact_name",
            "phone_number",
        ],
        unique_fields: &[],
        relations: &[RelationInfo {
            target: "book",
            kind: RelationKind::HasMany,
            foreign_key: None,
        }],
    },
    EntityDef {
        name: "book",
        table: "books",
        primary_key: "book_id",
        scalar_fields: &[
            "book_id",
            "title",
            "description",
            "price",
            "publish_date",
            "isbn",
            "author_id",
            "genre_id",
            "publisher_id",
        ],
        unique_fields: &["isbn"],
        relations: &[
            RelationInfo {
                target: "author",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("author_id"),
            },
            RelationInfo {
                target: "genre",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("genre_id"),
            },
            RelationInfo {
                target: "publisher",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("publisher_id"),
            },
            RelationInfo {
                target: "order_detail",
                kind: RelationKind::HasMany,
                foreign_key: None,
            },
            RelationInfo {
                target: "review",
                kind: RelationKind::HasMany,
                foreign_key: None,
            },
        ],
    },
    EntityDef {
        name: "customer",
        table: "customers",
        primary_key: "customer_id",
        scalar_fields: &[
            "customer_id",
            "email",
            "password",
            "created_at",
            "updated_at",
        ],
        unique_fields: &["email"],
        relations: &[
            RelationInfo {
                target: "order",
                kind: RelationKind::HasMany,
                foreign_key: None,
            },
            RelationInfo {
                target: "review",
                kind: RelationKind::HasMany,
                foreign_key: None,
            },
        ],
    },
    EntityDef {
        name: "order",
        table: "orders",
        primary_key: "order_id",
        scalar_fields: &["order_id", "customer_id", "order_date", "total_amount"],
        unique_fields: &[],
        relations: &[
            RelationInfo {
                target: "customer",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("customer_id"),
            },
            RelationInfo {
                target: "order_detail",
                kind: RelationKind::HasMany,
                foreign_key: None,
            },
        ],
    },
    EntityDef {
        name: "order_detail",
        table: "order_details",
        primary_key: "order_detail_id",
        scalar_fields: &[
            "order_detail_id",
            "order_id",
            "book_id",
            "quantity",
            "price_per_item",
        ],
        unique_fields: &[],
        relations: &[
            RelationInfo {
                target: "order",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("order_id"),
            },
            RelationInfo {
                target: "book",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("book_id"),
            },
        ],
    },
    EntityDef {
        name: "review",
        table: "reviews",
        primary_key: "review_id",
        scalar_fields: &[
            "review_id",
            "book_id",
            "customer_id",
            "rating",
            "comment",
            "created_at",
            "updated_at",
        ],
        unique_fields: &[],
        relations: &[
            RelationInfo {
                target: "book",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("book_id"),
            },
            RelationInfo {
                target: "customer",
                kind: RelationKind::BelongsTo,
                foreign_key: Some("customer_id"),
            },
        ],
    },
];

/// Look up an entity descriptor by name.
pub fn entity(name: &str) -> Option<&'static EntityDef> {
    ENTITIES.iter().find(|e| e.name == name)
}
