//! Static data catalog: the read-only attribute store for hulls, modules,
//! and charges.
//!
//! Reference data ships as a SQLite database produced from the vendor
//! export. The loader performs runtime schema detection so both the current
//! `Types`/`TypeAttributes` layout and the legacy
//! `invTypes`/`dgmTypeAttributes` layout are supported. Classification is
//! resolved once here, at ingestion, so the rest of the engine dispatches on
//! a tag instead of re-deriving categories from group names per report.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::dogma::{classify, AttributeId, AttributeSet, Classification, TypeId};
use crate::error::{Error, Result};

/// One catalog entry: an item with its resolved classification and
/// attribute set. Attributes are immutable facts sourced externally; the
/// engine never writes them.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRecord {
    pub id: TypeId,
    pub name: String,
    pub group_id: i64,
    pub category_id: i64,
    pub classification: Classification,
    pub attributes: AttributeSet,
}

impl TypeRecord {
    /// Look up a required attribute, naming this type in the error.
    pub fn require(&self, id: AttributeId) -> Result<f64> {
        self.attributes.require(id, &self.name)
    }
}

/// In-memory type catalog with name lookup.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<TypeId, TypeRecord>,
    name_to_id: HashMap<String, TypeId>,
}

impl TypeCatalog {
    /// Load the catalog from a static data export.
    pub fn load(db_path: &Path) -> Result<Self> {
        let connection = Connection::open(db_path)?;
        let schema = detect_schema(&connection)?;
        debug!(schema = %schema.variant, path = %db_path.display(), "loading type catalog");

        let categories = load_group_categories(&connection, &schema)?;
        let mut types = load_types(&connection, &schema, &categories)?;
        attach_attributes(&connection, &schema, &mut types)?;

        let mut name_to_id: HashMap<String, TypeId> = HashMap::new();
        for record in types.values() {
            match name_to_id.entry(normalize_name(&record.name)) {
                std::collections::hash_map::Entry::Occupied(entry) => {
                    warn!(
                        name = %record.name,
                        kept = *entry.get(),
                        shadowed = record.id,
                        "duplicate type name in export; keeping first occurrence",
                    );
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(record.id);
                }
            }
        }

        Ok(Self { types, name_to_id })
    }

    /// Get a type by identifier.
    pub fn get(&self, id: TypeId) -> Option<&TypeRecord> {
        self.types.get(&id)
    }

    /// Get a type by identifier, failing when absent. Item not found is a
    /// refusal to resolve, never a silent zero default.
    pub fn require(&self, id: TypeId) -> Result<&TypeRecord> {
        self.get(id).ok_or(Error::UnknownTypeId { id })
    }

    /// Get a type by name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&TypeRecord> {
        self.name_to_id
            .get(&normalize_name(name))
            .and_then(|id| self.types.get(id))
    }

    /// Resolve a type by name, producing did-you-mean suggestions on failure.
    pub fn resolve_name(&self, name: &str) -> Result<&TypeRecord> {
        self.get_by_name(name).ok_or_else(|| Error::UnknownType {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Closest type names to `name`, ranked by Jaro-Winkler similarity.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_name(name);
        let mut scored: Vec<(f64, &str)> = self
            .types
            .values()
            .map(|record| {
                (
                    strsim::jaro_winkler(&needle, &normalize_name(&record.name)),
                    record.name.as_str(),
                )
            })
            .filter(|(score, _)| *score > 0.7)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Search types whose name contains `query` (case-insensitive), sorted by
    /// name.
    pub fn search(&self, query: &str) -> Vec<&TypeRecord> {
        let needle = normalize_name(query);
        let mut matches: Vec<&TypeRecord> = self
            .types
            .values()
            .filter(|record| normalize_name(&record.name).contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    /// All hull types, sorted by name.
    pub fn hulls(&self) -> Vec<&TypeRecord> {
        let mut hulls: Vec<&TypeRecord> = self
            .types
            .values()
            .filter(|record| record.classification == Classification::Hull)
            .collect();
        hulls.sort_by(|a, b| a.name.cmp(&b.name));
        hulls
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Normalize a type name for case-insensitive lookup.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaVariant {
    StaticData,
    LegacyExport,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SchemaVariant::StaticData => "static_data",
            SchemaVariant::LegacyExport => "legacy_export",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaDefinition {
    variant: SchemaVariant,
    types_table: &'static str,
    type_id_column: &'static str,
    type_name_column: &'static str,
    type_group_column: &'static str,
    published_column: &'static str,
    groups_table: &'static str,
    group_id_column: &'static str,
    group_category_column: &'static str,
    attributes_table: &'static str,
    attribute_type_column: &'static str,
    attribute_id_column: &'static str,
    /// SQL expression yielding the numeric value of an attribute row.
    attribute_value_expr: &'static str,
}

impl SchemaVariant {
    fn definition(self) -> SchemaDefinition {
        match self {
            SchemaVariant::StaticData => SchemaDefinition {
                variant: SchemaVariant::StaticData,
                types_table: "Types",
                type_id_column: "typeId",
                type_name_column: "name",
                type_group_column: "groupId",
                published_column: "published",
                groups_table: "Groups",
                group_id_column: "groupId",
                group_category_column: "categoryId",
                attributes_table: "TypeAttributes",
                attribute_type_column: "typeId",
                attribute_id_column: "attributeId",
                attribute_value_expr: "value",
            },
            SchemaVariant::LegacyExport => SchemaDefinition {
                variant: SchemaVariant::LegacyExport,
                types_table: "invTypes",
                type_id_column: "typeID",
                type_name_column: "typeName",
                type_group_column: "groupID",
                published_column: "published",
                groups_table: "invGroups",
                group_id_column: "groupID",
                group_category_column: "categoryID",
                attributes_table: "dgmTypeAttributes",
                attribute_type_column: "typeID",
                attribute_id_column: "attributeID",
                attribute_value_expr: "COALESCE(valueFloat, valueInt)",
            },
        }
    }
}

fn detect_schema(connection: &Connection) -> Result<SchemaDefinition> {
    for variant in [SchemaVariant::StaticData, SchemaVariant::LegacyExport] {
        if let Some(schema) = detect_variant(connection, variant)? {
            return Ok(schema);
        }
    }
    Err(Error::UnsupportedSchema)
}

fn detect_variant(
    connection: &Connection,
    variant: SchemaVariant,
) -> Result<Option<SchemaDefinition>> {
    let schema = variant.definition();

    if !table_exists(connection, schema.types_table)?
        || !table_exists(connection, schema.groups_table)?
        || !table_exists(connection, schema.attributes_table)?
    {
        return Ok(None);
    }

    if !table_has_columns(
        connection,
        schema.types_table,
        &[
            schema.type_id_column,
            schema.type_name_column,
            schema.type_group_column,
        ],
    )? {
        return Ok(None);
    }

    if !table_has_columns(
        connection,
        schema.attributes_table,
        &[schema.attribute_type_column, schema.attribute_id_column],
    )? {
        return Ok(None);
    }

    Ok(Some(schema))
}

fn load_group_categories(
    connection: &Connection,
    schema: &SchemaDefinition,
) -> Result<HashMap<i64, i64>> {
    let sql = format!(
        "SELECT {id}, {category} FROM {table}",
        id = schema.group_id_column,
        category = schema.group_category_column,
        table = schema.groups_table
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut categories = HashMap::new();
    for row in rows {
        let (group_id, category_id): (i64, i64) = row?;
        categories.insert(group_id, category_id);
    }
    Ok(categories)
}

fn load_types(
    connection: &Connection,
    schema: &SchemaDefinition,
    categories: &HashMap<i64, i64>,
) -> Result<HashMap<TypeId, TypeRecord>> {
    let sql = format!(
        "SELECT {id}, {name}, {group} FROM {table} WHERE {published} != 0",
        id = schema.type_id_column,
        name = schema.type_name_column,
        group = schema.type_group_column,
        table = schema.types_table,
        published = schema.published_column
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, TypeId>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut types = HashMap::new();
    for row in rows {
        let (id, name, group_id) = row?;
        let category_id = categories.get(&group_id).copied().unwrap_or(0);
        types.insert(
            id,
            TypeRecord {
                id,
                name,
                group_id,
                category_id,
                classification: classify(group_id, category_id),
                attributes: AttributeSet::default(),
            },
        );
    }
    Ok(types)
}

/// Attach attribute rows to their owning types.
///
/// Rows referencing type ids missing from the types table (unpublished or
/// corrupt) are skipped rather than propagated.
fn attach_attributes(
    connection: &Connection,
    schema: &SchemaDefinition,
    types: &mut HashMap<TypeId, TypeRecord>,
) -> Result<()> {
    let sql = format!(
        "SELECT {type_id}, {attr_id}, {value} FROM {table}",
        type_id = schema.attribute_type_column,
        attr_id = schema.attribute_id_column,
        value = schema.attribute_value_expr,
        table = schema.attributes_table
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, TypeId>(0)?,
            row.get::<_, AttributeId>(1)?,
            row.get::<_, Option<f64>>(2)?,
        ))
    })?;

    let mut grouped: HashMap<TypeId, Vec<(AttributeId, f64)>> = HashMap::new();
    let mut skipped_rows = 0usize;
    for row in rows {
        let (type_id, attribute_id, value) = row?;
        let Some(value) = value else {
            skipped_rows += 1;
            continue;
        };
        if !types.contains_key(&type_id) {
            skipped_rows += 1;
            continue;
        }
        grouped.entry(type_id).or_default().push((attribute_id, value));
    }

    for (type_id, values) in grouped {
        if let Some(record) = types.get_mut(&type_id) {
            record.attributes = values.into_iter().collect();
        }
    }

    if skipped_rows > 0 {
        warn!(
            skipped_rows,
            "ignored attribute rows referencing unknown types or null values",
        );
    }

    Ok(())
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
