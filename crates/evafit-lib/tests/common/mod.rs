//! Common test utilities and fixture helpers.
//!
//! Builds a miniature static data export in a temporary SQLite database,
//! in either supported schema variant, and provides canned fitting
//! definitions against it.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;

use evafit_lib::TypeCatalog;

/// (type_id, name, group_id) rows for the fixture export.
const TYPES: &[(i64, &str, i64)] = &[
    (598, "Breacher", 25),
    (622, "Stabber", 26),
    (3001, "200mm AutoCannon I", 55),
    (3002, "Republic Fleet Fusion S", 83),
    (3003, "125mm Railgun I", 74),
    (3004, "Antimatter Charge S", 85),
    (3005, "Rocket Launcher I", 507),
    (3006, "Mjolnir Rocket", 387),
    (3007, "Gyrostabilizer I", 59),
    (3008, "Tracking Enhancer I", 67),
    (3009, "Medium Shield Extender I", 38),
    (3010, "200mm Steel Plates I", 42),
    (3011, "Small Shield Booster I", 40),
    (3012, "Civilian Gatling Railgun", 74),
];

/// (group_id, category_id) rows.
const GROUPS: &[(i64, i64)] = &[
    (25, 6),
    (26, 6),
    (55, 7),
    (83, 8),
    (74, 7),
    (85, 8),
    (507, 7),
    (387, 8),
    (59, 7),
    (67, 7),
    (38, 7),
    (42, 7),
    (40, 7),
];

/// (type_id, attribute_id, value) rows.
const ATTRIBUTES: &[(i64, i64, f64)] = &[
    // Breacher: 400/300/200 buffer, no resonances (zero resistances).
    (598, 263, 400.0),
    (598, 265, 300.0),
    (598, 9, 200.0),
    (598, 482, 375.0),
    (598, 55, 125_000.0),
    (598, 48, 137.5),
    (598, 11, 40.0),
    (598, 14, 3.0),
    (598, 13, 3.0),
    (598, 12, 2.0),
    (598, 1137, 3.0),
    (598, 37, 335.0),
    (598, 70, 3.9),
    (598, 4, 1_100_000.0),
    (598, 552, 35.0),
    (598, 564, 860.0),
    (598, 192, 4.0),
    // Stabber: cruiser with shield resonances (em 0%, th 20%, kin 40%, ex 50%).
    (622, 263, 1200.0),
    (622, 265, 1100.0),
    (622, 9, 1400.0),
    (622, 482, 750.0),
    (622, 55, 245_000.0),
    (622, 48, 300.0),
    (622, 11, 900.0),
    (622, 14, 6.0),
    (622, 13, 4.0),
    (622, 12, 4.0),
    (622, 1137, 3.0),
    (622, 271, 1.0),
    (622, 274, 0.8),
    (622, 273, 0.6),
    (622, 272, 0.5),
    // 200mm AutoCannon I: ammo-fed projectile turret, no capacitor need.
    (3001, 51, 3000.0),
    (3001, 64, 3.0),
    (3001, 160, 0.4),
    (3001, 54, 1200.0),
    (3001, 158, 6000.0),
    (3001, 50, 7.0),
    (3001, 30, 2.0),
    // Republic Fleet Fusion S: kinetic 20 / explosive 80 per round.
    (3002, 117, 20.0),
    (3002, 116, 80.0),
    // 125mm Railgun I: hybrid turret drawing capacitor.
    (3003, 51, 2000.0),
    (3003, 64, 2.0),
    (3003, 160, 0.3),
    (3003, 54, 8000.0),
    (3003, 158, 4000.0),
    (3003, 6, 1.2),
    (3003, 50, 18.0),
    (3003, 30, 6.0),
    // Antimatter Charge S: thermal 5 / kinetic 7.
    (3004, 118, 5.0),
    (3004, 117, 7.0),
    // Rocket Launcher I: cycle only; damage comes from the rocket.
    (3005, 51, 4000.0),
    (3005, 50, 12.0),
    (3005, 30, 1.0),
    // Mjolnir Rocket: EM 25, explosion cloud 20 m at 150 m/s.
    (3006, 114, 25.0),
    (3006, 654, 20.0),
    (3006, 653, 150.0),
    // Gyrostabilizer I: +10% projectile damage.
    (3007, 64, 1.10),
    (3007, 50, 18.0),
    (3007, 30, 1.0),
    // Tracking Enhancer I: +7.5% tracking.
    (3008, 767, 1.075),
    (3008, 50, 20.0),
    (3008, 30, 1.0),
    // Medium Shield Extender I: +1050 shield.
    (3009, 72, 1050.0),
    (3009, 50, 45.0),
    (3009, 30, 12.0),
    // 200mm Steel Plates I: +600 armor.
    (3010, 1159, 600.0),
    (3010, 50, 2.0),
    (3010, 30, 8.0),
    // Small Shield Booster I: active, 10 GJ per 3 s cycle.
    (3011, 6, 10.0),
    (3011, 73, 3000.0),
    (3011, 50, 28.0),
    (3011, 30, 7.0),
    // Civilian Gatling Railgun: deliberately missing its cycle time.
    (3012, 64, 1.0),
];

/// Unpublished type that must not surface in the catalog.
const UNPUBLISHED: (i64, &str, i64) = (9001, "Prototype Breacher", 25);

/// Create the fixture export in the current `Types`/`TypeAttributes` layout.
#[allow(dead_code)]
pub fn create_static_data_db(path: &Path) {
    let connection = Connection::open(path).expect("create fixture db");
    connection
        .execute_batch(
            "CREATE TABLE Types (typeId INTEGER PRIMARY KEY, name TEXT NOT NULL, \
             groupId INTEGER NOT NULL, published INTEGER NOT NULL DEFAULT 1);\n\
             CREATE TABLE Groups (groupId INTEGER PRIMARY KEY, categoryId INTEGER NOT NULL);\n\
             CREATE TABLE TypeAttributes (typeId INTEGER NOT NULL, \
             attributeId INTEGER NOT NULL, value REAL);",
        )
        .expect("create fixture schema");

    for (group_id, category_id) in GROUPS {
        connection
            .execute(
                "INSERT INTO Groups (groupId, categoryId) VALUES (?1, ?2)",
                (group_id, category_id),
            )
            .expect("insert group");
    }
    for (type_id, name, group_id) in TYPES {
        connection
            .execute(
                "INSERT INTO Types (typeId, name, groupId, published) VALUES (?1, ?2, ?3, 1)",
                (type_id, name, group_id),
            )
            .expect("insert type");
    }
    connection
        .execute(
            "INSERT INTO Types (typeId, name, groupId, published) VALUES (?1, ?2, ?3, 0)",
            UNPUBLISHED,
        )
        .expect("insert unpublished type");
    for (type_id, attribute_id, value) in ATTRIBUTES {
        connection
            .execute(
                "INSERT INTO TypeAttributes (typeId, attributeId, value) VALUES (?1, ?2, ?3)",
                (type_id, attribute_id, value),
            )
            .expect("insert attribute");
    }
}

/// Create the fixture export in the legacy `invTypes`/`dgmTypeAttributes`
/// layout, exercising the `valueInt`/`valueFloat` split.
#[allow(dead_code)]
pub fn create_legacy_db(path: &Path) {
    let connection = Connection::open(path).expect("create fixture db");
    connection
        .execute_batch(
            "CREATE TABLE invTypes (typeID INTEGER PRIMARY KEY, typeName TEXT NOT NULL, \
             groupID INTEGER NOT NULL, published INTEGER NOT NULL DEFAULT 1);\n\
             CREATE TABLE invGroups (groupID INTEGER PRIMARY KEY, categoryID INTEGER NOT NULL);\n\
             CREATE TABLE dgmTypeAttributes (typeID INTEGER NOT NULL, \
             attributeID INTEGER NOT NULL, valueInt INTEGER, valueFloat REAL);",
        )
        .expect("create fixture schema");

    for (group_id, category_id) in GROUPS {
        connection
            .execute(
                "INSERT INTO invGroups (groupID, categoryID) VALUES (?1, ?2)",
                (group_id, category_id),
            )
            .expect("insert group");
    }
    for (type_id, name, group_id) in TYPES {
        connection
            .execute(
                "INSERT INTO invTypes (typeID, typeName, groupID, published) VALUES (?1, ?2, ?3, 1)",
                (type_id, name, group_id),
            )
            .expect("insert type");
    }
    connection
        .execute(
            "INSERT INTO invTypes (typeID, typeName, groupID, published) VALUES (?1, ?2, ?3, 0)",
            UNPUBLISHED,
        )
        .expect("insert unpublished type");
    for (type_id, attribute_id, value) in ATTRIBUTES {
        // Integral values land in valueInt, fractional ones in valueFloat,
        // mirroring how the legacy export splits them.
        if value.fract() == 0.0 {
            connection
                .execute(
                    "INSERT INTO dgmTypeAttributes (typeID, attributeID, valueInt) \
                     VALUES (?1, ?2, ?3)",
                    (type_id, attribute_id, *value as i64),
                )
                .expect("insert attribute");
        } else {
            connection
                .execute(
                    "INSERT INTO dgmTypeAttributes (typeID, attributeID, valueFloat) \
                     VALUES (?1, ?2, ?3)",
                    (type_id, attribute_id, value),
                )
                .expect("insert attribute");
        }
    }
}

/// Temporary fixture database, removed on drop.
#[allow(dead_code)]
pub struct CatalogFixture {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

#[allow(dead_code)]
impl CatalogFixture {
    /// Fixture in the current static data layout.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("static_data.db");
        create_static_data_db(&db_path);
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Fixture in the legacy export layout.
    pub fn legacy() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("legacy_export.db");
        create_legacy_db(&db_path);
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    pub fn catalog(&self) -> TypeCatalog {
        TypeCatalog::load(&self.db_path).expect("load fixture catalog")
    }
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}
