use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::db::search_pattern;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Flavour {
    pub id: i64,
    #[schema(example = "Jamón")]
    pub flavour_name: String,
    pub available: bool,
    pub flavour_group_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FlavourInput {
    pub flavour_name: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub flavour_group_id: Option<i64>,
}

fn default_available() -> bool {
    true
}

/// Named category limiting how many flavours of it may be chosen.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct FlavourGroup {
    pub id: i64,
    #[schema(example = "Clásicos")]
    pub grp_title: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FlavourGroupInput {
    pub grp_title: String,
}

pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Flavour>, sqlx::Error> {
    sqlx::query_as::<_, Flavour>(
        "SELECT id, flavour_name, available, flavour_group_id \
         FROM flavour WHERE upper(flavour_name) ILIKE $1",
    )
    .bind(search_pattern(term))
    .fetch_all(pool)
    .await
}

pub async fn insert(pool: &PgPool, flavour: &FlavourInput) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO flavour (flavour_name, available, flavour_group_id) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&flavour.flavour_name)
    .bind(flavour.available)
    .bind(flavour.flavour_group_id)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: i64, flavour: &FlavourInput) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE flavour SET flavour_name = $1, available = $2, flavour_group_id = $3 \
         WHERE id = $4",
    )
    .bind(&flavour.flavour_name)
    .bind(flavour.available)
    .bind(flavour.flavour_group_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM flavour WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_groups(pool: &PgPool) -> Result<Vec<FlavourGroup>, sqlx::Error> {
    sqlx::query_as::<_, FlavourGroup>("SELECT id, grp_title FROM flavour_group")
        .fetch_all(pool)
        .await
}

pub async fn insert_group(pool: &PgPool, group: &FlavourGroupInput) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("INSERT INTO flavour_group (grp_title) VALUES ($1) RETURNING id")
        .bind(&group.grp_title)
        .fetch_one(pool)
        .await
}

pub async fn update_group(
    pool: &PgPool,
    id: i64,
    group: &FlavourGroupInput,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE flavour_group SET grp_title = $1 WHERE id = $2")
        .bind(&group.grp_title)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_group(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM flavour_group WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavour_input_defaults_available() {
        let json = r#"{"flavour_name":"Jamón","flavour_group_id":1}"#;
        let input: FlavourInput = serde_json::from_str(json).unwrap();
        assert!(input.available);
        assert_eq!(input.flavour_group_id, Some(1));
    }

    #[test]
    fn flavour_input_without_group() {
        let json = r#"{"flavour_name":"Roquefort","available":false}"#;
        let input: FlavourInput = serde_json::from_str(json).unwrap();
        assert!(!input.available);
        assert!(input.flavour_group_id.is_none());
    }
}
