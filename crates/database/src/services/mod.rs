//! One service per entity, each exposing `list`, `get`, `create`, `update` and `delete`.
//!
//! Every write runs inside a single transaction. A failure at any step drops the
//! transaction, which rolls back the entity row together with its subject links.

use crate::error::ServiceError;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, prelude::DateTime};
use uuid::Uuid;

/// Copies every `Some` field of a change set onto a model.
///
/// Fields after the `;` are nullable columns and get wrapped in `Some`.
macro_rules! apply_changes {
    ($changes:ident => $model:ident; $($field:ident),* ; $($nullable:ident),* $(,)?) => {{
        $(
            if let Some(value) = $changes.$field {
                $model.$field = value;
            }
        )*
        $(
            if let Some(value) = $changes.$nullable {
                $model.$nullable = Some(value);
            }
        )*
    }};
}

pub mod academic_year;
pub mod association;
pub mod class;
pub mod dashboard;
pub mod exam;
pub mod fee;
pub mod fee_type;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod term;
mod validate;

fn now() -> DateTime {
    chrono::Utc::now().naive_utc()
}

const fn default_true() -> bool {
    true
}

/// Fails with a validation error on `field` unless a row of `E` has `column = id`
async fn ensure_exists<E, C>(
    conn: &C,
    column: E::Column,
    field: &'static str,
    id: Uuid,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    match E::find().filter(column.eq(id)).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::validation(
            field,
            format!("no {} with id {id}", E::default().table_name()),
        )),
    }
}

/// Fails with a validation error on `field` if another row of `E` already has `column = value`
async fn ensure_unique<E, C>(
    conn: &C,
    column: E::Column,
    field: &'static str,
    value: &str,
    except: Option<(E::Column, Uuid)>,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut query = E::find().filter(column.eq(value));
    if let Some((id_column, id)) = except {
        query = query.filter(id_column.ne(id));
    }

    match query.one(conn).await? {
        Some(_) => Err(ServiceError::validation(
            field,
            format!("{value} is already taken"),
        )),
        None => Ok(()),
    }
}
